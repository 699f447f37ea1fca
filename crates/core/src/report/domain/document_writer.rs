use std::path::Path;

use super::document::ReportDocument;

/// Renders a laid-out report to a file.
pub trait DocumentWriter: Send {
    /// Writes `document` to `path`, replacing any existing file.
    fn write(&self, path: &Path, document: &ReportDocument) -> Result<(), Box<dyn std::error::Error>>;
}
