use std::path::Path;

/// Domain interface for turning an interview recording into plain text.
pub trait Transcriber: Send {
    fn transcribe(&self, source: &Path) -> Result<String, Box<dyn std::error::Error>>;
}
