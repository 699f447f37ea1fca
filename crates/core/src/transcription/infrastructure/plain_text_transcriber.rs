use std::fs;
use std::path::Path;

use crate::transcription::domain::transcriber::Transcriber;

/// "Transcribes" a recording that was already transcribed elsewhere by
/// reading its text file.
pub struct PlainTextTranscriber;

impl Transcriber for PlainTextTranscriber {
    fn transcribe(&self, source: &Path) -> Result<String, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(source)
            .map_err(|e| format!("Failed to read transcript {}: {e}", source.display()))?;
        Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_and_normalizes_whitespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  I have five years\n\nof   Python experience. ").unwrap();
        let text = PlainTextTranscriber.transcribe(file.path()).unwrap();
        assert_eq!(text, "I have five years of Python experience.");
    }

    #[test]
    fn test_missing_file_returns_error() {
        let err = PlainTextTranscriber
            .transcribe(Path::new("/nonexistent/interview.txt"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read transcript"));
    }
}
