use std::path::Path;

use super::assessment_error::AssessmentError;

/// Reads the candidate's CV as plain text.
pub fn load_cv(path: &Path) -> Result<String, AssessmentError> {
    if !path.is_file() {
        return Err(AssessmentError::CvNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|source| AssessmentError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loaded CV {} ({} chars)", path.display(), text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loads_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Senior engineer. Python, Docker.").unwrap();
        assert_eq!(load_cv(file.path()).unwrap(), "Senior engineer. Python, Docker.");
    }

    #[test]
    fn test_missing_file_is_cv_not_found() {
        let err = load_cv(Path::new("/nonexistent/cv.txt")).unwrap_err();
        assert!(matches!(err, AssessmentError::CvNotFound(_)));
    }

    #[test]
    fn test_directory_is_cv_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_cv(dir.path()).unwrap_err();
        assert!(matches!(err, AssessmentError::CvNotFound(_)));
    }

    #[test]
    fn test_non_utf8_is_input_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0xc3]).unwrap();
        let err = load_cv(file.path()).unwrap_err();
        assert!(matches!(err, AssessmentError::Input { .. }));
    }
}
