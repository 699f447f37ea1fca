use std::path::PathBuf;

/// Failures that abort an assessment run.
///
/// Judgment source failures never appear here; the normalizer absorbs them.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("Interview recording not found: {}", .0.display())]
    AudioNotFound(PathBuf),

    #[error("CV not found: {}", .0.display())]
    CvNotFound(PathBuf),

    #[error("Failed to read {}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} failed")]
    Collaborator {
        stage: &'static str,
        #[source]
        source: Box<dyn std::error::Error>,
    },

    #[error("Failed to generate report {}", path.display())]
    Layout {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error>,
    },
}

impl AssessmentError {
    /// Missing or unreadable input files.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AssessmentError::AudioNotFound(_)
                | AssessmentError::CvNotFound(_)
                | AssessmentError::Input { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_cv_not_found_message() {
        let err = AssessmentError::CvNotFound(PathBuf::from("/tmp/cv.txt"));
        assert_eq!(err.to_string(), "CV not found: /tmp/cv.txt");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_collaborator_exposes_source() {
        let err = AssessmentError::Collaborator {
            stage: "Grammar check",
            source: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "Grammar check failed");
        assert_eq!(err.source().unwrap().to_string(), "connection refused");
        assert!(!err.is_input_error());
    }
}
