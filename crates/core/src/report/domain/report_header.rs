use chrono::{DateTime, Local};

use crate::shared::constants::{DEFAULT_CANDIDATE_NAME, DEFAULT_POSITION};

/// Who the report is about and when it was generated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportHeader {
    pub candidate_name: String,
    pub position: String,
    pub generated_at: DateTime<Local>,
}

impl ReportHeader {
    pub fn new(candidate_name: &str, position: &str, generated_at: DateTime<Local>) -> Self {
        Self {
            candidate_name: candidate_name.to_string(),
            position: position.to_string(),
            generated_at,
        }
    }

    /// Timestamp-derived identifier, `YYYYMMDDHHMMSS`.
    pub fn assessment_id(&self) -> String {
        self.generated_at.format("%Y%m%d%H%M%S").to_string()
    }

    pub fn date_line(&self) -> String {
        format!(
            "Date: {}  |  Time: {}",
            self.generated_at.format("%B %d, %Y"),
            self.generated_at.format("%I:%M %p")
        )
    }

    pub fn candidate_line(&self) -> String {
        format!(
            "Candidate: {}  |  Position: {}",
            self.candidate_name, self.position
        )
    }
}

impl Default for ReportHeader {
    fn default() -> Self {
        Self::new(DEFAULT_CANDIDATE_NAME, DEFAULT_POSITION, Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn header() -> ReportHeader {
        let at = Local.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap();
        ReportHeader::new("Ada Lovelace", "Analyst", at)
    }

    #[test]
    fn test_assessment_id_format() {
        assert_eq!(header().assessment_id(), "20260309140507");
    }

    #[test]
    fn test_date_line() {
        assert_eq!(header().date_line(), "Date: March 09, 2026  |  Time: 02:05 PM");
    }

    #[test]
    fn test_candidate_line() {
        assert_eq!(
            header().candidate_line(),
            "Candidate: Ada Lovelace  |  Position: Analyst"
        );
    }

    #[test]
    fn test_default_uses_placeholders() {
        let header = ReportHeader::default();
        assert_eq!(header.candidate_name, DEFAULT_CANDIDATE_NAME);
        assert_eq!(header.assessment_id().len(), 14);
    }
}
