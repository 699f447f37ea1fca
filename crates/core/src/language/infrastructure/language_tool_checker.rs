use std::time::Duration;

use serde::Deserialize;

use crate::language::domain::grammar_checker::GrammarChecker;

pub const DEFAULT_LANGUAGETOOL_URL: &str = "http://localhost:8081";
pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Deserialize)]
struct CheckResponse {
    matches: Vec<serde_json::Value>,
}

/// Grammar checker backed by a LanguageTool server (`/v2/check`).
///
/// Created once per run and shared by reference; the HTTP client keeps its
/// connection pool for the lifetime of the checker.
pub struct LanguageToolChecker {
    client: reqwest::blocking::Client,
    base_url: String,
    language: String,
}

impl LanguageToolChecker {
    pub fn new(
        base_url: &str,
        language: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn endpoint(&self) -> String {
        format!("{}/v2/check", self.base_url)
    }
}

impl GrammarChecker for LanguageToolChecker {
    fn check(&self, text: &str) -> Result<u32, Box<dyn std::error::Error>> {
        if text.trim().is_empty() {
            return Ok(0);
        }
        let response = self
            .client
            .post(self.endpoint())
            .form(&[("language", self.language.as_str()), ("text", text)])
            .send()
            .map_err(|e| format!("LanguageTool request to {} failed: {e}", self.endpoint()))?
            .error_for_status()?;
        count_matches(&response.text()?)
    }
}

fn count_matches(body: &str) -> Result<u32, Box<dyn std::error::Error>> {
    let parsed: CheckResponse = serde_json::from_str(body)
        .map_err(|e| format!("Malformed LanguageTool response: {e}"))?;
    Ok(u32::try_from(parsed.matches.len())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_matches() {
        let body = r#"{
            "software": {"name": "LanguageTool"},
            "matches": [
                {"message": "Possible typo", "offset": 0, "length": 4},
                {"message": "Use 'an'", "offset": 10, "length": 1}
            ]
        }"#;
        assert_eq!(count_matches(body).unwrap(), 2);
    }

    #[test]
    fn test_count_matches_empty() {
        assert_eq!(count_matches(r#"{"matches": []}"#).unwrap(), 0);
    }

    #[test]
    fn test_count_matches_malformed() {
        assert!(count_matches(r#"{"error": "busy"}"#).is_err());
    }

    #[test]
    fn test_blank_text_skips_request() {
        let checker =
            LanguageToolChecker::new("http://127.0.0.1:9", DEFAULT_LANGUAGE, Duration::from_millis(200))
                .unwrap();
        assert_eq!(checker.check("   ").unwrap(), 0);
    }

    #[test]
    fn test_unreachable_server_returns_error() {
        let checker =
            LanguageToolChecker::new("http://127.0.0.1:9/", DEFAULT_LANGUAGE, Duration::from_millis(200))
                .unwrap();
        let err = checker.check("This are wrong.").unwrap_err();
        assert!(err.to_string().contains("LanguageTool request"));
    }

    #[test]
    #[ignore] // Requires a running LanguageTool server
    fn test_check_against_local_server() {
        let checker = LanguageToolChecker::new(
            DEFAULT_LANGUAGETOOL_URL,
            DEFAULT_LANGUAGE,
            Duration::from_secs(30),
        )
        .unwrap();
        assert!(checker.check("This are a sentence with error.").unwrap() > 0);
    }
}
