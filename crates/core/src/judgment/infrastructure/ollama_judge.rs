use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::judgment::domain::judgment_source::{GenerationOptions, JudgmentSource};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "mistral";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Judgment source backed by a local Ollama server (`/api/generate`).
pub struct OllamaJudge {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
}

impl OllamaJudge {
    pub fn new(
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

impl JudgmentSource for OllamaJudge {
    fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, Box<dyn std::error::Error>> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: RequestOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        };

        log::debug!("Requesting judgment from {} ({})", self.endpoint(), self.model);
        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()?
            .error_for_status()?;
        let body = response.text()?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<String, Box<dyn std::error::Error>> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| format!("Malformed Ollama response: {e}"))?;
    Ok(parsed.response)
}
