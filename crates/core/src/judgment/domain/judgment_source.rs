/// Generation limits passed to an external judgment source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 150,
        }
    }
}

/// Domain interface for an external qualitative judgment (e.g. an LLM).
///
/// Implementations must bound their own blocking time; any error is treated
/// by the caller as the source being unavailable.
pub trait JudgmentSource: Send {
    fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, Box<dyn std::error::Error>>;
}
