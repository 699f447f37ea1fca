/// Domain interface for grammar checking.
///
/// Only the number of issues found matters to the assessment.
pub trait GrammarChecker: Send {
    fn check(&self, text: &str) -> Result<u32, Box<dyn std::error::Error>>;
}
