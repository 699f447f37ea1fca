use crate::entities::domain::entity::EntitySet;

use super::judgment_source::{GenerationOptions, JudgmentSource};
use super::verdict::{negates_hire, Verdict, VERDICT_MARKER};
use super::verdict_heuristic::heuristic_verdict;

/// Characters of transcript included in the prompt.
pub const PROMPT_TRANSCRIPT_CHARS: usize = 400;
/// Responses this short (or shorter) are treated as truncated or garbage.
pub const MIN_JUDGMENT_CHARS: usize = 30;

/// Produces a judgment text that always carries exactly one recognizable
/// `VERDICT:` line.
///
/// Asks the external source first when one is configured. Failures and
/// undersized answers fall back to the deterministic heuristic.
pub struct JudgmentNormalizer {
    source: Option<Box<dyn JudgmentSource>>,
    options: GenerationOptions,
}

impl JudgmentNormalizer {
    pub fn new(source: Option<Box<dyn JudgmentSource>>) -> Self {
        Self {
            source,
            options: GenerationOptions::default(),
        }
    }

    /// A normalizer that never calls out and always uses the heuristic.
    pub fn heuristic_only() -> Self {
        Self::new(None)
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn normalize(
        &self,
        transcript: &str,
        grammar_errors: u32,
        matched: &EntitySet,
        unmentioned: &EntitySet,
    ) -> String {
        if let Some(response) = self.ask_source(transcript, grammar_errors, matched, unmentioned) {
            if response.trim().chars().count() > MIN_JUDGMENT_CHARS {
                return ensure_verdict_line(&response);
            }
            log::warn!(
                "Judgment source returned an undersized response ({} chars), using heuristic",
                response.trim().chars().count()
            );
        }
        heuristic_judgment(grammar_errors, matched.len(), matched.len() + unmentioned.len())
    }

    fn ask_source(
        &self,
        transcript: &str,
        grammar_errors: u32,
        matched: &EntitySet,
        unmentioned: &EntitySet,
    ) -> Option<String> {
        let source = self.source.as_ref()?;
        let prompt = build_prompt(transcript, grammar_errors, matched.len(), unmentioned.len());
        match source.generate(&prompt, &self.options) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Judgment source unavailable, using heuristic: {e}");
                None
            }
        }
    }
}

/// The bounded prompt sent to the external judgment source.
pub fn build_prompt(
    transcript: &str,
    grammar_errors: u32,
    matched_count: usize,
    unmentioned_count: usize,
) -> String {
    let excerpt: String = transcript.chars().take(PROMPT_TRANSCRIPT_CHARS).collect();
    format!(
        "You are an expert HR interviewer. Analyze this interview professionally.\n\
         \n\
         TRANSCRIPT (first {PROMPT_TRANSCRIPT_CHARS} chars): {excerpt}\n\
         \n\
         ANALYSIS:\n\
         - Grammar errors: {grammar_errors}\n\
         - Skills mentioned: {matched_count}\n\
         - Skills missing: {unmentioned_count}\n\
         \n\
         Write a brief 3-4 sentence assessment. End with:\n\
         {VERDICT_MARKER} HIRE / REJECT / MAYBE"
    )
}

/// Leaves `text` with exactly one recognizable verdict line.
///
/// Text with a single recognizable line is returned unchanged. With several,
/// the last one is the answer and every other `VERDICT:` line is dropped.
/// With none, unrecognized `VERDICT:` lines are dropped and `VERDICT: HIRE`
/// is appended when the text mentions hiring without negating it,
/// `VERDICT: REJECT` if not.
pub fn ensure_verdict_line(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let last = lines
        .iter()
        .rposition(|line| Verdict::parse_line(line).is_some());
    let recognized = lines
        .iter()
        .filter(|line| Verdict::parse_line(line).is_some())
        .count();

    match (last, recognized) {
        (Some(_), 1) => text.to_string(),
        (Some(last), _) => lines
            .iter()
            .enumerate()
            .filter(|(i, line)| *i == last || !line.contains(VERDICT_MARKER))
            .map(|(_, line)| *line)
            .collect::<Vec<_>>()
            .join("\n"),
        (None, _) => {
            let kept: Vec<&str> = lines
                .into_iter()
                .filter(|line| !line.contains(VERDICT_MARKER))
                .collect();
            let body = kept.join("\n");
            let upper = body.to_uppercase();
            let inferred = if upper.contains("HIRE") && !negates_hire(&upper) {
                Verdict::Hire
            } else {
                Verdict::Reject
            };
            format!("{}\n\n{}", body.trim_end(), inferred.line())
        }
    }
}

/// Fixed-shape fallback paragraph ending with the heuristic verdict line.
pub fn heuristic_judgment(grammar_errors: u32, matched: usize, total: usize) -> String {
    let (verdict, narrative) = heuristic_verdict(grammar_errors, matched, total);
    format!(
        "Automated assessment (no external judgment available). {narrative}\n\n{}",
        verdict.line()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::domain::entity::Entity;
    use crate::judgment::domain::verdict_heuristic::decide;
    use std::sync::{Arc, Mutex};

    // ─── Stubs ───

    struct FixedSource(String);

    impl JudgmentSource for FixedSource {
        fn generate(
            &self,
            _: &str,
            _: &GenerationOptions,
        ) -> Result<String, Box<dyn std::error::Error>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl JudgmentSource for FailingSource {
        fn generate(
            &self,
            _: &str,
            _: &GenerationOptions,
        ) -> Result<String, Box<dyn std::error::Error>> {
            Err("connection refused".into())
        }
    }

    struct RecordingSource {
        prompts: Arc<Mutex<Vec<(String, GenerationOptions)>>>,
    }

    impl JudgmentSource for RecordingSource {
        fn generate(
            &self,
            prompt: &str,
            options: &GenerationOptions,
        ) -> Result<String, Box<dyn std::error::Error>> {
            self.prompts
                .lock()
                .unwrap()
                .push((prompt.to_string(), *options));
            Ok("The candidate answered clearly and with confidence.\nVERDICT: HIRE".to_string())
        }
    }

    fn skills(names: &[&str]) -> EntitySet {
        names.iter().map(|n| Entity::new(*n, "SKILL")).collect()
    }

    fn verdict_lines(text: &str) -> usize {
        text.lines().filter(|l| l.contains(VERDICT_MARKER)).count()
    }

    #[test]
    fn test_recognized_verdict_returned_unchanged() {
        let text = "Clear, structured answers with relevant examples.\n\nVERDICT: MAYBE";
        let normalizer = JudgmentNormalizer::new(Some(Box::new(FixedSource(text.to_string()))));
        let out = normalizer.normalize("hello", 3, &skills(&["Rust"]), &skills(&["Go"]));
        assert_eq!(out, text);
        assert_eq!(Verdict::from_judgment(&out), Verdict::Review);
    }

    #[test]
    fn test_missing_verdict_appends_hire_when_mentioned() {
        let text = "I would hire this candidate without hesitation, great answers.";
        let normalizer = JudgmentNormalizer::new(Some(Box::new(FixedSource(text.to_string()))));
        let out = normalizer.normalize("", 0, &EntitySet::new(), &EntitySet::new());
        assert!(out.starts_with(text));
        assert!(out.ends_with("VERDICT: HIRE"));
        assert_eq!(verdict_lines(&out), 1);
    }

    #[test]
    fn test_missing_verdict_appends_reject_otherwise() {
        let text = "The answers were vague and lacked any concrete examples at all.";
        let normalizer = JudgmentNormalizer::new(Some(Box::new(FixedSource(text.to_string()))));
        let out = normalizer.normalize("", 0, &EntitySet::new(), &EntitySet::new());
        assert!(out.ends_with("VERDICT: REJECT"));
    }

    #[test]
    fn test_unrecognized_verdict_line_is_replaced() {
        let text = "Mixed signals throughout the whole conversation today.\nVERDICT: unsure";
        let out = ensure_verdict_line(text);
        assert_eq!(verdict_lines(&out), 1);
        assert!(!out.contains("unsure"));
        assert!(out.ends_with("VERDICT: REJECT"));
    }

    #[test]
    fn test_several_verdict_lines_keep_the_last() {
        let text = "Strong grasp of the stack, some gaps in experience.\n\
                    VERDICT: MAYBE\n\
                    Final answer.\n\
                    VERDICT: HIRE";
        let out = ensure_verdict_line(text);
        assert_eq!(verdict_lines(&out), 1);
        assert_eq!(Verdict::find_line(&out), Some("VERDICT: HIRE"));
        assert!(out.contains("Final answer."));
        assert!(out.starts_with("Strong grasp"));
    }

    #[test]
    fn test_several_verdict_lines_drop_unrecognized_ones_too() {
        let text = "Fine.\nVERDICT: REJECT\nVERDICT: pending\nVERDICT: MAYBE";
        let out = ensure_verdict_line(text);
        assert_eq!(out, "Fine.\nVERDICT: MAYBE");
    }

    #[test]
    fn test_negated_hire_without_verdict_appends_reject() {
        let text = "I would not hire this candidate, the answers were too shallow.";
        let out = ensure_verdict_line(text);
        assert!(out.ends_with("VERDICT: REJECT"));
        assert_eq!(verdict_lines(&out), 1);
    }

    #[test]
    fn test_undersized_response_falls_back_to_heuristic() {
        let normalizer = JudgmentNormalizer::new(Some(Box::new(FixedSource("VERDICT: HIRE".into()))));
        let out = normalizer.normalize("", 20, &skills(&["A", "B", "C"]), &EntitySet::new());
        assert!(out.starts_with("Automated assessment"));
        assert_eq!(Verdict::from_judgment(&out), Verdict::Reject);
    }

    #[test]
    fn test_failing_source_matches_heuristic_verdict() {
        let normalizer = JudgmentNormalizer::new(Some(Box::new(FailingSource)));
        for (errors, matched) in [(20, vec!["A"]), (2, vec!["A", "B", "C", "D"]), (7, vec!["A"])] {
            let matched = skills(&matched);
            let out = normalizer.normalize("transcript", errors, &matched, &skills(&["Z"]));
            assert_eq!(Verdict::from_judgment(&out), decide(errors, matched.len()));
            assert_eq!(verdict_lines(&out), 1);
        }
    }

    #[test]
    fn test_heuristic_only_never_calls_out() {
        let normalizer = JudgmentNormalizer::heuristic_only();
        let out = normalizer.normalize("transcript", 2, &skills(&["A", "B", "C", "D"]), &EntitySet::new());
        assert_eq!(Verdict::find_line(&out), Some("VERDICT: HIRE"));
    }

    #[test]
    fn test_prompt_is_bounded_and_carries_counts() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let normalizer = JudgmentNormalizer::new(Some(Box::new(RecordingSource {
            prompts: prompts.clone(),
        })));
        let transcript = "x".repeat(1000) + "TAIL";
        normalizer.normalize(&transcript, 4, &skills(&["A", "B"]), &skills(&["C"]));

        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        let (prompt, options) = &prompts[0];
        assert!(prompt.contains(&"x".repeat(PROMPT_TRANSCRIPT_CHARS)));
        assert!(!prompt.contains(&"x".repeat(PROMPT_TRANSCRIPT_CHARS + 1)));
        assert!(!prompt.contains("TAIL"));
        assert!(prompt.contains("Grammar errors: 4"));
        assert!(prompt.contains("Skills mentioned: 2"));
        assert!(prompt.contains("Skills missing: 1"));
        assert_eq!(options.max_tokens, 150);
    }

    #[test]
    fn test_prompt_truncates_on_char_boundary() {
        let transcript = "é".repeat(500);
        let prompt = build_prompt(&transcript, 0, 0, 0);
        assert!(prompt.contains(&"é".repeat(PROMPT_TRANSCRIPT_CHARS)));
    }
}
