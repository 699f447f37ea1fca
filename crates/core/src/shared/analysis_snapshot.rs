use serde::Serialize;

use crate::entities::domain::entity::{Entity, EntitySet};
use crate::entities::domain::entity_comparator::ComparisonResult;
use crate::judgment::domain::verdict::{Verdict, VERDICT_MARKER};

/// Everything one assessment run measured, frozen before the report is laid
/// out. The verdict is parsed from the judgment once, at construction.
#[derive(Debug, Clone)]
pub struct AnalysisSnapshot {
    transcript: String,
    grammar_errors: u32,
    transcript_entities: EntitySet,
    comparison: ComparisonResult,
    judgment: String,
    verdict: Verdict,
}

impl AnalysisSnapshot {
    pub fn new(
        transcript: String,
        grammar_errors: u32,
        transcript_entities: EntitySet,
        comparison: ComparisonResult,
        judgment: String,
    ) -> Self {
        let verdict = Verdict::from_judgment(&judgment);
        Self {
            transcript,
            grammar_errors,
            transcript_entities,
            comparison,
            judgment,
            verdict,
        }
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn grammar_errors(&self) -> u32 {
        self.grammar_errors
    }

    pub fn transcript_entities(&self) -> &EntitySet {
        &self.transcript_entities
    }

    pub fn comparison(&self) -> &ComparisonResult {
        &self.comparison
    }

    pub fn judgment(&self) -> &str {
        &self.judgment
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// `max(0, 100 - 3 * grammar_errors)`
    pub fn grammar_accuracy(&self) -> u32 {
        100u32.saturating_sub(self.grammar_errors.saturating_mul(3))
    }

    pub fn alignment_percent(&self) -> f64 {
        self.comparison.alignment_percent()
    }

    /// The `VERDICT:` line as written in the judgment, or the canonical line
    /// for the parsed verdict.
    pub fn verdict_line(&self) -> String {
        Verdict::find_line(&self.judgment)
            .map(str::to_string)
            .unwrap_or_else(|| self.verdict.line())
    }

    /// Judgment paragraphs with the verdict line removed.
    pub fn judgment_paragraphs(&self) -> Vec<String> {
        let body: Vec<&str> = self
            .judgment
            .lines()
            .filter(|line| !line.contains(VERDICT_MARKER))
            .collect();
        body.join("\n")
            .split("\n\n")
            .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|p| !p.is_empty())
            .collect()
    }

    pub fn summary(&self) -> AssessmentSummary {
        AssessmentSummary {
            verdict: self.verdict,
            verdict_line: self.verdict_line(),
            transcript_chars: self.transcript.chars().count(),
            grammar_errors: self.grammar_errors,
            grammar_accuracy: self.grammar_accuracy(),
            alignment_percent: self.alignment_percent().round() as u32,
            transcript_entities: self.transcript_entities.iter().cloned().collect(),
            matched: self.comparison.matched.iter().cloned().collect(),
            unmentioned: self.comparison.unmentioned.iter().cloned().collect(),
            judgment: self.judgment.clone(),
        }
    }
}

/// Machine-readable digest of a run, written next to the PDF on request.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentSummary {
    pub verdict: Verdict,
    pub verdict_line: String,
    pub transcript_chars: usize,
    pub grammar_errors: u32,
    pub grammar_accuracy: u32,
    pub alignment_percent: u32,
    pub transcript_entities: Vec<Entity>,
    pub matched: Vec<Entity>,
    pub unmentioned: Vec<Entity>,
    pub judgment: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn snapshot(errors: u32, judgment: &str) -> AnalysisSnapshot {
        let comparison = ComparisonResult {
            matched: [Entity::new("Python", "SKILL")].into_iter().collect(),
            unmentioned: [Entity::new("Java", "SKILL"), Entity::new("SQL", "SKILL")]
                .into_iter()
                .collect(),
        };
        AnalysisSnapshot::new(
            "I like Python".to_string(),
            errors,
            comparison.matched.clone(),
            comparison,
            judgment.to_string(),
        )
    }

    #[rstest]
    #[case(0, 100)]
    #[case(2, 94)]
    #[case(33, 1)]
    #[case(34, 0)]
    #[case(u32::MAX, 0)]
    fn test_grammar_accuracy(#[case] errors: u32, #[case] expected: u32) {
        assert_eq!(snapshot(errors, "VERDICT: MAYBE").grammar_accuracy(), expected);
    }

    #[test]
    fn test_verdict_derived_once_from_judgment() {
        let snap = snapshot(2, "Promising.\n\nVERDICT: REJECT");
        assert_eq!(snap.verdict(), Verdict::Reject);
        assert_eq!(snap.verdict_line(), "VERDICT: REJECT");
    }

    #[test]
    fn test_judgment_paragraphs_drop_verdict() {
        let snap = snapshot(2, "First point\nstill first.\n\nSecond point.\n\nVERDICT: HIRE");
        assert_eq!(
            snap.judgment_paragraphs(),
            vec!["First point still first.", "Second point."]
        );
    }

    #[test]
    fn test_summary_serializes() {
        let summary = snapshot(2, "VERDICT: MAYBE").summary();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["verdict"], "REVIEW");
        assert_eq!(json["alignment_percent"], 33);
        assert_eq!(json["grammar_accuracy"], 94);
        assert_eq!(json["matched"][0]["text"], "Python");
        assert_eq!(json["unmentioned"].as_array().unwrap().len(), 2);
    }
}
