use serde::Serialize;

use super::entity::EntitySet;

/// Outcome of comparing transcript entities with CV entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    /// Present in both the transcript and the CV.
    pub matched: EntitySet,
    /// Present in the CV but never mentioned in the interview.
    pub unmentioned: EntitySet,
}

impl ComparisonResult {
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn unmentioned_count(&self) -> usize {
        self.unmentioned.len()
    }

    /// Number of CV entities taken into account (matched + unmentioned).
    pub fn total(&self) -> usize {
        self.matched.len() + self.unmentioned.len()
    }

    /// Share of CV entities discussed in the interview, in percent.
    /// Zero when the CV yielded no entities.
    pub fn alignment_percent(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.matched.len() as f64 / self.total() as f64 * 100.0
    }
}

pub struct EntityComparator;

impl EntityComparator {
    pub fn compare(transcript_entities: &EntitySet, cv_entities: &EntitySet) -> ComparisonResult {
        let matched: EntitySet = transcript_entities
            .intersection(cv_entities)
            .cloned()
            .collect();
        let unmentioned = cv_entities.difference(&matched).cloned().collect();
        ComparisonResult {
            matched,
            unmentioned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::domain::entity::Entity;
    use approx::assert_relative_eq;

    fn set(items: &[(&str, &str)]) -> EntitySet {
        items
            .iter()
            .map(|(text, label)| Entity::new(*text, *label))
            .collect()
    }

    #[test]
    fn test_empty_inputs_give_empty_outputs() {
        let result = EntityComparator::compare(&EntitySet::new(), &EntitySet::new());
        assert!(result.matched.is_empty());
        assert!(result.unmentioned.is_empty());
        assert_eq!(result.alignment_percent(), 0.0);
    }

    #[test]
    fn test_matched_is_intersection_and_unmentioned_is_cv_only() {
        let transcript = set(&[("Python", "SKILL"), ("Berlin", "GPE")]);
        let cv = set(&[("Python", "SKILL"), ("Java", "SKILL"), ("SQL", "SKILL")]);
        let result = EntityComparator::compare(&transcript, &cv);

        assert_eq!(result.matched, set(&[("Python", "SKILL")]));
        assert_eq!(result.unmentioned, set(&[("Java", "SKILL"), ("SQL", "SKILL")]));
        assert_relative_eq!(result.alignment_percent(), 100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_label_mismatch_is_not_a_match() {
        let transcript = set(&[("Java", "GPE")]);
        let cv = set(&[("Java", "SKILL")]);
        let result = EntityComparator::compare(&transcript, &cv);
        assert!(result.matched.is_empty());
        assert_eq!(result.unmentioned.len(), 1);
    }

    #[test]
    fn test_matched_and_unmentioned_are_disjoint() {
        let transcript = set(&[("A", "ORG"), ("B", "ORG"), ("C", "SKILL")]);
        let cv = set(&[("B", "ORG"), ("C", "SKILL"), ("D", "SKILL"), ("E", "DATE")]);
        let result = EntityComparator::compare(&transcript, &cv);

        assert!(result.matched.is_disjoint(&result.unmentioned));
        assert!(result.matched.is_subset(&cv));
        assert!(result.matched.is_subset(&transcript));
        assert_eq!(result.total(), cv.len());
    }

    #[test]
    fn test_transcript_only_entities_are_ignored() {
        let transcript = set(&[("Rust", "SKILL"), ("Go", "SKILL")]);
        let cv = EntitySet::new();
        let result = EntityComparator::compare(&transcript, &cv);
        assert_eq!(result.total(), 0);
    }
}
