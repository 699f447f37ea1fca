use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Label attached to an extracted entity.
///
/// The common labels are enumerated; anything an extractor produces outside
/// of them is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Date,
    Skill,
    Product,
    Language,
    Education,
    Other(String),
}

impl EntityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Organization => "ORG",
            EntityLabel::Location => "GPE",
            EntityLabel::Date => "DATE",
            EntityLabel::Skill => "SKILL",
            EntityLabel::Product => "PRODUCT",
            EntityLabel::Language => "LANGUAGE",
            EntityLabel::Education => "EDUCATION",
            EntityLabel::Other(label) => label,
        }
    }
}

impl From<&str> for EntityLabel {
    fn from(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "PERSON" => EntityLabel::Person,
            "ORG" | "ORGANIZATION" => EntityLabel::Organization,
            "GPE" | "LOC" | "LOCATION" => EntityLabel::Location,
            "DATE" => EntityLabel::Date,
            "SKILL" => EntityLabel::Skill,
            "PRODUCT" => EntityLabel::Product,
            "LANGUAGE" => EntityLabel::Language,
            "EDUCATION" => EntityLabel::Education,
            other => EntityLabel::Other(other.to_string()),
        }
    }
}

impl From<String> for EntityLabel {
    fn from(label: String) -> Self {
        EntityLabel::from(label.as_str())
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named entity: surface text plus label. Two entities are the same
/// entity only if both parts are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<EntityLabel>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.label)
    }
}

/// Ordered so that reports and summaries list entities deterministically.
pub type EntitySet = BTreeSet<Entity>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_duplicates_collapse_in_set() {
        let mut set = EntitySet::new();
        set.insert(Entity::new("Python", "SKILL"));
        set.insert(Entity::new("Python", "SKILL"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_text_different_label_are_distinct() {
        let mut set = EntitySet::new();
        set.insert(Entity::new("Java", "SKILL"));
        set.insert(Entity::new("Java", "GPE"));
        assert_eq!(set.len(), 2);
    }

    #[rstest]
    #[case("ORG", EntityLabel::Organization)]
    #[case("org", EntityLabel::Organization)]
    #[case("GPE", EntityLabel::Location)]
    #[case(" skill ", EntityLabel::Skill)]
    #[case("NORP", EntityLabel::Other("NORP".to_string()))]
    fn test_label_parsing(#[case] raw: &str, #[case] expected: EntityLabel) {
        assert_eq!(EntityLabel::from(raw), expected);
    }

    #[test]
    fn test_label_serializes_as_string() {
        let entity = Entity::new("Rust", EntityLabel::Skill);
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"text":"Rust","label":"SKILL"}"#);
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entity);
    }

    #[test]
    fn test_display() {
        assert_eq!(Entity::new("Acme", "ORG").to_string(), "Acme (ORG)");
    }
}
