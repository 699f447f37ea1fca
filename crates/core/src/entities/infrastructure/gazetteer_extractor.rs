use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::entities::domain::entity::{Entity, EntityLabel, EntitySet};
use crate::entities::domain::entity_extractor::EntityExtractor;

/// Technologies and qualifications recognized without any gazetteer file.
const BUILTIN_TERMS: &[(&str, &str)] = &[
    ("Python", "SKILL"),
    ("Java", "SKILL"),
    ("JavaScript", "SKILL"),
    ("TypeScript", "SKILL"),
    ("Rust", "SKILL"),
    ("Go", "SKILL"),
    ("C++", "SKILL"),
    ("C#", "SKILL"),
    ("Kotlin", "SKILL"),
    ("Swift", "SKILL"),
    ("Ruby", "SKILL"),
    ("PHP", "SKILL"),
    ("SQL", "SKILL"),
    ("PostgreSQL", "SKILL"),
    ("MySQL", "SKILL"),
    ("MongoDB", "SKILL"),
    ("Redis", "SKILL"),
    ("Kafka", "SKILL"),
    ("Docker", "SKILL"),
    ("Kubernetes", "SKILL"),
    ("Terraform", "SKILL"),
    ("Linux", "SKILL"),
    ("Git", "SKILL"),
    ("React", "SKILL"),
    ("Angular", "SKILL"),
    ("Node.js", "SKILL"),
    ("Django", "SKILL"),
    ("Flask", "SKILL"),
    ("Spring", "SKILL"),
    ("Machine Learning", "SKILL"),
    ("Deep Learning", "SKILL"),
    ("Data Analysis", "SKILL"),
    ("Project Management", "SKILL"),
    ("Agile", "SKILL"),
    ("Scrum", "SKILL"),
    ("REST", "SKILL"),
    ("GraphQL", "SKILL"),
    ("Microservices", "SKILL"),
    ("CI/CD", "SKILL"),
    ("AWS", "PRODUCT"),
    ("Azure", "PRODUCT"),
    ("Google Cloud", "PRODUCT"),
    ("Excel", "PRODUCT"),
    ("Tableau", "PRODUCT"),
    ("Salesforce", "PRODUCT"),
    ("Bachelor", "EDUCATION"),
    ("Master", "EDUCATION"),
    ("PhD", "EDUCATION"),
    ("MBA", "EDUCATION"),
];

/// Built-in terms that are also everyday English words. These only match in
/// their canonical casing, so "I excel under pressure" is not a skill.
const EXACT_CASE_TERMS: &[&str] = &[
    "Go", "Swift", "Ruby", "Rust", "Spring", "REST", "Agile", "React", "Flask", "Excel",
    "Master", "Bachelor",
];

/// One entry of a JSON gazetteer file.
#[derive(Debug, Clone, Deserialize)]
pub struct GazetteerEntry {
    pub text: String,
    pub label: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Match only the spelling given here, not any casing of it.
    #[serde(default)]
    pub exact_case: bool,
}

struct Term {
    tokens: Vec<String>,
    exact_case: bool,
    entity: Entity,
}

/// Dictionary-based entity extractor.
///
/// Matches are on whole tokens and case-insensitive, except for terms that
/// double as common words (see [`EXACT_CASE_TERMS`]) or entries marked
/// `exact_case`. Multi-word terms must appear as consecutive tokens. The
/// canonical spelling of the term is used as the entity text, so "python"
/// in a transcript and "Python" in a CV compare equal.
pub struct GazetteerExtractor {
    terms: Vec<Term>,
}

impl GazetteerExtractor {
    pub fn new() -> Self {
        let mut extractor = Self { terms: Vec::new() };
        for (text, label) in BUILTIN_TERMS {
            let exact_case = EXACT_CASE_TERMS.contains(text);
            extractor.add_term(text, exact_case, Entity::new(*text, *label));
        }
        extractor
    }

    /// An extractor that knows only the given entries.
    pub fn with_entries(entries: Vec<GazetteerEntry>) -> Self {
        let mut extractor = Self { terms: Vec::new() };
        extractor.extend(entries);
        extractor
    }

    /// Adds every entry of a JSON array of `{text, label, aliases}` objects.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read gazetteer {}: {e}", path.display()))?;
        let entries: Vec<GazetteerEntry> = serde_json::from_str(&raw)
            .map_err(|e| format!("Invalid gazetteer {}: {e}", path.display()))?;
        log::debug!("Loaded {} gazetteer entries from {}", entries.len(), path.display());
        self.extend(entries);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn extend(&mut self, entries: Vec<GazetteerEntry>) {
        for entry in entries {
            let entity = Entity::new(entry.text.trim(), EntityLabel::from(entry.label.as_str()));
            for alias in &entry.aliases {
                self.add_term(alias, entry.exact_case, entity.clone());
            }
            self.add_term(&entry.text, entry.exact_case, entity);
        }
    }

    fn add_term(&mut self, surface: &str, exact_case: bool, entity: Entity) {
        let tokens: Vec<String> = if exact_case {
            split_tokens(surface).into_iter().map(str::to_string).collect()
        } else {
            tokenize(surface)
        };
        if tokens.is_empty() {
            return;
        }
        self.terms.push(Term {
            tokens,
            exact_case,
            entity,
        });
    }
}

impl Default for GazetteerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor for GazetteerExtractor {
    fn extract(&self, text: &str) -> Result<EntitySet, Box<dyn std::error::Error>> {
        let exact = split_tokens(text);
        let folded = tokenize(text);
        let mut found = EntitySet::new();
        for term in &self.terms {
            let hit = if term.exact_case {
                contains_run(&exact, &term.tokens)
            } else {
                contains_run(&folded, &term.tokens)
            };
            if hit {
                found.insert(term.entity.clone());
            }
        }
        Ok(found)
    }
}

fn contains_run<T: AsRef<str>>(tokens: &[T], run: &[String]) -> bool {
    tokens
        .windows(run.len())
        .any(|window| window.iter().zip(run).all(|(a, b)| a.as_ref() == b))
}

/// Word tokens in their original casing. Keeps `+`, `#`, `/` and inner dots
/// so that terms like "C++", "C#", "CI/CD" and "Node.js" survive.
fn split_tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || ",;:!?()[]{}\"".contains(c))
        .map(|token| token.trim_matches(|c: char| c == '.' || c == '\'' || c == '-'))
        .map(|token| token.strip_suffix("'s").unwrap_or(token))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Lowercased [`split_tokens`].
fn tokenize(text: &str) -> Vec<String> {
    split_tokens(text).into_iter().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn texts(set: &EntitySet) -> Vec<&str> {
        set.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_builtin_terms_loaded() {
        let extractor = GazetteerExtractor::new();
        assert_eq!(extractor.len(), BUILTIN_TERMS.len());
    }

    #[test]
    fn test_extract_is_case_insensitive_and_canonical() {
        let extractor = GazetteerExtractor::new();
        let found = extractor
            .extract("I mostly wrote python and some sql at work.")
            .unwrap();
        assert!(found.contains(&Entity::new("Python", "SKILL")));
        assert!(found.contains(&Entity::new("SQL", "SKILL")));
    }

    #[test]
    fn test_extract_requires_whole_tokens() {
        let extractor = GazetteerExtractor::new();
        let found = extractor.extract("We went to Gothenburg for a javanese feast").unwrap();
        assert!(!texts(&found).contains(&"Go"));
        assert!(!texts(&found).contains(&"Java"));
    }

    #[rstest]
    #[case("I have used C++ daily", "C++")]
    #[case("Mostly C# on the backend", "C#")]
    #[case("We deployed with Node.js.", "Node.js")]
    #[case("I owned the CI/CD pipeline", "CI/CD")]
    #[case("Studied machine learning at university", "Machine Learning")]
    fn test_extract_special_terms(#[case] text: &str, #[case] expected: &str) {
        let extractor = GazetteerExtractor::new();
        let found = extractor.extract(text).unwrap();
        assert!(
            texts(&found).contains(&expected),
            "expected {expected} in {found:?}"
        );
    }

    #[test]
    fn test_extract_empty_text() {
        let extractor = GazetteerExtractor::new();
        assert!(extractor.extract("").unwrap().is_empty());
    }

    #[test]
    fn test_custom_entries_with_aliases() {
        let extractor = GazetteerExtractor::with_entries(vec![GazetteerEntry {
            text: "Acme Corporation".to_string(),
            label: "ORG".to_string(),
            aliases: vec!["Acme".to_string()],
            exact_case: false,
        }]);
        let found = extractor.extract("I spent three years at Acme.").unwrap();
        assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            vec![Entity::new("Acme Corporation", EntityLabel::Organization)]
        );
    }

    #[test]
    fn test_extend_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"text": "Kubeflow", "label": "SKILL"}}, {{"text": "Initech", "label": "ORG"}}]"#
        )
        .unwrap();

        let mut extractor = GazetteerExtractor::new();
        extractor.extend_from_file(file.path()).unwrap();
        let found = extractor.extract("At Initech we ran Kubeflow").unwrap();
        assert!(found.contains(&Entity::new("Initech", EntityLabel::Organization)));
        assert!(found.contains(&Entity::new("Kubeflow", EntityLabel::Skill)));
    }

    #[test]
    fn test_extend_from_invalid_file_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let mut extractor = GazetteerExtractor::new();
        let err = extractor.extend_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid gazetteer"));
    }

    #[test]
    fn test_common_words_are_not_skills() {
        let extractor = GazetteerExtractor::new();
        let found = extractor
            .extract(
                "I excel under pressure, I go the extra mile, I rest on weekends, \
                 every spring, and I want to master new things.",
            )
            .unwrap();
        assert!(found.is_empty(), "unexpected entities: {found:?}");
    }

    #[test]
    fn test_common_word_terms_match_canonical_casing() {
        let extractor = GazetteerExtractor::new();
        let found = extractor
            .extract("Go, Excel, REST, Spring. Master of Science.")
            .unwrap();
        assert_eq!(
            texts(&found),
            vec!["Excel", "Go", "Master", "REST", "Spring"]
        );
    }

    #[test]
    fn test_exact_case_gazetteer_entry() {
        let extractor = GazetteerExtractor::with_entries(vec![GazetteerEntry {
            text: "Dart".to_string(),
            label: "SKILL".to_string(),
            aliases: vec![],
            exact_case: true,
        }]);
        assert!(extractor.extract("we threw a dart").unwrap().is_empty());
        assert_eq!(texts(&extractor.extract("Flutter and Dart").unwrap()), vec!["Dart"]);
    }

    #[test]
    fn test_tokenize_strips_possessive_and_punctuation() {
        assert_eq!(
            tokenize("Google's team (Berlin), 'Rust'."),
            vec!["google", "team", "berlin", "rust"]
        );
    }
}
