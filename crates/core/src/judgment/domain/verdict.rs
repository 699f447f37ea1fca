use std::fmt;

use serde::Serialize;

/// Prefix of the line that carries the final decision in a judgment text.
pub const VERDICT_MARKER: &str = "VERDICT:";

const HIRE_NEGATIONS: &[&str] = &["NOT HIRE", "NO HIRE", "N'T HIRE"];

/// True when uppercased `text` says not to hire, e.g. "DO NOT HIRE".
pub fn negates_hire(upper: &str) -> bool {
    let collapsed = upper.split_whitespace().collect::<Vec<_>>().join(" ");
    HIRE_NEGATIONS.iter().any(|phrase| collapsed.contains(phrase))
}

/// Final hiring decision for one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Hire,
    Reject,
    Review,
}

impl Verdict {
    pub fn token(self) -> &'static str {
        match self {
            Verdict::Hire => "HIRE",
            Verdict::Reject => "REJECT",
            Verdict::Review => "REVIEW",
        }
    }

    /// The canonical `VERDICT: <TOKEN>` line.
    pub fn line(self) -> String {
        format!("{VERDICT_MARKER} {}", self.token())
    }

    /// Recognizes a verdict token in free text.
    ///
    /// REJECT wins over HIRE, so an echoed "HIRE / REJECT / MAYBE" template
    /// reads as a rejection, and so does a negated HIRE. MAYBE and REVIEW
    /// both map to `Review`.
    pub fn parse_token(text: &str) -> Option<Verdict> {
        let upper = text.to_uppercase();
        if upper.contains("REJECT") || negates_hire(&upper) {
            Some(Verdict::Reject)
        } else if upper.contains("HIRE") {
            Some(Verdict::Hire)
        } else if upper.contains("MAYBE") || upper.contains("REVIEW") {
            Some(Verdict::Review)
        } else {
            None
        }
    }

    /// Parses a single line of the form `... VERDICT: <token> ...`.
    pub fn parse_line(line: &str) -> Option<Verdict> {
        let (_, tail) = line.split_once(VERDICT_MARKER)?;
        Self::parse_token(tail)
    }

    /// First line of `text` that carries a recognizable verdict.
    pub fn find_line(text: &str) -> Option<&str> {
        text.lines()
            .find(|line| Self::parse_line(line).is_some())
            .map(str::trim)
    }

    /// Derives the verdict of a judgment text.
    ///
    /// Uses the verdict line when there is one; otherwise reads the whole
    /// text as a token, and anything unrecognized as `Review`.
    pub fn from_judgment(text: &str) -> Verdict {
        text.lines()
            .find_map(Self::parse_line)
            .or_else(|| Self::parse_token(text))
            .unwrap_or(Verdict::Review)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
