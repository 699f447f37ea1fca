use super::verdict::Verdict;

/// More grammar errors than this rejects outright.
pub const REJECT_GRAMMAR_ERRORS: u32 = 15;
/// A hire needs fewer grammar errors than this...
pub const HIRE_MAX_GRAMMAR_ERRORS: u32 = 5;
/// ...and at least this many CV entities discussed.
pub const HIRE_MIN_MATCHED: usize = 3;

/// How well the candidate communicated, banded by grammar error count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunicationBand {
    Excellent,
    Good,
    Average,
    Poor,
}

impl CommunicationBand {
    pub fn from_errors(grammar_errors: u32) -> Self {
        match grammar_errors {
            0..=2 => CommunicationBand::Excellent,
            3..=7 => CommunicationBand::Good,
            8..=11 => CommunicationBand::Average,
            _ => CommunicationBand::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CommunicationBand::Excellent => "excellent",
            CommunicationBand::Good => "good",
            CommunicationBand::Average => "average",
            CommunicationBand::Poor => "poor",
        }
    }

    pub fn assessment(self, grammar_errors: u32) -> String {
        match self {
            CommunicationBand::Excellent => "EXCELLENT - Outstanding communication with minimal errors. \
                Speech is clear, professional, and well-articulated."
                .to_string(),
            CommunicationBand::Good => format!(
                "GOOD - Generally clear communication with {grammar_errors} minor errors. \
                 Ideas expressed well but could be more polished."
            ),
            CommunicationBand::Average => format!(
                "AVERAGE - Communication present but {grammar_errors} language errors detected. \
                 Needs professional language improvement."
            ),
            CommunicationBand::Poor => format!(
                "POOR - Multiple ({grammar_errors}) language errors affecting clarity. \
                 Significant improvement needed."
            ),
        }
    }
}

/// How much of the CV the candidate covered in the interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentBand {
    Excellent,
    Good,
    Concerning,
}

impl AlignmentBand {
    pub fn from_counts(matched: usize, total: usize) -> Self {
        let ratio = alignment_ratio(matched, total);
        if ratio > 0.75 {
            AlignmentBand::Excellent
        } else if ratio > 0.5 {
            AlignmentBand::Good
        } else {
            AlignmentBand::Concerning
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlignmentBand::Excellent => "excellent",
            AlignmentBand::Good => "good",
            AlignmentBand::Concerning => "concerning",
        }
    }

    pub fn assessment(self, matched: usize, unmentioned: usize) -> String {
        let total = matched + unmentioned;
        match self {
            AlignmentBand::Excellent => format!(
                "EXCELLENT - Candidate discussed {matched} key skills. \
                 Strong awareness of relevant experience with minimal CV gaps."
            ),
            AlignmentBand::Good => format!(
                "GOOD - {matched} skills discussed. However, {unmentioned} important \
                 CV experiences were not mentioned."
            ),
            AlignmentBand::Concerning => format!(
                "CONCERNING - Only {matched} of {total} CV skills mentioned. \
                 Major experience gaps need clarification."
            ),
        }
    }
}

/// Technical confidence, banded by the number of CV entities discussed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechnicalBand {
    Strong,
    Adequate,
    Limited,
}

impl TechnicalBand {
    pub fn from_matched(matched: usize) -> Self {
        match matched {
            0..=1 => TechnicalBand::Limited,
            2..=3 => TechnicalBand::Adequate,
            _ => TechnicalBand::Strong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TechnicalBand::Strong => "strong",
            TechnicalBand::Adequate => "adequate",
            TechnicalBand::Limited => "limited",
        }
    }

    pub fn assessment(self) -> &'static str {
        match self {
            TechnicalBand::Strong => {
                "STRONG - Demonstrated strong technical knowledge with specific examples. \
                 Shows confidence and domain expertise."
            }
            TechnicalBand::Adequate => {
                "ADEQUATE - Adequate technical knowledge shown but limited detail. \
                 Some hesitation noted."
            }
            TechnicalBand::Limited => {
                "LIMITED - Limited technical depth. Seemed uncertain about key competencies."
            }
        }
    }
}

/// matched / max(total, 1)
pub fn alignment_ratio(matched: usize, total: usize) -> f64 {
    matched as f64 / total.max(1) as f64
}

/// The two-rule decision. Grammar short-circuits first.
pub fn decide(grammar_errors: u32, matched: usize) -> Verdict {
    if grammar_errors > REJECT_GRAMMAR_ERRORS {
        Verdict::Reject
    } else if grammar_errors < HIRE_MAX_GRAMMAR_ERRORS && matched >= HIRE_MIN_MATCHED {
        Verdict::Hire
    } else {
        Verdict::Review
    }
}

/// Deterministic verdict and narrative from the raw counts.
///
/// The narrative bands are descriptive only and may read more or less
/// favourably than the verdict itself.
pub fn heuristic_verdict(grammar_errors: u32, matched: usize, total: usize) -> (Verdict, String) {
    let verdict = decide(grammar_errors, matched);
    let communication = CommunicationBand::from_errors(grammar_errors);
    let alignment = AlignmentBand::from_counts(matched, total);
    let technical = TechnicalBand::from_matched(matched);
    let percent = alignment_ratio(matched, total) * 100.0;

    let narrative = format!(
        "Communication was {} with {grammar_errors} grammar {} detected. \
         Experience alignment is {}: {matched} of {total} CV entities were discussed ({percent:.0}%). \
         Technical confidence appears {}.",
        communication.label(),
        if grammar_errors == 1 { "issue" } else { "issues" },
        alignment.label(),
        technical.label(),
    );
    (verdict, narrative)
}
