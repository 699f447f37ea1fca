use serde::Serialize;

/// One coaching point for the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImprovementItem {
    pub area: String,
    pub current_state: String,
    pub action: String,
}

impl ImprovementItem {
    fn new(area: &str, current_state: String, action: &str) -> Self {
        Self {
            area: area.to_string(),
            current_state,
            action: action.to_string(),
        }
    }
}

/// Builds the improvement list from the same counts the verdict uses.
///
/// Items are appended in a fixed order as their thresholds are crossed; the
/// confidence item is always last.
pub fn improvement_items(grammar_errors: u32, matched: usize, unmentioned: usize) -> Vec<ImprovementItem> {
    let total = matched + unmentioned;
    let mut items = Vec::new();

    if grammar_errors > 5 {
        items.push(ImprovementItem::new(
            "Communication Polish",
            format!("{grammar_errors} grammar/language errors found"),
            "Practice speaking clearly and slowly. Record yourself and review. \
             Consider English language training. Focus on professional vocabulary.",
        ));
    }

    if matched < unmentioned {
        items.push(ImprovementItem::new(
            "Experience Discussion",
            format!("Only {matched}/{total} key skills discussed"),
            "Prepare specific examples from your CV. Use STAR method (Situation, Task, \
             Action, Result). Highlight ALL relevant achievements.",
        ));
    }

    if matched > 0 && matched < 3 {
        items.push(ImprovementItem::new(
            "Technical Knowledge",
            format!("Limited technical skills discussed ({matched})"),
            "Study the job description thoroughly. Prepare technical project examples. \
             Practice explaining concepts clearly.",
        ));
    }

    if grammar_errors == 0 {
        items.push(ImprovementItem::new(
            "Communication Excellence",
            "No grammar errors".to_string(),
            "Maintain this high standard! Your clarity is a key strength.",
        ));
    }

    items.push(ImprovementItem::new(
        "Confidence & Presence",
        "Overall interview presence".to_string(),
        "Make more eye contact. Speak with conviction. Use confident body language. \
         Prepare thoroughly for all questions.",
    ));

    items
}
