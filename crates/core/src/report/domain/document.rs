/// RGB colour with components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    /// Titles and section rules.
    pub const ACCENT: Rgb = Rgb::new(0.2, 0.4, 0.7);
    pub const GREEN: Rgb = Rgb::new(0.2, 0.8, 0.2);
    pub const RED: Rgb = Rgb::new(0.9, 0.2, 0.2);
    pub const AMBER: Rgb = Rgb::new(0.9, 0.7, 0.1);
    pub const GRAY: Rgb = Rgb::new(0.6, 0.6, 0.6);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// One drawing primitive in page coordinates (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its baseline starting at `(x, y)`.
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        text: String,
    },
    /// Filled rectangle with lower-left corner at `(x, y)`.
    FilledRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
}

impl DrawOp {
    /// Lowest y coordinate touched by the operation.
    pub fn min_y(&self) -> f32 {
        match self {
            DrawOp::Text { y, .. } => *y,
            DrawOp::FilledRect { y, .. } => *y,
            DrawOp::Line { y1, y2, .. } => y1.min(*y2),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Body content, always above the bottom margin.
    pub ops: Vec<DrawOp>,
    /// Content placed inside the bottom margin.
    pub footer: Vec<DrawOp>,
}

impl Page {
    pub fn all_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().chain(self.footer.iter())
    }
}

/// A laid-out report, independent of any output format.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub width: f32,
    pub height: f32,
    pub pages: Vec<Page>,
}

impl ReportDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text run in drawing order, across all pages.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.all_ops())
            .filter_map(DrawOp::text)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Colours of every filled rectangle, in drawing order.
    pub fn fill_colors(&self) -> Vec<Rgb> {
        self.pages
            .iter()
            .flat_map(|p| p.all_ops())
            .filter_map(|op| match op {
                DrawOp::FilledRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }
}

/// Restricts text to what the standard PDF fonts can show.
///
/// Typographic punctuation is mapped to ASCII; anything else outside
/// printable ASCII becomes `?`.
pub fn sanitize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2022}' => out.push('*'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\t' => out.push(' '),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c if c.is_whitespace() => out.push(' '),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain text", "plain text")]
    #[case("It\u{2019}s \u{201C}fine\u{201D}", "It's \"fine\"")]
    #[case("a \u{2014} b", "a - b")]
    #[case("wait\u{2026}", "wait...")]
    #[case("caf\u{e9} \u{2713}", "caf? ?")]
    #[case("tab\there", "tab here")]
    fn test_sanitize_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_text(input), expected);
    }

    #[test]
    fn test_min_y() {
        let line = DrawOp::Line {
            x1: 0.0,
            y1: 100.0,
            x2: 10.0,
            y2: 90.0,
            width: 1.0,
            color: Rgb::BLACK,
        };
        assert_eq!(line.min_y(), 90.0);
    }

    #[test]
    fn test_document_queries() {
        let doc = ReportDocument {
            width: 612.0,
            height: 792.0,
            pages: vec![Page {
                ops: vec![
                    DrawOp::FilledRect {
                        x: 0.0,
                        y: 0.0,
                        width: 1.0,
                        height: 1.0,
                        color: Rgb::GREEN,
                    },
                    DrawOp::Text {
                        x: 0.0,
                        y: 0.0,
                        size: 10.0,
                        weight: FontWeight::Regular,
                        color: Rgb::BLACK,
                        text: "hello world".to_string(),
                    },
                ],
                footer: vec![],
            }],
        };
        assert!(doc.contains_text("world"));
        assert!(!doc.contains_text("absent"));
        assert_eq!(doc.fill_colors(), vec![Rgb::GREEN]);
        assert_eq!(doc.page_count(), 1);
    }
}
