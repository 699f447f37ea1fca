//! Page geometry, the vertical layout cursor and the greedy word wrapper.

/// Letter size in layout units (points).
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

pub const MARGIN_LEFT: f32 = 40.0;
pub const MARGIN_RIGHT: f32 = 40.0;
/// Baseline of the first line on a fresh page.
pub const TOP_Y: f32 = PAGE_HEIGHT - 40.0;
/// Nothing but the footer is drawn below this line.
pub const BOTTOM_MARGIN: f32 = 50.0;

pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

/// Approximate glyph width as a fraction of the font size. Deliberately a
/// flat estimate rather than real font metrics.
pub const CHAR_WIDTH_FACTOR: f32 = 0.5;
/// Hard cap on characters per drawn line, guarding against estimate error.
pub const MAX_LINE_CHARS: usize = 110;
/// Extra leading added to the font size between wrapped lines.
pub const LINE_GAP: f32 = 3.0;

/// Current writing position of a report being laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    y: f32,
    page_index: usize,
}

impl LayoutCursor {
    pub fn new() -> Self {
        Self {
            y: TOP_Y,
            page_index: 0,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    pub fn next_page(&mut self) {
        self.page_index += 1;
        self.y = TOP_Y;
    }

    /// Vertical space left above the bottom margin.
    pub fn remaining(&self) -> f32 {
        self.y - BOTTOM_MARGIN
    }
}

impl Default for LayoutCursor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn estimated_line_width(chars: usize, font_size: f32) -> f32 {
    chars as f32 * font_size * CHAR_WIDTH_FACTOR
}

/// Greedy word wrap.
///
/// Words are added to the current line while the estimated width stays
/// strictly below `available_width` and the line stays within
/// [`MAX_LINE_CHARS`]. A word that does not fit on an empty line gets a line
/// of its own, cut to [`MAX_LINE_CHARS`] characters.
pub fn wrap_lines(text: &str, font_size: f32, available_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate_chars = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };

        if candidate_chars <= MAX_LINE_CHARS
            && estimated_line_width(candidate_chars, font_size) < available_width
        {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        } else {
            if !line.is_empty() {
                lines.push(truncate_chars(&line, MAX_LINE_CHARS));
            }
            line = word.to_string();
        }
    }

    if !line.is_empty() {
        lines.push(truncate_chars(&line, MAX_LINE_CHARS));
    }
    lines
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
