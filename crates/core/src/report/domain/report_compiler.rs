use crate::judgment::domain::improvement_plan::improvement_items;
use crate::judgment::domain::verdict::Verdict;
use crate::judgment::domain::verdict_heuristic::{AlignmentBand, CommunicationBand, TechnicalBand};
use crate::shared::analysis_snapshot::AnalysisSnapshot;

use super::document::{sanitize_text, DrawOp, FontWeight, Page, ReportDocument, Rgb};
use super::layout::{
    wrap_lines, LayoutCursor, BOTTOM_MARGIN, CONTENT_WIDTH, LINE_GAP, MARGIN_LEFT, PAGE_HEIGHT,
    PAGE_WIDTH,
};
use super::recommendations::{banner_color, banner_label, next_steps, recommendations};
use super::report_header::ReportHeader;

pub const BANNER_HEIGHT: f32 = 25.0;
/// Banner plus the gap below it.
pub const BANNER_ADVANCE: f32 = 30.0;
pub const SECTION_HEADER_ADVANCE: f32 = 25.0;
const SECTION_RULE_OFFSET: f32 = 5.0;

/// Start the improvement section on a new page when the cursor is below this.
pub const IMPROVEMENT_SECTION_MIN_Y: f32 = 150.0;
/// Keep each improvement item's title, state and action together.
pub const IMPROVEMENT_ITEM_MIN_Y: f32 = 100.0;
/// Recommendations and next steps need this much of the page.
pub const RECOMMENDATIONS_MIN_Y: f32 = 200.0;

/// Body text x position for indented content.
const BODY_X: f32 = MARGIN_LEFT + 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageState {
    OnPage,
    /// The cursor went past the bottom margin; the next write opens a page.
    BreakPending,
}

/// Lays out an assessment report page by page.
///
/// Owns the [`LayoutCursor`] for one document. Every write checks the
/// cursor first, so no body content is ever placed below
/// [`BOTTOM_MARGIN`]. [`ReportCompiler::finish`] consumes the compiler.
pub struct ReportCompiler {
    header: ReportHeader,
    pages: Vec<Page>,
    cursor: LayoutCursor,
    state: PageState,
}

impl ReportCompiler {
    pub fn new(header: ReportHeader) -> Self {
        Self {
            header,
            pages: vec![Page::default()],
            cursor: LayoutCursor::new(),
            state: PageState::OnPage,
        }
    }

    /// Lays out the complete report for `snapshot`.
    pub fn compile(mut self, snapshot: &AnalysisSnapshot) -> ReportDocument {
        let verdict = snapshot.verdict();
        self.render_title();
        self.render_verdict_banner(verdict);
        self.render_quick_stats(snapshot);
        self.render_detailed_assessment(snapshot);
        self.render_assessor_notes(snapshot);
        self.render_improvement_areas(snapshot);
        self.render_recommendations(verdict);
        self.render_next_steps(verdict);
        self.render_footer();
        self.finish()
    }

    pub fn cursor(&self) -> &LayoutCursor {
        &self.cursor
    }

    pub fn finish(self) -> ReportDocument {
        log::debug!("Report laid out on {} pages", self.pages.len());
        ReportDocument {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            pages: self.pages,
        }
    }

    // ─── Pagination ───

    pub fn page_break(&mut self) {
        self.pages.push(Page::default());
        self.cursor.next_page();
        self.state = PageState::OnPage;
    }

    /// Breaks the page unless `extent` units fit above the bottom margin.
    fn ensure_room(&mut self, extent: f32) {
        if self.state == PageState::BreakPending || self.cursor.y() - extent < BOTTOM_MARGIN {
            self.page_break();
        }
    }

    /// Section preamble: breaks the page when the cursor is below `min_y`.
    fn require_min_y(&mut self, min_y: f32) {
        if self.state == PageState::BreakPending || self.cursor.y() < min_y {
            self.page_break();
        }
    }

    fn advance(&mut self, dy: f32) {
        self.cursor.advance(dy);
        if self.cursor.y() < BOTTOM_MARGIN {
            self.state = PageState::BreakPending;
        }
    }

    fn push(&mut self, op: DrawOp) {
        let index = self.cursor.page_index();
        self.pages[index].ops.push(op);
    }

    fn push_text(&mut self, x: f32, y: f32, text: &str, size: f32, weight: FontWeight, color: Rgb) {
        self.push(DrawOp::Text {
            x,
            y,
            size,
            weight,
            color,
            text: sanitize_text(text),
        });
    }

    // ─── Primitives ───

    /// Writes one line at the cursor and moves down by `advance`.
    pub fn draw_text_line(&mut self, x: f32, text: &str, size: f32, weight: FontWeight, advance: f32) {
        self.ensure_room(0.0);
        let y = self.cursor.y();
        self.push_text(x, y, text, size, weight, Rgb::BLACK);
        self.advance(advance);
    }

    /// Full-width coloured box with a bold white label.
    pub fn draw_banner(&mut self, text: &str, color: Rgb) {
        self.ensure_room(BANNER_HEIGHT);
        let y = self.cursor.y();
        self.push(DrawOp::FilledRect {
            x: MARGIN_LEFT,
            y: y - BANNER_HEIGHT,
            width: CONTENT_WIDTH,
            height: BANNER_HEIGHT,
            color,
        });
        self.push_text(BODY_X, y - 18.0, text, 12.0, FontWeight::Bold, Rgb::WHITE);
        self.advance(BANNER_ADVANCE);
    }

    /// Bold accent title over an accent rule.
    pub fn draw_section_header(&mut self, title: &str) {
        self.ensure_room(SECTION_RULE_OFFSET);
        let y = self.cursor.y();
        self.push_text(MARGIN_LEFT, y, title, 14.0, FontWeight::Bold, Rgb::ACCENT);
        self.push(DrawOp::Line {
            x1: MARGIN_LEFT,
            y1: y - SECTION_RULE_OFFSET,
            x2: PAGE_WIDTH - MARGIN_LEFT,
            y2: y - SECTION_RULE_OFFSET,
            width: 2.0,
            color: Rgb::ACCENT,
        });
        self.advance(SECTION_HEADER_ADVANCE);
    }

    /// Word-wraps `text` into the content width minus `indent`, breaking
    /// pages between lines as needed.
    pub fn wrap_paragraph(&mut self, text: &str, font_size: f32, indent: f32) {
        let x = MARGIN_LEFT + indent;
        let available = CONTENT_WIDTH - indent;
        for line in wrap_lines(&sanitize_text(text), font_size, available) {
            self.ensure_room(0.0);
            let y = self.cursor.y();
            self.push_text(x, y, &line, font_size, FontWeight::Regular, Rgb::BLACK);
            self.advance(font_size + LINE_GAP);
        }
    }

    // ─── Sections ───

    pub fn render_title(&mut self) {
        self.ensure_room(10.0);
        let y = self.cursor.y();
        self.push_text(MARGIN_LEFT, y, "INTERVIEW ASSESSMENT", 24.0, FontWeight::Bold, Rgb::ACCENT);
        self.push(DrawOp::Line {
            x1: MARGIN_LEFT,
            y1: y - 10.0,
            x2: PAGE_WIDTH - MARGIN_LEFT,
            y2: y - 10.0,
            width: 3.0,
            color: Rgb::ACCENT,
        });
        self.advance(35.0);

        let candidate = self.header.candidate_line();
        let date = self.header.date_line();
        self.draw_text_line(MARGIN_LEFT, &candidate, 10.0, FontWeight::Regular, 15.0);
        self.draw_text_line(MARGIN_LEFT, &date, 10.0, FontWeight::Regular, 30.0);
    }

    pub fn render_verdict_banner(&mut self, verdict: Verdict) {
        self.draw_banner(banner_label(verdict), banner_color(verdict));
        self.advance(10.0);
    }

    pub fn render_quick_stats(&mut self, snapshot: &AnalysisSnapshot) {
        let comparison = snapshot.comparison();
        self.draw_section_header("QUICK STATS");

        let lines = [
            format!("- Grammar Accuracy: {}%", snapshot.grammar_accuracy()),
            format!(
                "- Skills Discussed: {} out of {} ({:.0}%)",
                comparison.matched_count(),
                comparison.total(),
                snapshot.alignment_percent()
            ),
            format!(
                "- Total Entities Identified: {}",
                snapshot.transcript_entities().len()
            ),
            format!("- Grammar Errors Found: {}", snapshot.grammar_errors()),
        ];
        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            let advance = if i == last { 25.0 } else { 15.0 };
            self.draw_text_line(BODY_X, line, 10.0, FontWeight::Regular, advance);
        }
    }

    pub fn render_detailed_assessment(&mut self, snapshot: &AnalysisSnapshot) {
        let errors = snapshot.grammar_errors();
        let matched = snapshot.comparison().matched_count();
        let unmentioned = snapshot.comparison().unmentioned_count();

        self.draw_section_header("DETAILED ASSESSMENT");

        let sections = [
            (
                "1. COMMUNICATION & LANGUAGE SKILLS",
                CommunicationBand::from_errors(errors).assessment(errors),
            ),
            (
                "2. EXPERIENCE & SKILL ALIGNMENT",
                AlignmentBand::from_counts(matched, matched + unmentioned)
                    .assessment(matched, unmentioned),
            ),
            (
                "3. TECHNICAL KNOWLEDGE & CONFIDENCE",
                TechnicalBand::from_matched(matched).assessment().to_string(),
            ),
        ];
        let last = sections.len() - 1;
        for (i, (title, body)) in sections.iter().enumerate() {
            self.draw_text_line(BODY_X, title, 11.0, FontWeight::Bold, 15.0);
            self.wrap_paragraph(body, 9.0, 20.0);
            self.advance(if i == last { 20.0 } else { 10.0 });
        }
    }

    /// The qualitative judgment text, without its verdict line.
    pub fn render_assessor_notes(&mut self, snapshot: &AnalysisSnapshot) {
        let paragraphs = snapshot.judgment_paragraphs();
        if paragraphs.is_empty() {
            return;
        }
        self.draw_section_header("ASSESSOR NOTES");
        for paragraph in &paragraphs {
            self.wrap_paragraph(paragraph, 9.0, 10.0);
            self.advance(6.0);
        }
        self.advance(14.0);
    }

    pub fn render_improvement_areas(&mut self, snapshot: &AnalysisSnapshot) {
        let items = improvement_items(
            snapshot.grammar_errors(),
            snapshot.comparison().matched_count(),
            snapshot.comparison().unmentioned_count(),
        );

        self.require_min_y(IMPROVEMENT_SECTION_MIN_Y);
        self.draw_section_header("AREAS FOR IMPROVEMENT");
        self.advance(10.0);

        for (i, item) in items.iter().enumerate() {
            self.require_min_y(IMPROVEMENT_ITEM_MIN_Y);
            let title = format!("{}. {}", i + 1, item.area);
            let current = format!("Current: {}", item.current_state);
            self.draw_text_line(BODY_X, &title, 10.0, FontWeight::Bold, 12.0);
            self.draw_text_line(BODY_X + 10.0, &current, 9.0, FontWeight::Regular, 10.0);
            self.wrap_paragraph(&format!("Action: {}", item.action), 9.0, 30.0);
            self.advance(8.0);
        }
    }

    pub fn render_recommendations(&mut self, verdict: Verdict) {
        self.require_min_y(RECOMMENDATIONS_MIN_Y);
        self.draw_section_header("HR RECOMMENDATIONS");
        self.advance(10.0);
        for rec in recommendations(verdict) {
            self.wrap_paragraph(rec, 10.0, 0.0);
            self.advance(5.0);
        }
        self.advance(10.0);
    }

    pub fn render_next_steps(&mut self, verdict: Verdict) {
        self.draw_section_header("NEXT STEPS");
        self.advance(10.0);
        for step in next_steps(verdict) {
            self.wrap_paragraph(step, 9.0, 15.0);
        }
    }

    /// Confidentiality notice and assessment id inside the bottom margin of
    /// the current page.
    pub fn render_footer(&mut self) {
        let id_line = format!("Assessment ID: {}", self.header.assessment_id());
        let index = self.cursor.page_index();
        let footer = &mut self.pages[index].footer;
        for (y, text) in [(25.0, "CONFIDENTIAL - For HR Use Only"), (15.0, id_line.as_str())] {
            footer.push(DrawOp::Text {
                x: MARGIN_LEFT,
                y,
                size: 7.0,
                weight: FontWeight::Regular,
                color: Rgb::GRAY,
                text: text.to_string(),
            });
        }
    }
}
