//! Append-only output log with auto-scroll, shared by dispatch and effects.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Escape `<` and `>` in echoed input. This is the whole escaping policy:
/// other characters pass through untouched.
pub(crate) fn escape_markup(raw: &str) -> String {
    raw.replace('<', "&lt;").replace('>', "&gt;")
}

/// Scrolling output region. Lines only ever get appended or wiped wholesale.
#[derive(Debug, Default, Clone)]
pub(crate) struct OutputLog {
    lines: Vec<Line<'static>>,
}

impl OutputLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append an unstyled line.
    pub(crate) fn push(&mut self, text: impl Into<String>) {
        self.lines.push(Line::from(text.into()));
    }

    /// Append a line rendered in a single color.
    pub(crate) fn push_colored(&mut self, text: impl Into<String>, color: Color) {
        self.lines.push(Line::from(Span::styled(
            text.into(),
            Style::default().fg(color),
        )));
    }

    /// Append a bold line rendered in a single color.
    pub(crate) fn push_bold(&mut self, text: impl Into<String>, color: Color) {
        self.lines.push(Line::from(Span::styled(
            text.into(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    /// Last appended line as plain text, mostly for assertions.
    pub(crate) fn last_text(&self) -> Option<String> {
        self.lines.last().map(line_text)
    }

    /// Whether any line's plain text contains `needle`.
    pub(crate) fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line_text(line).contains(needle))
    }

    /// Vertical scroll that keeps the newest line visible in `visible_rows`.
    pub(crate) fn scroll_offset(&self, visible_rows: u16) -> u16 {
        let total = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        total.saturating_sub(visible_rows)
    }
}

pub(crate) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
