//! Editable prompt-line buffer for the single input control.

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Default, Clone)]
pub(crate) struct PromptLine {
    buffer: String,
}

impl PromptLine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.buffer
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Display width of the buffer in terminal cells.
    pub(crate) fn width(&self) -> u16 {
        u16::try_from(self.buffer.width()).unwrap_or(u16::MAX)
    }

    pub(crate) fn insert(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub(crate) fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Clear the buffer and hand back what was typed.
    pub(crate) fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    /// Replace the buffer (history recall).
    pub(crate) fn set(&mut self, text: &str) {
        self.buffer = text.to_string();
    }

    pub(crate) fn clear(&mut self) {
        self.buffer.clear();
    }
}
