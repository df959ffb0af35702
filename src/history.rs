//! Submitted-line history with arrow-key recall, independent of dispatch.

/// What an ArrowDown recall wants done with the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecallDown {
    /// Replace the buffer with this entry.
    Entry(String),
    /// Past the newest entry: clear the buffer.
    Clear,
}

/// Append-only history of raw submitted lines plus a recall cursor.
///
/// The cursor is distinct from dispatch: it only moves on arrow-key recall and
/// snaps to "one past the end" every time a new line is recorded.
#[derive(Debug, Default, Clone)]
pub(crate) struct CommandHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl CommandHistory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line and reset the recall cursor past the end.
    pub(crate) fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = self.entries.len();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recall one entry back. `None` means the buffer should stay untouched
    /// (empty history, or already at the oldest entry).
    pub(crate) fn recall_up(&mut self) -> Option<&str> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Recall one entry forward, or clear the buffer once past the newest.
    pub(crate) fn recall_down(&mut self) -> RecallDown {
        if !self.entries.is_empty() && self.cursor < self.entries.len() - 1 {
            self.cursor += 1;
            RecallDown::Entry(self.entries[self.cursor].clone())
        } else {
            self.cursor = self.entries.len();
            RecallDown::Clear
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn recall_up_on_empty_history_is_a_no_op() {
        let mut history = CommandHistory::new();
        assert_eq!(history.recall_up(), None);
        assert_eq!(history.recall_down(), RecallDown::Clear);
    }

    #[test]
    fn recall_up_walks_back_and_floors_at_oldest() {
        let mut history = CommandHistory::new();
        history.push("first");
        history.push("second");
        assert_eq!(history.recall_up(), Some("second"));
        assert_eq!(history.recall_up(), Some("first"));
        assert_eq!(history.recall_up(), None);
        assert_eq!(history.recall_up(), None);
    }

    #[test]
    fn recall_down_replays_forward_then_clears() {
        let mut history = CommandHistory::new();
        history.push("first");
        history.push("second");
        history.recall_up();
        history.recall_up();
        assert_eq!(
            history.recall_down(),
            RecallDown::Entry("second".to_string())
        );
        assert_eq!(history.recall_down(), RecallDown::Clear);
        // Cursor is back past the end; another down stays cleared.
        assert_eq!(history.recall_down(), RecallDown::Clear);
    }

    #[test]
    fn push_resets_cursor_past_the_end() {
        let mut history = CommandHistory::new();
        history.push("first");
        history.recall_up();
        history.push("second");
        assert_eq!(history.recall_up(), Some("second"));
    }

    proptest! {
        #[test]
        fn n_ups_recall_in_reverse_chronological_order(
            lines in proptest::collection::vec("[a-z]{1,8}", 1..12)
        ) {
            let mut history = CommandHistory::new();
            for line in &lines {
                history.push(line.clone());
            }
            prop_assert_eq!(history.len(), lines.len());

            for expected in lines.iter().rev() {
                prop_assert_eq!(history.recall_up(), Some(expected.as_str()));
            }
            prop_assert_eq!(history.recall_up(), None);

            // Replay forward lands on a cleared buffer after the newest entry.
            for expected in lines.iter().skip(1) {
                prop_assert_eq!(
                    history.recall_down(),
                    RecallDown::Entry(expected.clone())
                );
            }
            prop_assert_eq!(history.recall_down(), RecallDown::Clear);
        }
    }
}
