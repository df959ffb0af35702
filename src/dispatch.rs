//! Input-mode machine and line tokenizing for the command dispatcher.
//!
//! The browser original swapped raw keyboard handlers to hand input to a
//! mini-game and trusted the game to swap them back. Here the mode is a typed
//! value: games can only start from `Command` mode, restoring is setting the
//! mode back, and doing so twice is a harmless no-op.

use crate::games::ActiveGame;

/// Who currently interprets submitted lines.
#[derive(Debug, Default)]
pub(crate) enum InputMode {
    /// Lines are tokenized and dispatched through the command registry.
    #[default]
    Command,
    /// A mini-game consumes lines until it reports completion.
    Game(ActiveGame),
}

impl InputMode {
    pub(crate) fn is_command(&self) -> bool {
        matches!(self, InputMode::Command)
    }

    /// Hand line input to a game. Only honored from command mode.
    pub(crate) fn take_over(&mut self, game: ActiveGame) {
        if self.is_command() {
            *self = InputMode::Game(game);
        }
    }

    /// Return line input to command dispatch. Idempotent.
    pub(crate) fn restore(&mut self) {
        *self = InputMode::Command;
    }
}

/// Split a submitted line into the lower-cased command name and its verbatim
/// argument tokens. Arguments containing spaces cannot be expressed; there is
/// no quoting or escaping.
pub(crate) fn tokenize(line: &str) -> (String, Vec<String>) {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default().to_lowercase();
    let args = parts.map(str::to_string).collect();
    (command, args)
}
