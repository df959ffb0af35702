//! Mini-games that temporarily own line input via the game dispatch mode.

pub(crate) mod guess;
pub(crate) mod rps;

use rand::Rng;

use crate::output::OutputLog;
use guess::GuessGame;
use rps::RpsGame;

/// Whether a game wants to keep receiving lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameOutcome {
    Continue,
    Finished,
}

/// The game currently holding line input. Exactly one can be active, and only
/// from command mode, so takeover nesting is unrepresentable.
#[derive(Debug, Clone)]
pub(crate) enum ActiveGame {
    Guess(GuessGame),
    Rps(RpsGame),
}

impl ActiveGame {
    /// Feed one submitted line to the game. `Finished` hands input back to
    /// command dispatch.
    pub(crate) fn handle_line(
        &mut self,
        line: &str,
        out: &mut OutputLog,
        rng: &mut impl Rng,
    ) -> GameOutcome {
        match self {
            ActiveGame::Guess(game) => game.handle_line(line, out),
            ActiveGame::Rps(game) => game.handle_line(line, out, rng),
        }
    }
}
