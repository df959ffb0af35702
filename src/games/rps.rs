//! Rock-paper-scissors: a single valid choice resolves the whole game.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::output::OutputLog;

use super::GameOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "rock" => Some(Choice::Rock),
            "paper" => Some(Choice::Paper),
            "scissors" => Some(Choice::Scissors),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }

    fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Paper, Choice::Rock)
                | (Choice::Scissors, Choice::Paper)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    Win,
    Lose,
    Tie,
}

pub(crate) fn verdict(user: Choice, computer: Choice) -> Verdict {
    if user == computer {
        Verdict::Tie
    } else if user.beats(computer) {
        Verdict::Win
    } else {
        Verdict::Lose
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RpsGame;

impl RpsGame {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn announce(&self, out: &mut OutputLog) {
        out.push("✂️ Rock-Paper-Scissors! Type rock, paper, or scissors:");
    }

    pub(crate) fn handle_line(
        &mut self,
        line: &str,
        out: &mut OutputLog,
        rng: &mut impl Rng,
    ) -> GameOutcome {
        if line.trim().eq_ignore_ascii_case("exit") {
            out.push("🛑 Exiting game...");
            return GameOutcome::Finished;
        }
        let Some(user) = Choice::parse(line) else {
            // Unrecognized words are ignored until a valid choice arrives.
            return GameOutcome::Continue;
        };
        let computer = Choice::ALL.choose(rng).copied().unwrap_or(Choice::Rock);
        let result = match verdict(user, computer) {
            Verdict::Tie => "It's a tie!",
            Verdict::Win => "✅ You win!",
            Verdict::Lose => "❌ You lose!",
        };
        out.push(format!(
            "You chose {}, computer chose {}. {result}",
            user.label(),
            computer.label()
        ));
        GameOutcome::Finished
    }
}
