//! Number-guessing game: captures lines until the target is found, the
//! attempt budget runs out, or the player types the exit sentinel.

use rand::Rng;

use crate::output::OutputLog;

use super::GameOutcome;

pub(crate) const DEFAULT_MAX_ATTEMPTS: u64 = 7;
const TARGET_MIN: u64 = 1;
const TARGET_MAX: u64 = 100;

#[derive(Debug, Clone)]
pub(crate) struct GuessGame {
    target: u64,
    attempts: u64,
    max_attempts: u64,
}

impl GuessGame {
    pub(crate) fn new(max_attempts: u64, rng: &mut impl Rng) -> Self {
        Self::with_target(max_attempts, rng.gen_range(TARGET_MIN..=TARGET_MAX))
    }

    pub(crate) fn with_target(max_attempts: u64, target: u64) -> Self {
        Self {
            target,
            attempts: 0,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Intro line emitted when the game starts.
    pub(crate) fn announce(&self, out: &mut OutputLog) {
        out.push(format!(
            "🎯 Guess a number between {TARGET_MIN}-{TARGET_MAX}. Max attempts: {}. Type 'exit' to quit.",
            self.max_attempts
        ));
    }

    pub(crate) fn handle_line(&mut self, line: &str, out: &mut OutputLog) -> GameOutcome {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            out.push("🛑 Exiting game...");
            return GameOutcome::Finished;
        }
        let Ok(guess) = trimmed.parse::<u64>() else {
            // Non-numeric input is silently ignored, not an error.
            return GameOutcome::Continue;
        };

        self.attempts += 1;
        if guess < self.target {
            out.push(format!(
                "⬇️ Too low! Attempts {}/{}",
                self.attempts, self.max_attempts
            ));
        } else if guess > self.target {
            out.push(format!(
                "⬆️ Too high! Attempts {}/{}",
                self.attempts, self.max_attempts
            ));
        } else {
            out.push(format!(
                "🎉 Correct! The number was {}. Guessed in {} attempts.",
                self.target, self.attempts
            ));
            return GameOutcome::Finished;
        }

        if self.attempts >= self.max_attempts {
            out.push(format!("💀 Game over! Number was {}.", self.target));
            return GameOutcome::Finished;
        }
        GameOutcome::Continue
    }
}
