//! Application state and the command dispatch loop behind the prompt.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::args::Args;
use crate::config::TermConfig;
use crate::dispatch::{tokenize, InputMode};
use crate::effects::{EffectManager, DEFAULT_PARTY_SECS, DEFAULT_PULSE_FLASHES, DEFAULT_PULSE_SECS};
use crate::games::guess::{GuessGame, DEFAULT_MAX_ATTEMPTS};
use crate::games::rps::RpsGame;
use crate::games::{ActiveGame, GameOutcome};
use crate::history::{CommandHistory, RecallDown};
use crate::input::InputEvent;
use crate::output::{escape_markup, OutputLog};
use crate::prompt::PromptLine;
use crate::rain::MatrixRain;
use crate::registry::{CommandKind, CommandRegistry};
use crate::theme::{font_index_by_name, DisplayState, FONTS, THEMES};

const EMBLEM: &[&str] = &[
    r"  _ __   ___  ___  _ __  ",
    r" | '_ \ / _ \/ _ \| '_ \ ",
    r" | | | |  __/ (_) | | | |",
    r" |_| |_|\___|\___/|_| |_|",
];

/// Everything the UI thread owns: registry, history, prompt, log, display
/// state, rain, effects, and the active input mode.
pub(crate) struct App {
    pub registry: CommandRegistry,
    pub history: CommandHistory,
    pub prompt: PromptLine,
    pub output: OutputLog,
    pub display: DisplayState,
    pub rain: MatrixRain,
    pub effects: EffectManager,
    pub mode: InputMode,
    pub running: bool,
}

impl App {
    pub(crate) fn new(config: &TermConfig, cols: u16, rows: u16, rng: &mut impl Rng) -> Self {
        let display = DisplayState::new(config.initial_theme_index(), 0);
        let mut rain = MatrixRain::new(cols, rows, rng);
        if let Some(speed) = config.speed {
            rain.set_speed(speed);
        }
        let mut output = OutputLog::new();
        output.push_colored("👾 Welcome to neonterm.", display.accent);
        output.push("💡 Type 'help' to see what this terminal can do.");
        Self {
            registry: CommandRegistry::new(),
            history: CommandHistory::new(),
            prompt: PromptLine::new(),
            output,
            display,
            rain,
            effects: EffectManager::new(),
            mode: InputMode::Command,
            running: true,
        }
    }

    /// Route one semantic input event.
    pub(crate) fn handle_event(&mut self, event: InputEvent, now: Instant, rng: &mut impl Rng) {
        match event {
            InputEvent::Char(ch) => self.prompt.insert(ch),
            InputEvent::Backspace => self.prompt.backspace(),
            InputEvent::Enter => self.submit_line(now, rng),
            InputEvent::HistoryUp => {
                if let Some(entry) = self.history.recall_up() {
                    self.prompt.set(entry);
                }
            }
            InputEvent::HistoryDown => match self.history.recall_down() {
                RecallDown::Entry(entry) => self.prompt.set(&entry),
                RecallDown::Clear => self.prompt.clear(),
            },
            InputEvent::Resize(cols, rows) => self.rain.resize(cols, rows, rng),
            InputEvent::Exit => self.running = false,
        }
    }

    /// Advance animation state one frame.
    pub(crate) fn on_tick(&mut self, now: Instant, rng: &mut impl Rng) {
        self.rain.tick(self.display.font().glyphs, rng);
        self.effects
            .tick(now, &mut self.display, &mut self.output, rng);
    }

    /// Handle a submitted line: trim, clear the buffer, then either feed the
    /// active game or run the main dispatch sequence.
    fn submit_line(&mut self, now: Instant, rng: &mut impl Rng) {
        let raw = self.prompt.take();
        let line = raw.trim().to_string();
        if line.is_empty() {
            return;
        }

        if let InputMode::Game(game) = &mut self.mode {
            let outcome = game.handle_line(&line, &mut self.output, rng);
            if outcome == GameOutcome::Finished {
                self.mode.restore();
            }
            return;
        }

        self.history.push(line.clone());
        let (command, tokens) = tokenize(&line);
        self.output
            .push_colored(format!("$ {}", escape_markup(&line)), self.display.accent);

        let Some(entry) = self.registry.lookup(&command) else {
            self.output.push("❌ Command not found");
            return;
        };
        tracing::debug!(command = entry.name, "dispatching");
        self.run_command(entry.kind, &tokens, now, rng);
    }

    fn run_command(
        &mut self,
        kind: CommandKind,
        tokens: &[String],
        now: Instant,
        rng: &mut impl Rng,
    ) {
        let args = Args::new(tokens);
        match kind {
            CommandKind::About => {
                self.output.push(
                    "👾 Hello traveler! This is neonterm, a tiny rain-soaked playground. Explore, play & enjoy.",
                );
            }
            CommandKind::Links => {
                self.output.push("🔗 Useful links:");
                self.output
                    .push("  GitHub   https://github.com/neonterm/neonterm");
                self.output
                    .push("  Issues   https://github.com/neonterm/neonterm/issues");
            }
            CommandKind::Help => match args.str_at(0) {
                Some(name) => {
                    let wanted = name.to_lowercase();
                    let described = self.registry.describe(&wanted);
                    self.output.push(described);
                }
                None => {
                    for line in self.registry.describe_all() {
                        self.output.push(line);
                    }
                }
            },
            CommandKind::Speed => match args.positive_f32(0) {
                Some(value) => {
                    self.rain.set_speed(value);
                    self.output.push(format!("⚡ Rain speed set to {value}"));
                }
                None => {
                    let sampled = self.rain.randomize_speeds(rng);
                    self.output
                        .push(format!("⚡ Rain speed randomized to {sampled:.2}"));
                }
            },
            CommandKind::Party => {
                let secs = args.positive_u64_or(0, DEFAULT_PARTY_SECS);
                self.effects.start_party(now, Duration::from_secs(secs));
                self.output
                    .push(format!("🎉 Party mode activated for {secs}s!"));
            }
            CommandKind::Pulse => {
                let secs = args.positive_u64_or(0, DEFAULT_PULSE_SECS);
                let flashes = args.positive_u64_or(1, DEFAULT_PULSE_FLASHES);
                self.effects
                    .start_pulse(now, Duration::from_secs(secs), flashes);
                self.output.push(format!(
                    "🔥 Neon pulse activated for {secs}s with {flashes} flashes!"
                ));
            }
            CommandKind::Hack => {
                self.output.push("💻 Hacking in progress...");
                self.effects.start_hack(now);
            }
            CommandKind::Troll => {
                self.effects.start_troll(now);
            }
            CommandKind::Sudo => {
                self.output
                    .push("🛑 Permission denied. Just kidding, you are now the overlord 😎");
            }
            CommandKind::Guess => {
                let max_attempts = args.positive_u64_or(0, DEFAULT_MAX_ATTEMPTS);
                let game = GuessGame::new(max_attempts, rng);
                game.announce(&mut self.output);
                self.mode.take_over(ActiveGame::Guess(game));
            }
            CommandKind::Rps => {
                let game = RpsGame::new();
                game.announce(&mut self.output);
                self.mode.take_over(ActiveGame::Rps(game));
            }
            CommandKind::Ping => {
                self.output.push("🏓 Pinging 192.168.0.1 with 4 packets...");
                self.effects.start_ping(now);
            }
            CommandKind::Font => {
                match args.str_at(0) {
                    // Unknown names keep the current font, like an unknown
                    // theme index keeps the current theme.
                    Some(name) => {
                        if let Some(index) = font_index_by_name(name) {
                            self.display.font_index = index;
                        }
                    }
                    None => {
                        self.display.font_index = (self.display.font_index + 1) % FONTS.len();
                    }
                }
                self.output.push(format!(
                    "🖋 Terminal font switched to {}",
                    self.display.font().name
                ));
            }
            CommandKind::Theme => {
                if args.is_empty() {
                    let next = (self.display.theme_index + 1) % THEMES.len();
                    self.display.apply_theme(next);
                } else {
                    // Out-of-range or unparsable index keeps the current
                    // theme, but still resets the accent.
                    let index = args
                        .one_based_index(0, THEMES.len())
                        .unwrap_or(self.display.theme_index);
                    self.display.apply_theme(index);
                }
                let theme = self.display.theme();
                self.output.push_colored(
                    format!(
                        "🎨 Theme changed to {}! Background: {}, Text: {}",
                        theme.name, theme.bg, theme.fg
                    ),
                    self.display.accent,
                );
            }
            CommandKind::Clear => {
                self.output.clear();
            }
            CommandKind::Emblem => {
                for row in EMBLEM {
                    self.output.push_bold(*row, self.display.accent);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app() -> (App, StdRng, Instant) {
        let config = TermConfig::parse_from(["neonterm"]);
        let mut rng = StdRng::seed_from_u64(11);
        let app = App::new(&config, 80, 24, &mut rng);
        (app, rng, Instant::now())
    }

    fn submit(app: &mut App, line: &str, now: Instant, rng: &mut StdRng) {
        for ch in line.chars() {
            app.handle_event(InputEvent::Char(ch), now, rng);
        }
        app.handle_event(InputEvent::Enter, now, rng);
    }

    #[test]
    fn empty_or_whitespace_lines_record_nothing_and_keep_the_mode() {
        let (mut app, mut rng, now) = app();
        let lines_before = app.output.len();
        submit(&mut app, "", now, &mut rng);
        submit(&mut app, "   ", now, &mut rng);
        assert!(app.history.is_empty());
        assert!(app.mode.is_command());
        assert_eq!(app.output.len(), lines_before);
    }

    #[test]
    fn unknown_command_is_echoed_then_flagged() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "warp 9", now, &mut rng);
        assert!(app.output.contains("$ warp 9"));
        assert_eq!(app.output.last_text().as_deref(), Some("❌ Command not found"));
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn echo_escapes_angle_brackets_literally() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "<script>", now, &mut rng);
        assert!(app.output.contains("$ &lt;script&gt;"));
        assert!(!app.output.contains("$ <script>"));
    }

    #[test]
    fn theme_three_switches_to_the_third_palette_with_confirmation() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "theme 3", now, &mut rng);
        assert_eq!(app.display.theme_index, 2);
        assert_eq!(app.display.accent, THEMES[2].fg_color());
        assert!(app.output.contains("Theme changed to Aqua Matrix"));
    }

    #[test]
    fn theme_without_args_cycles_and_out_of_range_keeps_current() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "theme", now, &mut rng);
        assert_eq!(app.display.theme_index, 1);
        submit(&mut app, "theme 99", now, &mut rng);
        assert_eq!(app.display.theme_index, 1);
        assert!(app.output.contains("Theme changed to Neon Pink"));
    }

    #[test]
    fn guess_with_three_failures_reveals_the_target_and_restores_dispatch() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "guess 3", now, &mut rng);
        assert!(!app.mode.is_command());
        assert!(app.output.contains("Max attempts: 3"));

        // 101 is above the 1-100 target range, so every guess misses high.
        for _ in 0..3 {
            submit(&mut app, "101", now, &mut rng);
        }
        assert!(app.output.contains("💀 Game over! Number was"));
        assert!(app.mode.is_command());

        // Dispatch works again immediately.
        submit(&mut app, "about", now, &mut rng);
        assert!(app.output.contains("Hello traveler"));
    }

    #[test]
    fn game_input_is_not_recorded_in_history_or_echoed() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "rps", now, &mut rng);
        assert_eq!(app.history.len(), 1);
        submit(&mut app, "rock", now, &mut rng);
        assert_eq!(app.history.len(), 1, "game lines must not enter history");
        assert!(!app.output.contains("$ rock"));
    }

    #[test]
    fn rps_resolves_in_one_line_and_returns_control_immediately() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "rps", now, &mut rng);
        let before = app.output.len();
        submit(&mut app, "rock", now, &mut rng);
        assert_eq!(app.output.len(), before + 1);
        let line = app.output.last_text().unwrap();
        assert!(line.contains("You chose rock"));
        assert!(line.contains("computer chose"));
        assert!(app.mode.is_command());
    }

    #[test]
    fn exit_sentinel_escapes_a_guessing_game() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "guess", now, &mut rng);
        submit(&mut app, "exit", now, &mut rng);
        assert!(app.mode.is_command());
        assert!(app.output.contains("Exiting game"));
    }

    #[test]
    fn help_lists_every_command_with_header_and_hint() {
        let (mut app, mut rng, now) = app();
        let before = app.output.len();
        submit(&mut app, "help", now, &mut rng);
        // Echo + header + 16 entries + hint.
        assert_eq!(app.output.len(), before + 1 + 1 + 16 + 1);
        assert!(app.output.contains("Available commands"));
        assert!(app.output.contains("help <command>"));
    }

    #[test]
    fn help_with_name_describes_one_command_case_insensitively() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "help THEME", now, &mut rng);
        assert!(app.output.contains("theme [1-12] - Changes background/text colors."));
        submit(&mut app, "help nonsense", now, &mut rng);
        assert!(app.output.contains("❌ Command 'nonsense' not found."));
    }

    #[test]
    fn clear_empties_the_log() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "about", now, &mut rng);
        submit(&mut app, "clear", now, &mut rng);
        assert!(app.output.is_empty());
    }

    #[test]
    fn speed_with_value_pins_and_without_randomizes() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "speed 2.5", now, &mut rng);
        assert!(app.output.contains("⚡ Rain speed set to 2.5"));
        submit(&mut app, "speed nope", now, &mut rng);
        assert!(app.output.contains("⚡ Rain speed randomized to"));
    }

    #[test]
    fn party_and_pulse_report_their_resolved_parameters() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "party", now, &mut rng);
        assert!(app.output.contains("Party mode activated for 3s!"));
        submit(&mut app, "pulse 4 6", now, &mut rng);
        assert!(app.output.contains("Neon pulse activated for 4s with 6 flashes!"));
        assert_eq!(app.effects.active_count(), 2);
    }

    #[test]
    fn hack_finishes_with_a_completion_line_after_enough_ticks() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "hack", now, &mut rng);
        assert!(app.output.contains("Hacking in progress"));
        app.on_tick(now + Duration::from_secs(10), &mut rng);
        assert!(app.output.contains("✅ Hacking complete!"));
        assert!(app.effects.is_idle());
    }

    #[test]
    fn ping_runs_to_its_summary() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "ping", now, &mut rng);
        app.on_tick(now + Duration::from_secs(5), &mut rng);
        assert!(app.output.contains("Lost = 0 (0% loss)"));
        assert!(app.effects.is_idle());
    }

    #[test]
    fn font_cycles_and_selects_by_name() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "font", now, &mut rng);
        assert_eq!(app.display.font_index, 1);
        assert!(app.output.contains("Terminal font switched to Lucida Console"));
        submit(&mut app, "font consolas", now, &mut rng);
        assert_eq!(app.display.font_index, 2);
        // Unknown names keep the current selection but still confirm.
        submit(&mut app, "font papyrus", now, &mut rng);
        assert_eq!(app.display.font_index, 2);
        assert!(app.output.contains("Terminal font switched to Consolas"));
    }

    #[test]
    fn history_recall_edits_the_prompt_without_dispatching() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "about", now, &mut rng);
        submit(&mut app, "sudo", now, &mut rng);
        let lines_after_commands = app.output.len();

        app.handle_event(InputEvent::HistoryUp, now, &mut rng);
        assert_eq!(app.prompt.as_str(), "sudo");
        app.handle_event(InputEvent::HistoryUp, now, &mut rng);
        assert_eq!(app.prompt.as_str(), "about");
        app.handle_event(InputEvent::HistoryUp, now, &mut rng);
        assert_eq!(app.prompt.as_str(), "about", "recall floors at the oldest entry");

        app.handle_event(InputEvent::HistoryDown, now, &mut rng);
        assert_eq!(app.prompt.as_str(), "sudo");
        app.handle_event(InputEvent::HistoryDown, now, &mut rng);
        assert!(app.prompt.is_empty(), "past the newest entry the buffer clears");
        assert_eq!(app.output.len(), lines_after_commands, "recall never dispatches");
    }

    #[test]
    fn emblem_appends_the_art_block() {
        let (mut app, mut rng, now) = app();
        let before = app.output.len();
        submit(&mut app, "emblem", now, &mut rng);
        assert_eq!(app.output.len(), before + 1 + EMBLEM.len());
    }

    #[test]
    fn resize_rebuilds_the_rain_grid() {
        let (mut app, mut rng, now) = app();
        app.handle_event(InputEvent::Resize(100, 40), now, &mut rng);
        assert_eq!(app.rain.column_count(), 100);
    }

    #[test]
    fn exit_event_stops_the_app() {
        let (mut app, mut rng, now) = app();
        app.handle_event(InputEvent::Exit, now, &mut rng);
        assert!(!app.running);
    }

    #[test]
    fn sudo_prints_the_joke() {
        let (mut app, mut rng, now) = app();
        submit(&mut app, "sudo", now, &mut rng);
        assert!(app.output.contains("you are now the overlord"));
    }
}
