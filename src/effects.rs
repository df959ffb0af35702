//! Deadline-driven screen effects: each one owns its iteration budget and
//! cancels itself, so overlapping effects race on the accent last-write-wins.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::style::Color;

use crate::output::OutputLog;
use crate::theme::DisplayState;

pub(crate) const DEFAULT_PARTY_SECS: u64 = 3;
pub(crate) const DEFAULT_PULSE_SECS: u64 = 2;
pub(crate) const DEFAULT_PULSE_FLASHES: u64 = 3;

const PARTY_TICK: Duration = Duration::from_millis(100);
const HACK_STEPS: u32 = 30;
const HACK_STEP_MIN_MS: u64 = 80;
const HACK_STEP_MAX_MS: u64 = 150;
const TROLL_LINES: u32 = 20;
const TROLL_TICK: Duration = Duration::from_millis(50);
const PING_PACKETS: usize = 4;
const PING_SEND_MIN_MS: u64 = 300;
const PING_SEND_MAX_MS: u64 = 500;

const GLITCH_CHARS: &str = "█▓▒░<>!?@#$%^&* ";

/// Colors party mode and pulse flashes cycle through.
const PARTY_PALETTE: &[Color] = &[
    Color::Rgb(255, 0, 255),
    Color::Rgb(0, 255, 255),
    Color::Rgb(255, 255, 0),
    Color::Rgb(0, 255, 153),
];

/// Colors the hack flicker and troll lines draw from.
const FLICKER_PALETTE: &[Color] = &[
    Color::Rgb(255, 0, 255),
    Color::Rgb(0, 255, 255),
    Color::Rgb(255, 255, 0),
    Color::Rgb(255, 0, 0),
    Color::Rgb(0, 255, 0),
];

#[derive(Debug, Clone)]
enum Effect {
    Party {
        until: Instant,
        next_tick: Instant,
    },
    Pulse {
        flashes_left: u64,
        interval: Duration,
        next_flash: Instant,
        overlay_off_at: Option<Instant>,
        finish_at: Option<Instant>,
    },
    Hack {
        steps_left: u32,
        next_step: Instant,
    },
    Troll {
        lines_left: u32,
        next_line: Instant,
    },
    Ping {
        latencies: Vec<u64>,
        next_send: Instant,
    },
}

/// Active timed effects, stepped from the main loop's animation tick.
///
/// There is deliberately no external cancellation: an effect ends only when
/// its own budget is exhausted. Switching themes mid-effect resets the accent
/// out from under it, and the effect's final restore overwrites that again.
#[derive(Debug, Default)]
pub(crate) struct EffectManager {
    active: Vec<Effect>,
}

impl EffectManager {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    pub(crate) fn active_count(&self) -> usize {
        self.active.len()
    }

    pub(crate) fn start_party(&mut self, now: Instant, duration: Duration) {
        self.active.push(Effect::Party {
            until: now + duration,
            next_tick: now + PARTY_TICK,
        });
    }

    pub(crate) fn start_pulse(&mut self, now: Instant, duration: Duration, flashes: u64) {
        let flashes = flashes.max(1);
        let interval = duration / u32::try_from(flashes).unwrap_or(u32::MAX).max(1);
        self.active.push(Effect::Pulse {
            flashes_left: flashes,
            interval,
            next_flash: now + interval,
            overlay_off_at: None,
            finish_at: None,
        });
    }

    pub(crate) fn start_hack(&mut self, now: Instant) {
        self.active.push(Effect::Hack {
            steps_left: HACK_STEPS,
            next_step: now,
        });
    }

    pub(crate) fn start_troll(&mut self, now: Instant) {
        self.active.push(Effect::Troll {
            lines_left: TROLL_LINES,
            next_line: now + TROLL_TICK,
        });
    }

    pub(crate) fn start_ping(&mut self, now: Instant) {
        self.active.push(Effect::Ping {
            latencies: Vec::with_capacity(PING_PACKETS),
            next_send: now,
        });
    }

    /// Advance every active effect to `now`, dropping the finished ones.
    pub(crate) fn tick(
        &mut self,
        now: Instant,
        state: &mut DisplayState,
        out: &mut OutputLog,
        rng: &mut impl Rng,
    ) {
        let active = std::mem::take(&mut self.active);
        self.active = active
            .into_iter()
            .filter_map(|effect| step_effect(effect, now, state, out, rng))
            .collect();
    }
}

fn step_effect(
    effect: Effect,
    now: Instant,
    state: &mut DisplayState,
    out: &mut OutputLog,
    rng: &mut impl Rng,
) -> Option<Effect> {
    match effect {
        Effect::Party {
            until,
            mut next_tick,
        } => {
            while next_tick <= now && next_tick < until {
                if let Some(color) = PARTY_PALETTE.choose(rng) {
                    state.accent = *color;
                }
                next_tick += PARTY_TICK;
            }
            if now >= until {
                state.reset_accent();
                return None;
            }
            Some(Effect::Party { until, next_tick })
        }
        Effect::Pulse {
            mut flashes_left,
            interval,
            mut next_flash,
            mut overlay_off_at,
            mut finish_at,
        } => {
            if let Some(off_at) = overlay_off_at {
                if off_at <= now {
                    state.overlay = None;
                    overlay_off_at = None;
                }
            }
            while flashes_left > 0 && next_flash <= now {
                if let Some(color) = PARTY_PALETTE.choose(rng) {
                    state.overlay = Some(*color);
                    state.accent = *color;
                }
                overlay_off_at = Some(next_flash + interval / 2);
                flashes_left -= 1;
                if flashes_left == 0 {
                    finish_at = Some(next_flash + interval);
                } else {
                    next_flash += interval;
                }
            }
            if let Some(done_at) = finish_at {
                if done_at <= now {
                    state.overlay = None;
                    state.reset_accent();
                    return None;
                }
            }
            Some(Effect::Pulse {
                flashes_left,
                interval,
                next_flash,
                overlay_off_at,
                finish_at,
            })
        }
        Effect::Hack {
            mut steps_left,
            mut next_step,
        } => {
            while steps_left > 0 && next_step <= now {
                if let Some(color) = FLICKER_PALETTE.choose(rng) {
                    state.accent = *color;
                }
                state.shake = (rng.gen_range(-2..=2), rng.gen_range(-1..=1));
                steps_left -= 1;
                next_step += Duration::from_millis(rng.gen_range(HACK_STEP_MIN_MS..HACK_STEP_MAX_MS));
            }
            if steps_left == 0 {
                state.reset_accent();
                state.shake = (0, 0);
                out.push("✅ Hacking complete!");
                return None;
            }
            Some(Effect::Hack {
                steps_left,
                next_step,
            })
        }
        Effect::Troll {
            mut lines_left,
            mut next_line,
        } => {
            let glitch_chars: Vec<char> = GLITCH_CHARS.chars().collect();
            while lines_left > 0 && next_line <= now {
                let length = 20 + rng.gen_range(0..40);
                let glitch: String = (0..length)
                    .filter_map(|_| glitch_chars.choose(rng).copied())
                    .collect();
                let color = FLICKER_PALETTE.choose(rng).copied().unwrap_or(Color::Magenta);
                out.push_bold(glitch, color);
                lines_left -= 1;
                next_line += TROLL_TICK;
            }
            if lines_left == 0 {
                out.push_bold("Glitch effect complete!", Color::Rgb(255, 0, 255));
                return None;
            }
            Some(Effect::Troll {
                lines_left,
                next_line,
            })
        }
        Effect::Ping {
            mut latencies,
            mut next_send,
        } => {
            while latencies.len() < PING_PACKETS && next_send <= now {
                let latency = rng.gen_range(10..110);
                out.push(format!(
                    "Reply from 192.168.0.1: bytes=32 time={latency}ms TTL=64"
                ));
                latencies.push(latency);
                next_send += Duration::from_millis(rng.gen_range(PING_SEND_MIN_MS..PING_SEND_MAX_MS));
            }
            if latencies.len() == PING_PACKETS {
                let min = latencies.iter().min().copied().unwrap_or(0);
                let max = latencies.iter().max().copied().unwrap_or(0);
                let avg = latencies.iter().sum::<u64>() as f64 / latencies.len() as f64;
                out.push(format!(
                    "Ping complete. Packets: Sent = {PING_PACKETS}, Received = {PING_PACKETS}, Lost = 0 (0% loss)"
                ));
                out.push(format!(
                    "Approximate round trip times: Min = {min}ms, Max = {max}ms, Avg = {avg:.2}ms"
                ));
                return None;
            }
            Some(Effect::Ping {
                latencies,
                next_send,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    fn fixture() -> (DisplayState, OutputLog, EffectManager, Instant) {
        (
            DisplayState::new(0, 0),
            OutputLog::new(),
            EffectManager::new(),
            Instant::now(),
        )
    }

    #[test]
    fn party_recolors_accent_then_restores_the_theme_accent() {
        let (mut state, mut out, mut fx, start) = fixture();
        let theme_accent = state.accent;
        fx.start_party(start, Duration::from_secs(3));

        fx.tick(start + Duration::from_millis(500), &mut state, &mut out, &mut rng());
        assert!(PARTY_PALETTE.contains(&state.accent));
        assert!(!fx.is_idle());

        fx.tick(start + Duration::from_secs(4), &mut state, &mut out, &mut rng());
        assert!(fx.is_idle());
        assert_eq!(state.accent, theme_accent);
        assert!(out.is_empty());
    }

    #[test]
    fn hack_shakes_then_reports_completion_exactly_once() {
        let (mut state, mut out, mut fx, start) = fixture();
        fx.start_hack(start);

        fx.tick(start + Duration::from_millis(200), &mut state, &mut out, &mut rng());
        assert!(FLICKER_PALETTE.contains(&state.accent));
        assert!(!fx.is_idle());

        fx.tick(start + Duration::from_secs(10), &mut state, &mut out, &mut rng());
        assert!(fx.is_idle());
        assert_eq!(state.shake, (0, 0));
        assert_eq!(state.accent, state.theme().fg_color());
        assert_eq!(out.len(), 1);
        assert_eq!(out.last_text().as_deref(), Some("✅ Hacking complete!"));
    }

    #[test]
    fn troll_emits_twenty_glitch_lines_plus_a_footer() {
        let (mut state, mut out, mut fx, start) = fixture();
        fx.start_troll(start);
        fx.tick(start + Duration::from_secs(2), &mut state, &mut out, &mut rng());
        assert!(fx.is_idle());
        assert_eq!(out.len(), 21);
        assert_eq!(out.last_text().as_deref(), Some("Glitch effect complete!"));
    }

    #[test]
    fn ping_emits_four_replies_then_a_two_line_summary() {
        let (mut state, mut out, mut fx, start) = fixture();
        fx.start_ping(start);
        fx.tick(start + Duration::from_secs(5), &mut state, &mut out, &mut rng());
        assert!(fx.is_idle());
        assert_eq!(out.len(), PING_PACKETS + 2);
        assert!(out.contains("Reply from 192.168.0.1"));
        assert!(out.contains("Lost = 0 (0% loss)"));
        assert!(out.contains("Approximate round trip times"));
    }

    #[test]
    fn pulse_lights_the_overlay_then_clears_it_and_restores() {
        let (mut state, mut out, mut fx, start) = fixture();
        let theme_accent = state.accent;
        fx.start_pulse(start, Duration::from_secs(2), 3);

        // First flash fires one interval in (2s / 3 flashes ≈ 666ms).
        fx.tick(start + Duration::from_millis(700), &mut state, &mut out, &mut rng());
        assert!(state.overlay.is_some());
        assert!(PARTY_PALETTE.contains(&state.accent));

        fx.tick(start + Duration::from_secs(5), &mut state, &mut out, &mut rng());
        assert!(fx.is_idle());
        assert_eq!(state.overlay, None);
        assert_eq!(state.accent, theme_accent);
    }

    #[test]
    fn overlapping_accent_writers_end_with_the_theme_accent() {
        let (mut state, mut out, mut fx, start) = fixture();
        let theme_accent = state.accent;
        fx.start_party(start, Duration::from_secs(1));
        fx.start_hack(start);
        assert_eq!(fx.active_count(), 2);

        fx.tick(start + Duration::from_millis(400), &mut state, &mut out, &mut rng());
        fx.tick(start + Duration::from_secs(10), &mut state, &mut out, &mut rng());
        assert!(fx.is_idle());
        assert_eq!(state.accent, theme_accent);
    }

    #[test]
    fn effects_cannot_be_cancelled_externally_only_exhausted() {
        let (mut state, mut out, mut fx, start) = fixture();
        fx.start_party(start, Duration::from_secs(3));
        // Theme switch mid-party rewrites the accent...
        fx.tick(start + Duration::from_millis(300), &mut state, &mut out, &mut rng());
        state.apply_theme(4);
        // ...but the party keeps ticking and overwrites it right back.
        fx.tick(start + Duration::from_millis(600), &mut state, &mut out, &mut rng());
        assert!(PARTY_PALETTE.contains(&state.accent));
        // Once exhausted it restores the accent of the *new* theme.
        fx.tick(start + Duration::from_secs(4), &mut state, &mut out, &mut rng());
        assert_eq!(state.accent, crate::theme::THEMES[4].fg_color());
    }
}
