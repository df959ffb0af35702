//! CLI configuration so startup flags and environment resolve consistently.

use anyhow::{bail, Result};
use clap::Parser;

use crate::theme::{theme_index_by_name, FONTS, THEMES};

pub(crate) const MIN_FPS: u32 = 5;
pub(crate) const MAX_FPS: u32 = 120;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "neonterm",
    version,
    about = "Matrix-rain fake terminal: commands, color effects, and mini-games"
)]
pub(crate) struct TermConfig {
    /// Starting theme: a 1-12 index or a name like "cyber-green".
    #[arg(long, env = "NEONTERM_THEME")]
    pub theme: Option<String>,

    /// Pin every rain column to this speed (rows per frame) instead of
    /// randomizing per column.
    #[arg(long)]
    pub speed: Option<f32>,

    /// Animation frame rate.
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Write debug logs to a file in the temp dir.
    #[arg(long)]
    pub logs: bool,

    /// Disable all file logging.
    #[arg(long, conflicts_with = "logs")]
    pub no_logs: bool,

    /// Print the theme table and exit.
    #[arg(long)]
    pub list_themes: bool,

    /// Print the font table and exit.
    #[arg(long)]
    pub list_fonts: bool,
}

impl TermConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            bail!("--fps must be between {MIN_FPS} and {MAX_FPS}");
        }
        if let Some(speed) = self.speed {
            if !speed.is_finite() || speed <= 0.0 {
                bail!("--speed must be a positive number");
            }
        }
        if let Some(ref theme) = self.theme {
            if resolve_theme_arg(theme).is_none() {
                bail!(
                    "unknown theme '{theme}'. Use 1-{} or one of: {}",
                    THEMES.len(),
                    theme_name_list()
                );
            }
        }
        Ok(())
    }

    /// Zero-based starting theme index; defaults to the first theme.
    pub(crate) fn initial_theme_index(&self) -> usize {
        self.theme
            .as_deref()
            .and_then(resolve_theme_arg)
            .unwrap_or(0)
    }
}

fn resolve_theme_arg(raw: &str) -> Option<usize> {
    if let Ok(number) = raw.trim().parse::<usize>() {
        return number.checked_sub(1).filter(|index| *index < THEMES.len());
    }
    theme_index_by_name(raw)
}

fn theme_name_list() -> String {
    THEMES
        .iter()
        .map(|theme| theme.name.to_lowercase().replace(' ', "-"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the theme table for `--list-themes`.
pub(crate) fn render_theme_listing() -> String {
    let mut listing = String::from("Available themes:\n");
    for (index, theme) in THEMES.iter().enumerate() {
        listing.push_str(&format!(
            "  {:>2}  {:<14} bg {} fg {}\n",
            index + 1,
            theme.name,
            theme.bg,
            theme.fg
        ));
    }
    listing
}

/// Render the font table for `--list-fonts`.
pub(crate) fn render_font_listing() -> String {
    let mut listing = String::from("Available fonts:\n");
    for font in FONTS {
        listing.push_str(&format!("  {}\n", font.name));
    }
    listing
}
