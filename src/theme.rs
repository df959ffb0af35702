//! Theme and font tables plus the shared display state every visual reads from.

use ratatui::style::Color;

/// A named background/foreground pairing for the whole UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ThemeDef {
    pub name: &'static str,
    pub bg: &'static str,
    pub fg: &'static str,
}

impl ThemeDef {
    pub(crate) fn bg_color(&self) -> Color {
        parse_hex_color(self.bg).unwrap_or(Color::Black)
    }

    pub(crate) fn fg_color(&self) -> Color {
        parse_hex_color(self.fg).unwrap_or(Color::Green)
    }
}

pub(crate) const THEMES: &[ThemeDef] = &[
    ThemeDef { name: "Cyber Green", bg: "#0a0a0a", fg: "#00ff99" },
    ThemeDef { name: "Neon Pink", bg: "#1b1b1b", fg: "#ff00ff" },
    ThemeDef { name: "Aqua Matrix", bg: "#000000", fg: "#00ffff" },
    ThemeDef { name: "Solar Yellow", bg: "#111111", fg: "#ffff00" },
    ThemeDef { name: "Acid Green", bg: "#001100", fg: "#7fff00" },
    ThemeDef { name: "Magenta Haze", bg: "#1a001a", fg: "#ff33ff" },
    ThemeDef { name: "Electric Blue", bg: "#000022", fg: "#33ccff" },
    ThemeDef { name: "Lava Orange", bg: "#220000", fg: "#ff5500" },
    ThemeDef { name: "Toxic Yellow", bg: "#111100", fg: "#ffff33" },
    ThemeDef { name: "Retro Purple", bg: "#0f0033", fg: "#cc99ff" },
    ThemeDef { name: "Neon Red", bg: "#220000", fg: "#ff4444" },
    ThemeDef { name: "Frost Cyan", bg: "#001111", fg: "#66ffff" },
];

/// A named glyph repertoire for the rain layer. Terminal cells cannot change
/// typeface, so each "font" selects the character set the rain draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FontDef {
    pub name: &'static str,
    pub glyphs: &'static str,
}

pub(crate) const FONTS: &[FontDef] = &[
    FontDef {
        name: "Courier New",
        glyphs: "アカサタナハマヤラワアイウエオ0123456789abcdefghijklmnopqrstuvwxyz",
    },
    FontDef {
        name: "Lucida Console",
        glyphs: "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
    },
    FontDef {
        name: "Consolas",
        glyphs: "█▓▒░<>/\\|{}[]()=+-*01",
    },
];

/// Parse a `#rrggbb` hex string into an RGB color.
pub(crate) fn parse_hex_color(hex: &str) -> Option<Color> {
    let raw = hex.strip_prefix('#')?;
    if raw.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&raw[0..2], 16).ok()?;
    let g = u8::from_str_radix(&raw[2..4], 16).ok()?;
    let b = u8::from_str_radix(&raw[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Linear blend between two RGB colors; non-RGB colors fall through to `over`.
pub(crate) fn blend(base: Color, over: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (base, over) {
        (Color::Rgb(br, bg, bb), Color::Rgb(or, og, ob)) => {
            let mix = |a: u8, b: u8| -> u8 {
                (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
            };
            Color::Rgb(mix(br, or), mix(bg, og), mix(bb, ob))
        }
        _ => over,
    }
}

/// Shared visual parameters read and written by the rain layer, the theme and
/// font switchers, and every timed effect. Last writer wins; the `App` is the
/// single owner and hands out `&mut` access.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DisplayState {
    /// Current rain/accent color. Effects scribble over this and restore the
    /// theme accent when their budget runs out.
    pub accent: Color,
    pub theme_index: usize,
    pub font_index: usize,
    /// Full-screen tint while a pulse flash is lit.
    pub overlay: Option<Color>,
    /// Cell offset applied to the rain layer while `hack` is shaking it.
    pub shake: (i16, i16),
}

impl DisplayState {
    pub(crate) fn new(theme_index: usize, font_index: usize) -> Self {
        let theme_index = theme_index.min(THEMES.len() - 1);
        Self {
            accent: THEMES[theme_index].fg_color(),
            theme_index,
            font_index: font_index.min(FONTS.len() - 1),
            overlay: None,
            shake: (0, 0),
        }
    }

    pub(crate) fn theme(&self) -> &'static ThemeDef {
        &THEMES[self.theme_index]
    }

    pub(crate) fn font(&self) -> &'static FontDef {
        &FONTS[self.font_index]
    }

    /// Switch themes and reset the accent to the new theme's foreground.
    pub(crate) fn apply_theme(&mut self, index: usize) {
        if index < THEMES.len() {
            self.theme_index = index;
        }
        self.accent = self.theme().fg_color();
    }

    /// Restore the accent to the active theme's foreground.
    pub(crate) fn reset_accent(&mut self) {
        self.accent = self.theme().fg_color();
    }
}

/// Find a theme by case-insensitive name, accepting hyphens for spaces.
pub(crate) fn theme_index_by_name(name: &str) -> Option<usize> {
    let wanted = name.trim().to_lowercase().replace('-', " ");
    THEMES
        .iter()
        .position(|theme| theme.name.to_lowercase() == wanted)
}

/// Find a font by case-insensitive name, accepting hyphens for spaces.
pub(crate) fn font_index_by_name(name: &str) -> Option<usize> {
    let wanted = name.trim().to_lowercase().replace('-', " ");
    FONTS
        .iter()
        .position(|font| font.name.to_lowercase() == wanted)
}
