//! Falling-glyph background layer: per-column drops with independent speeds.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const MIN_SPEED: f32 = 0.2;
pub(crate) const MAX_SPEED: f32 = 0.7;

/// Rows of glyphs kept behind each drop head.
const TRAIL_LEN: usize = 12;

/// Chance per tick that a drop past the bottom restarts at the top.
const RESET_CHANCE: f64 = 0.025;

/// Rows of the trail drawn at full brightness before dimming.
const BRIGHT_ROWS: usize = 4;

#[derive(Debug, Clone)]
struct Column {
    head: f32,
    speed: f32,
    trail: VecDeque<char>,
}

impl Column {
    fn new(rng: &mut impl Rng) -> Self {
        Self {
            head: 0.0,
            speed: rng.gen_range(MIN_SPEED..MAX_SPEED),
            trail: VecDeque::with_capacity(TRAIL_LEN),
        }
    }
}

/// One drop per screen column. Ticked at frame rate, drawn before the panels
/// so the terminal UI overwrites it.
#[derive(Debug, Clone)]
pub(crate) struct MatrixRain {
    columns: Vec<Column>,
    height: u16,
}

impl MatrixRain {
    pub(crate) fn new(width: u16, height: u16, rng: &mut impl Rng) -> Self {
        let mut rain = Self {
            columns: Vec::new(),
            height,
        };
        rain.resize(width, height, rng);
        rain
    }

    /// Rebuild every column for a new viewport, like the original resize path:
    /// drop positions restart at the top and speeds re-randomize.
    pub(crate) fn resize(&mut self, width: u16, height: u16, rng: &mut impl Rng) {
        self.height = height;
        self.columns = (0..width).map(|_| Column::new(rng)).collect();
    }

    pub(crate) fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Pin every column to one speed.
    pub(crate) fn set_speed(&mut self, value: f32) {
        for column in &mut self.columns {
            column.speed = value;
        }
    }

    /// Re-randomize all column speeds; returns the first column's new speed
    /// for the confirmation line.
    pub(crate) fn randomize_speeds(&mut self, rng: &mut impl Rng) -> f32 {
        for column in &mut self.columns {
            column.speed = rng.gen_range(MIN_SPEED..MAX_SPEED);
        }
        self.columns.first().map_or(MIN_SPEED, |c| c.speed)
    }

    /// Advance every drop one frame, drawing fresh glyphs from `glyphs`.
    pub(crate) fn tick(&mut self, glyphs: &str, rng: &mut impl Rng) {
        let repertoire: Vec<char> = glyphs.chars().collect();
        for column in &mut self.columns {
            let previous_row = column.head.floor();
            column.head += column.speed;
            if column.head.floor() > previous_row {
                if let Some(glyph) = repertoire.choose(rng) {
                    column.trail.push_front(*glyph);
                    column.trail.truncate(TRAIL_LEN);
                }
            }
            if column.head > f32::from(self.height) && rng.gen_bool(RESET_CHANCE) {
                column.head = 0.0;
                column.trail.clear();
            }
        }
    }

    /// Draw all trails into `buf`, offset by the shake displacement.
    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer, accent: Color, shake: (i16, i16)) {
        for (index, column) in self.columns.iter().enumerate() {
            let head_row = column.head.floor() as i32;
            for (age, glyph) in column.trail.iter().enumerate() {
                let x = i32::from(area.x) + index as i32 + i32::from(shake.0);
                let y = i32::from(area.y) + head_row - age as i32 + i32::from(shake.1);
                if x < i32::from(area.x)
                    || x >= i32::from(area.right())
                    || y < i32::from(area.y)
                    || y >= i32::from(area.bottom())
                {
                    continue;
                }
                let style = if age == 0 {
                    Style::default().fg(accent).add_modifier(Modifier::BOLD)
                } else if age < BRIGHT_ROWS {
                    Style::default().fg(accent)
                } else {
                    Style::default().fg(accent).add_modifier(Modifier::DIM)
                };
                buf.get_mut(x as u16, y as u16)
                    .set_char(*glyph)
                    .set_style(style);
            }
        }
    }
}
