use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

const GLYPHS: [&str; 5] = ["*", "+", "o", "\u{2022}", "\u{2726}"];

/// Falling confetti for a good result. Each particle derives its column,
/// speed, glyph and colour from its own seeded rng, so a given `frame` always
/// draws the same picture.
pub struct Confetti<'a> {
    pub frame: u64,
    pub seed: u64,
    pub theme: &'a Theme,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Particle {
    pub x: u16,
    pub y: u16,
    pub glyph: &'static str,
    pub color_index: usize,
}

impl<'a> Confetti<'a> {
    pub fn new(frame: u64, seed: u64, theme: &'a Theme) -> Self {
        Self { frame, seed, theme }
    }

    pub fn particles(&self, area: Rect) -> Vec<Particle> {
        if area.width == 0 || area.height == 0 {
            return Vec::new();
        }
        let count = (area.width as usize / 2).max(1);
        let height = area.height as u64;

        (0..count as u64)
            .map(|i| {
                let mut rng = SmallRng::seed_from_u64(self.seed.wrapping_add(i));
                let x = rng.gen_range(0..area.width);
                let speed = rng.gen_range(1..=3u64);
                let offset = rng.gen_range(0..height);
                let glyph = GLYPHS[rng.gen_range(0..GLYPHS.len())];
                let color_index = rng.gen_range(0..5);
                let y = ((offset + self.frame * speed / 2) % height) as u16;
                Particle {
                    x: area.x + x,
                    y: area.y + y,
                    glyph,
                    color_index,
                }
            })
            .collect()
    }
}

impl Widget for Confetti<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.theme.colors.festive();
        for p in self.particles(area) {
            buf.set_string(p.x, p.y, p.glyph, Style::default().fg(palette[p.color_index]));
        }
    }
}
