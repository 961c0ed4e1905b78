//! Confetti overlay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::effects::Confetti;

/// Draws live confetti particles over whatever is already in the buffer.
/// Only the cells under a particle are touched.
pub struct ConfettiOverlay<'a> {
    confetti: &'a Confetti,
}

impl<'a> ConfettiOverlay<'a> {
    pub fn new(confetti: &'a Confetti) -> Self {
        Self { confetti }
    }
}

impl<'a> Widget for ConfettiOverlay<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for p in self.confetti.particles() {
            if !(0.0..=1.0).contains(&p.x) || !(0.0..=1.0).contains(&p.y) {
                continue;
            }
            let x = area.left() + ((p.x * f32::from(area.width - 1)).round() as u16);
            let y = area.top() + ((p.y * f32::from(area.height - 1)).round() as u16);
            let (r, g, b) = p.color;
            buf.get_mut(x, y)
                .set_char(p.glyph)
                .set_style(Style::default().fg(Color::Rgb(r, g, b)));
        }
    }
}
