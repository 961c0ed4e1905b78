//! Vertical two-stop gradient fill.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Widget},
};

use crate::state::{parse_hex, ColorPair};

/// Fallback when a stop is not a valid `#RRGGBB` color.
const FALLBACK: (u8, u8, u8) = (0x1E, 0x29, 0x3B);

/// Paints the background of an area top to bottom from one color to another.
pub struct Gradient<'a> {
    block: Option<Block<'a>>,
    from: (u8, u8, u8),
    to: (u8, u8, u8),
}

impl<'a> Gradient<'a> {
    pub fn new(colors: &ColorPair) -> Self {
        Self {
            block: None,
            from: parse_hex(&colors.from).unwrap_or(FALLBACK),
            to: parse_hex(&colors.to).unwrap_or(FALLBACK),
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Color of row `row` out of `rows`.
    pub fn color_at(&self, row: u16, rows: u16) -> Color {
        let t = if rows <= 1 {
            0.0
        } else {
            f32::from(row) / f32::from(rows - 1)
        };
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Color::Rgb(
            mix(self.from.0, self.to.0),
            mix(self.from.1, self.to.1),
            mix(self.from.2, self.to.2),
        )
    }
}

/// Text color readable on top of `bg`.
pub fn contrast_fg(bg: Color) -> Color {
    match bg {
        Color::Rgb(r, g, b) => {
            let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
            if luma > 150.0 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => Color::White,
    }
}

impl<'a> Widget for Gradient<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paint the whole area, block included, then draw the block on top.
        for (i, y) in (area.top()..area.bottom()).enumerate() {
            let bg = self.color_at(i as u16, area.height);
            for x in area.left()..area.right() {
                buf.get_mut(x, y).set_style(Style::default().bg(bg));
            }
        }

        if let Some(block) = self.block {
            block.render(area, buf);
        }
    }
}
