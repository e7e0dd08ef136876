//! Overlay text, one glyph per terminal cell.

use crate::fb::{FrameBuffer, Rgb};

/// Printable ASCII range that has glyphs.
const GLYPHS: std::ops::RangeInclusive<u8> = 33..=126;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// `x` is the first cell.
    #[default]
    Left,
    /// `x` is the middle cell.
    Center,
    /// `x` is one past the last cell.
    Right,
}

/// Width of `text` in cells. Every character advances one cell, drawn or not.
pub fn text_width(text: &str) -> u16 {
    text.chars().count().min(u16::MAX as usize) as u16
}

pub fn has_glyph(ch: char) -> bool {
    ch.is_ascii() && GLYPHS.contains(&(ch as u8))
}

/// Draw `text` on row `y`, keeping each cell's background.
pub fn draw_text(fb: &mut FrameBuffer, x: u16, y: u16, text: &str, align: Align, fg: Rgb) {
    let width = text_width(text);
    let start = match align {
        Align::Left => x as i32,
        Align::Center => x as i32 - (width / 2) as i32,
        Align::Right => x as i32 - width as i32,
    };
    for (i, ch) in text.chars().enumerate() {
        let cx = start + i as i32;
        if cx < 0 || !has_glyph(ch) {
            continue;
        }
        if cx > u16::MAX as i32 {
            break;
        }
        fb.overlay_char(cx as u16, y, ch, fg, true);
    }
}
