//! Built-in score font
//!
//! 3x5 bitmap digits at 14 px per cell, so glyphs are 70 px tall. Layout
//! works in logical pixels with the origin on the baseline at the left edge
//! of the first glyph, so `measure` behaves like a font's bounding-box query.

use glam::Vec2;

/// Size of one font pixel in logical pixels
pub const PIXEL: f32 = 14.0;
const GLYPH_COLS: usize = 3;
const GLYPH_ROWS: usize = 5;
/// Horizontal distance between glyph origins (3 columns + 1 spacing)
pub const ADVANCE: f32 = (GLYPH_COLS as f32 + 1.0) * PIXEL;

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

/// Axis-aligned rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }
}

fn glyph(ch: char) -> Option<&'static [u8; 15]> {
    ch.to_digit(10).map(|d| &DIGITS[d as usize])
}

/// Bounding box of `text` relative to its origin (baseline, left edge)
///
/// Characters without a glyph still take up an advance but add no ink.
/// An empty string measures as a zero-size box at the origin.
pub fn measure(text: &str) -> Rect {
    let inked: Vec<usize> = text
        .chars()
        .enumerate()
        .filter(|(_, c)| glyph(*c).is_some())
        .map(|(i, _)| i)
        .collect();

    match (inked.first(), inked.last()) {
        (Some(&first), Some(&last)) => Rect {
            min: Vec2::new(first as f32 * ADVANCE, -(GLYPH_ROWS as f32) * PIXEL),
            max: Vec2::new(last as f32 * ADVANCE + GLYPH_COLS as f32 * PIXEL, 0.0),
        },
        _ => Rect {
            min: Vec2::ZERO,
            max: Vec2::ZERO,
        },
    }
}

/// Filled font pixels of `text` drawn with its baseline origin at `origin`
pub fn layout(text: &str, origin: Vec2) -> Vec<Rect> {
    let top = origin.y - GLYPH_ROWS as f32 * PIXEL;
    let mut cells = Vec::new();

    for (i, ch) in text.chars().enumerate() {
        let Some(bits) = glyph(ch) else { continue };
        let left = origin.x + i as f32 * ADVANCE;
        for row in 0..GLYPH_ROWS {
            for col in 0..GLYPH_COLS {
                if bits[row * GLYPH_COLS + col] == 1 {
                    let min = Vec2::new(left + col as f32 * PIXEL, top + row as f32 * PIXEL);
                    cells.push(Rect {
                        min,
                        max: min + Vec2::splat(PIXEL),
                    });
                }
            }
        }
    }

    cells
}
