//! Text layout and rasterization for particle seeding.
//!
//! The reveal never shows the glyphs themselves: the text is stamped into the
//! canvas, coverage is sampled on a grid into seed points, and the canvas is
//! cleared again. Only the seed positions survive.

mod font;

use glam::Vec2;
use thiserror::Error;
use tracing::debug;

use crate::render::Canvas;
use font::GLYPH_SIZE;

/// Fraction of the canvas width text may occupy before wrapping, in percent.
const MAX_WIDTH_PCT: usize = 80;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("canvas has zero area ({width}x{height})")]
    EmptyCanvas { width: usize, height: usize },
}

/// Glyph sizing for the rasterizer.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    /// Glyph height in canvas pixels; rounded down to a multiple of 8.
    pub font_size: usize,
    /// Vertical advance between wrapped lines, in canvas pixels.
    pub line_height: usize,
}

impl Layout {
    /// Integer scale factor applied to the 8x8 glyphs.
    fn scale(&self) -> usize {
        (self.font_size / GLYPH_SIZE).max(1)
    }

    /// Advance per character: glyph width plus one scaled column of spacing.
    fn char_advance(&self) -> usize {
        GLYPH_SIZE * self.scale() + self.scale()
    }
}

/// Rasterize `text` centered on the canvas, sample the coverage on a
/// `frequency`-pixel grid, then erase the glyphs. Returns the seed points.
///
/// Text that fits no glyph at all (or an empty string) yields an empty seed
/// set, which the caller treats as a blank reveal.
pub fn seed_points(
    canvas: &mut Canvas,
    text: &str,
    layout: Layout,
    frequency: usize,
) -> Result<Vec<Vec2>, SeedError> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(SeedError::EmptyCanvas {
            width: canvas.width,
            height: canvas.height,
        });
    }

    rasterize(canvas, text, layout);
    let points = sample(canvas, frequency.max(1));
    canvas.clear();

    debug!(
        "seeded {} points from {} chars at frequency {}",
        points.len(),
        text.chars().count(),
        frequency
    );
    Ok(points)
}

/// Stamp the wrapped, centered text into the canvas.
fn rasterize(canvas: &mut Canvas, text: &str, layout: Layout) {
    let max_width = canvas.width * MAX_WIDTH_PCT / 100;
    let max_chars = (max_width / layout.char_advance()).max(1);
    let lines = wrap(text, max_chars);

    let block_height = lines.len() * layout.line_height;
    let top = (canvas.height.saturating_sub(block_height)) / 2;

    for (i, line) in lines.iter().enumerate() {
        let line_width = line.chars().count() * layout.char_advance();
        let x = (canvas.width.saturating_sub(line_width)) / 2;
        let y = top + i * layout.line_height;
        stamp_line(canvas, line, x, y, layout.scale());
    }
}

/// Greedy word wrap against a character budget per line. A word longer than
/// the budget gets a line of its own rather than being split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        match lines.last_mut() {
            Some(line) if line.chars().count() + 1 + word.chars().count() <= max_chars => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }
    lines
}

fn stamp_line(canvas: &mut Canvas, line: &str, x: usize, y: usize, scale: usize) {
    let advance = GLYPH_SIZE * scale + scale;
    for (i, ch) in line.chars().enumerate() {
        let bitmap = match font::glyph(ch) {
            Some(b) => b,
            None => continue,
        };
        let char_x = x + i * advance;
        for (row, &bits) in bitmap.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if (bits >> (7 - col)) & 1 == 1 {
                    for sy in 0..scale {
                        for sx in 0..scale {
                            let px = char_x + col * scale + sx;
                            let py = y + row * scale + sy;
                            if px < canvas.width && py < canvas.height {
                                canvas.put_pixel(px, py, 255, 255, 255);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Walk the canvas on a `frequency`-pixel grid and collect covered samples.
fn sample(canvas: &Canvas, frequency: usize) -> Vec<Vec2> {
    let mut points = Vec::new();
    for y in (0..canvas.height).step_by(frequency) {
        for x in (0..canvas.width).step_by(frequency) {
            if canvas.is_covered(x, y) {
                points.push(Vec2::new(x as f32, y as f32));
            }
        }
    }
    points
}
