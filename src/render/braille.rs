//! Braille output backend.
//!
//! Each terminal cell covers a 2x4 block of canvas pixels; covered pixels
//! become braille dots, so a W x H character area yields a 2W x 4H canvas.

use ratatui::prelude::*;

use super::Canvas;

/// Braille dot bit for each (dx, dy) position within a 2x4 cell:
/// (0,0)=0x01 (1,0)=0x08
/// (0,1)=0x02 (1,1)=0x10
/// (0,2)=0x04 (1,2)=0x20
/// (0,3)=0x40 (1,3)=0x80
pub const DOT_MAP: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

/// Canvas pixels per terminal cell, horizontally.
pub const CELL_W: usize = 2;
/// Canvas pixels per terminal cell, vertically.
pub const CELL_H: usize = 4;

/// Encode one terminal cell's pixel block. Returns the braille character and
/// the color of the last covered pixel, or `None` when the block is empty.
pub fn encode_cell(canvas: &Canvas, cx: usize, cy: usize) -> Option<(char, (u8, u8, u8))> {
    let mut braille: u8 = 0;
    let mut color = None;

    for (dx, col) in DOT_MAP.iter().enumerate() {
        for (dy, &bit) in col.iter().enumerate() {
            let px = cx * CELL_W + dx;
            let py = cy * CELL_H + dy;
            if canvas.is_covered(px, py) {
                braille |= bit;
                let (r, g, b, _) = canvas.get_pixel(px, py);
                color = Some((r, g, b));
            }
        }
    }

    color.map(|c| (char::from_u32(0x2800 + braille as u32).unwrap_or(' '), c))
}

/// Encode the canvas into braille characters and write them into the frame.
pub fn submit(canvas: &Canvas, frame: &mut Frame, area: Rect) {
    let char_w = (canvas.width / CELL_W).min(area.width as usize);
    let char_h = (canvas.height / CELL_H).min(area.height as usize);

    for cy in 0..char_h {
        for cx in 0..char_w {
            if let Some((ch, (r, g, b))) = encode_cell(canvas, cx, cy) {
                let cell = frame
                    .buffer_mut()
                    .cell_mut((area.x + cx as u16, area.y + cy as u16));
                if let Some(cell) = cell {
                    cell.set_char(ch);
                    cell.set_fg(Color::Rgb(r, g, b));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_dot_maps_to_its_bit() {
        let mut canvas = Canvas::new(2, 4);
        canvas.put_pixel(0, 0, 255, 255, 255);
        let (ch, color) = encode_cell(&canvas, 0, 0).unwrap();
        assert_eq!(ch, '\u{2801}');
        assert_eq!(color, (255, 255, 255));
    }

    #[test]
    fn full_block_maps_to_all_dots() {
        let mut canvas = Canvas::new(2, 4);
        for y in 0..4 {
            for x in 0..2 {
                canvas.put_pixel(x, y, 200, 100, 50);
            }
        }
        let (ch, _) = encode_cell(&canvas, 0, 0).unwrap();
        assert_eq!(ch, '\u{28FF}');
    }

    #[test]
    fn empty_block_encodes_to_nothing() {
        let canvas = Canvas::new(4, 8);
        assert!(encode_cell(&canvas, 0, 0).is_none());
        assert!(encode_cell(&canvas, 1, 1).is_none());
    }
}
