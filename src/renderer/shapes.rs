//! Shape generation for 2D primitives
//!
//! Everything on screen is a filled rectangle: sprites are grids of them.

use glam::Vec2;

use super::sprites::{Bitmap, SPRITE_DIM, lit_cells};
use super::vertex::Vertex;
use crate::Rect;

/// Two triangles covering `rect` (pixel space)
pub fn rect(rect: &Rect, color: [f32; 4], out: &mut Vec<Vertex>) {
    let (x0, y0) = (rect.pos.x, rect.pos.y);
    let (x1, y1) = (x0 + rect.size.x, y0 + rect.size.y);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x0, y1, color));

    out.push(Vertex::new(x0, y1, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));
}

/// Blit a bitmap scaled to `size` pixels square, one quad per lit cell
pub fn sprite(bitmap: &Bitmap, pos: Vec2, size: f32, color: [f32; 4], out: &mut Vec<Vertex>) {
    let pixel = size / SPRITE_DIM as f32;
    for (col, row) in lit_cells(bitmap) {
        let cell = Rect::new(
            pos + Vec2::new(col as f32, row as f32) * pixel,
            Vec2::splat(pixel),
        );
        rect(&cell, color, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let mut out = Vec::new();
        rect(&Rect::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)), [1.0; 4], &mut out);
        assert_eq!(out.len(), 6);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 4.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 6.0);
    }

    #[test]
    fn test_sprite_cell_scale() {
        let mut bitmap = [0u8; SPRITE_DIM];
        bitmap[7] = 0b0000_0001;
        let mut out = Vec::new();
        sprite(&bitmap, Vec2::new(100.0, 100.0), 32.0, [1.0; 4], &mut out);
        assert_eq!(out.len(), 6);
        // Bottom-right cell, 4px square
        assert_eq!(out[0].position, [128.0, 128.0]);
        assert_eq!(out[5].position, [132.0, 132.0]);
    }
}
