//! 8x8 pixel-art bitmaps
//!
//! One byte per row, most significant bit is the leftmost pixel.

use crate::consts::COLOR_PLAYER;
use crate::sim::EnemyKind;

pub const SPRITE_DIM: usize = 8;

pub type Bitmap = [u8; SPRITE_DIM];

const PLAYER: Bitmap = [
    0b00011000, 0b00111100, 0b01100110, 0b11111111, 0b10101110, 0b10101000, 0b10010001, 0b10000000,
];

const DRONE: Bitmap = [
    0b00111100, 0b01111110, 0b11011011, 0b11111111, 0b01011010, 0b01000010, 0b00100100, 0b00000000,
];

const BRUISER: Bitmap = [
    0b00100100, 0b00011000, 0b01111111, 0b11011011, 0b11111111, 0b01011010, 0b10000001, 0b00000000,
];

/// Everything drawn as a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy(EnemyKind),
}

impl SpriteKind {
    pub fn bitmap(self) -> &'static Bitmap {
        match self {
            SpriteKind::Player => &PLAYER,
            SpriteKind::Enemy(EnemyKind::Drone) => &DRONE,
            SpriteKind::Enemy(EnemyKind::Bruiser) => &BRUISER,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            SpriteKind::Player => COLOR_PLAYER,
            SpriteKind::Enemy(kind) => kind.color(),
        }
    }
}

/// Iterate (column, row) of every lit cell
pub fn lit_cells(bitmap: &Bitmap) -> impl Iterator<Item = (usize, usize)> + '_ {
    bitmap.iter().enumerate().flat_map(|(row, bits)| {
        (0..SPRITE_DIM)
            .filter(move |col| bits & (0x80 >> col) != 0)
            .map(move |col| (col, row))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_cells_order_and_position() {
        let cells: Vec<_> = lit_cells(&PLAYER).take(4).collect();
        assert_eq!(cells, vec![(3, 0), (4, 0), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_sprites_are_distinct() {
        let drone = SpriteKind::Enemy(EnemyKind::Drone);
        let bruiser = SpriteKind::Enemy(EnemyKind::Bruiser);
        assert_ne!(drone.bitmap(), bruiser.bitmap());
        assert_ne!(drone.color(), bruiser.color());
        assert_eq!(lit_cells(SpriteKind::Player.bitmap()).count(), 30);
    }
}
