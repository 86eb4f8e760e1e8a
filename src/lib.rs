//! Neon Blast - a neon pixel-art vertical shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity pools, spawner, collisions, game state)
//! - `game`: Orchestrator wiring the simulation to audio and persistence
//! - `renderer`: Scene building and WebGPU pipeline
//! - `platform`: Browser input and frame-loop plumbing
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, Hud};
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Fixed geometry constants
pub mod consts {
    /// Player sprite size (square)
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Player spawns this far above the bottom edge
    pub const PLAYER_START_OFFSET_Y: f32 = 100.0;

    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;

    /// Enemy sprite size (square)
    pub const ENEMY_SIZE: f32 = 32.0;

    pub const STAR_COUNT: usize = 50;

    /// Particle square edge
    pub const PARTICLE_SIZE: f32 = 3.0;

    pub const MAX_HEALTH: u8 = 3;

    /// Colors (0xRRGGBB)
    pub const COLOR_BACKGROUND: u32 = 0x1a1a2e;
    pub const COLOR_PLAYER: u32 = 0x00f3ff;
    pub const COLOR_DRONE: u32 = 0xff0055;
    pub const COLOR_BRUISER: u32 = 0xffcc00;
    pub const COLOR_BULLET: u32 = 0xffffff;
    pub const COLOR_STAR: u32 = 0xffffff;
    pub const STAR_ALPHA: f32 = 0.3;
}

/// Axis-aligned rectangle in screen pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shrink by `margin` on every side
    #[inline]
    pub fn inset(&self, margin: f32) -> Rect {
        Rect {
            pos: self.pos + Vec2::splat(margin),
            size: (self.size - Vec2::splat(margin * 2.0)).max(Vec2::ZERO),
        }
    }

    /// Strict AABB intersection; touching edges do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// Convert a 0xRRGGBB color to linear-ish RGBA floats
#[inline]
pub fn rgb(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}
