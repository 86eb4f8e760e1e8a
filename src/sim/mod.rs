//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (pool insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod pools;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{EnemyOutcome, first_bullet_hit, resolve_enemies};
pub use spawner::{maybe_spawn, spawn_interval};
pub use state::{
    Bullet, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Particle, Player, Star,
};
pub use tick::{TickInput, tick};
