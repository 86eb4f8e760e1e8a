//! Enemy spawner
//!
//! Cadence tightens with level down to a floor; position, kind and speed are
//! rolled from the session RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind};
use crate::consts::ENEMY_SIZE;
use crate::tuning::Tuning;

/// Ticks between spawns at the given level (1-based)
pub fn spawn_interval(level: u32, tuning: &Tuning) -> u64 {
    let reduction = tuning
        .spawn_step_per_level
        .saturating_mul(u64::from(level.saturating_sub(1)));
    tuning
        .spawn_base_interval
        .saturating_sub(reduction)
        .max(tuning.spawn_min_interval)
        .max(1)
}

/// Roll a new enemy just above the top edge
pub fn roll_enemy<R: Rng>(level: u32, width: f32, tuning: &Tuning, rng: &mut R) -> Enemy {
    let max_x = (width - ENEMY_SIZE).max(0.0);
    let x = if max_x > 0.0 {
        rng.random_range(0.0..max_x)
    } else {
        0.0
    };

    let kind = if rng.random_bool(tuning.bruiser_chance) {
        EnemyKind::Bruiser
    } else {
        EnemyKind::Drone
    };

    let speed = rng.random_range(tuning.enemy_base_speed_min..tuning.enemy_base_speed_max)
        + tuning.enemy_speed_per_level * level as f32;

    Enemy::new(kind, Vec2::new(x, -ENEMY_SIZE), speed, tuning)
}

/// Spawn an enemy if this frame is on the cadence. Returns whether one spawned.
pub fn maybe_spawn<R: Rng>(
    frame: u64,
    level: u32,
    width: f32,
    tuning: &Tuning,
    rng: &mut R,
    enemies: &mut Vec<Enemy>,
) -> bool {
    if frame % spawn_interval(level, tuning) != 0 {
        return false;
    }
    enemies.push(roll_enemy(level, width, tuning, rng));
    true
}
