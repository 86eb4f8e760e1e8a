//! Data-driven game balance
//!
//! Every knob has a default, so a partial JSON document overrides only the
//! fields it names.

use serde::{Deserialize, Serialize};

/// Balance table for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing (ticks) ===
    /// Auto-fire cadence
    pub fire_interval: u64,
    /// Level increments every this many playing ticks
    pub level_interval: u64,
    /// Spawn cadence at level 1
    pub spawn_base_interval: u64,
    /// Cadence reduction per level
    pub spawn_step_per_level: u64,
    /// Fastest allowed cadence
    pub spawn_min_interval: u64,

    // === Speeds (pixels/tick) ===
    pub bullet_speed: f32,
    pub enemy_base_speed_min: f32,
    pub enemy_base_speed_max: f32,
    /// Added to fall speed per level
    pub enemy_speed_per_level: f32,

    // === Enemies ===
    /// Probability that a spawn is the tougher variant
    pub bruiser_chance: f64,
    pub drone_hp: u8,
    pub drone_points: u64,
    pub bruiser_hp: u8,
    pub bruiser_points: u64,

    // === Combat feel ===
    /// Player hitbox inset on each side
    pub player_hitbox_inset: f32,
    pub shake_magnitude: f32,
    pub shake_decay: f32,
    /// Shake snaps to zero below this
    pub shake_cutoff: f32,

    // === Particles ===
    pub particle_burst: usize,
    /// Max absolute velocity component
    pub particle_speed: f32,
    pub particle_decay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fire_interval: 15,
            level_interval: 600,
            spawn_base_interval: 60,
            spawn_step_per_level: 5,
            spawn_min_interval: 15,

            bullet_speed: 10.0,
            enemy_base_speed_min: 1.0,
            enemy_base_speed_max: 3.0,
            enemy_speed_per_level: 0.5,

            bruiser_chance: 0.2,
            drone_hp: 1,
            drone_points: 100,
            bruiser_hp: 3,
            bruiser_points: 300,

            player_hitbox_inset: 6.0,
            shake_magnitude: 10.0,
            shake_decay: 0.9,
            shake_cutoff: 0.5,

            particle_burst: 12,
            particle_speed: 4.0,
            particle_decay: 0.05,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON balance table
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Clamp values that would stall or break the simulation
    fn sanitize(&mut self) {
        self.fire_interval = self.fire_interval.max(1);
        self.level_interval = self.level_interval.max(1);
        self.spawn_min_interval = self.spawn_min_interval.max(1);
        self.spawn_base_interval = self.spawn_base_interval.max(self.spawn_min_interval);
        if self.enemy_base_speed_max <= self.enemy_base_speed_min {
            self.enemy_base_speed_max = self.enemy_base_speed_min + 0.01;
        }
        self.bruiser_chance = self.bruiser_chance.clamp(0.0, 1.0);
        self.drone_hp = self.drone_hp.max(1);
        self.bruiser_hp = self.bruiser_hp.max(1);
        self.particle_decay = self.particle_decay.max(0.001);
        self.particle_speed = self.particle_speed.max(0.1);
        self.shake_decay = self.shake_decay.clamp(0.0, 0.999);
    }
}
