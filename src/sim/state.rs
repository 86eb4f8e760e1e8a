//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. Platform effects (sound, storage)
//! are recorded as `GameEvent`s and drained by the caller.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, only stars animate
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Session ended, simulation frozen
    GameOver,
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Common, one hit
    Drone,
    /// Rare, tougher, worth more
    Bruiser,
}

impl EnemyKind {
    pub fn max_hp(self, tuning: &Tuning) -> u8 {
        match self {
            EnemyKind::Drone => tuning.drone_hp,
            EnemyKind::Bruiser => tuning.bruiser_hp,
        }
    }

    pub fn points(self, tuning: &Tuning) -> u64 {
        match self {
            EnemyKind::Drone => tuning.drone_points,
            EnemyKind::Bruiser => tuning.bruiser_points,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            EnemyKind::Drone => COLOR_DRONE,
            EnemyKind::Bruiser => COLOR_BRUISER,
        }
    }
}

/// The player's ship (top-left anchored)
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Start position: horizontally centered, near the bottom
    pub fn reset(&mut self, viewport: Vec2) {
        self.pos = Vec2::new(
            viewport.x / 2.0 - self.size.x / 2.0,
            viewport.y - PLAYER_START_OFFSET_Y,
        );
    }

    /// Center the sprite on a pointer position
    pub fn follow_pointer(&mut self, pointer: Vec2) {
        self.pos = pointer - self.size / 2.0;
    }

    /// Keep the whole sprite inside the viewport
    pub fn clamp_to(&mut self, viewport: Vec2) {
        let max = (viewport - self.size).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }
}

/// A player projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bullet {
    /// Fire from the nose of the player's ship
    pub fn from_player(player: &Player, speed: f32) -> Self {
        Self {
            pos: Vec2::new(
                player.pos.x + player.size.x / 2.0 - BULLET_WIDTH / 2.0,
                player.pos.y,
            ),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A falling enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
    pub hp: u8,
    pub speed: f32,
    /// Marked for removal by the resolver
    pub destroyed: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, speed: f32, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: Vec2::splat(ENEMY_SIZE),
            kind,
            hp: kind.max_hp(tuning),
            speed,
            destroyed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, rendered as alpha
    pub life: f32,
    pub color: u32,
}

/// Background star, recycled rather than destroyed
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

/// Something the platform layer has to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Play a sound effect (subject to mute)
    Sound(SoundEffect),
    /// An enemy was shot down
    EnemyDestroyed { kind: EnemyKind, points: u64 },
    /// The player took a hit
    PlayerHit { health: u8 },
    /// Session ended
    GameOver { score: u64, new_record: bool },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score ever observed, loaded at mount
    pub high_score: u64,
    pub health: u8,
    pub level: u32,
    /// Playing ticks since the session started
    pub frame: u64,
    /// Viewport size in pixels, re-measured each tick
    pub viewport: Vec2,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    /// Current shake magnitude
    pub screen_shake: f32,
    /// Translate applied to this frame
    pub shake_offset: Vec2,
    /// Pending events for the platform layer
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, viewport: Vec2, tuning: Tuning, high_score: u64) -> Self {
        let mut state = Self {
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            high_score,
            health: MAX_HEALTH,
            level: 1,
            frame: 0,
            viewport,
            player: Player::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            stars: Vec::with_capacity(STAR_COUNT),
            screen_shake: 0.0,
            shake_offset: Vec2::ZERO,
            events: Vec::new(),
        };
        state.player.reset(viewport);
        state.spawn_stars();
        state
    }

    fn spawn_stars(&mut self) {
        let (w, h) = (self.viewport.x.max(1.0), self.viewport.y.max(1.0));
        for _ in 0..STAR_COUNT {
            let star = Star {
                pos: Vec2::new(self.rng.random_range(0.0..w), self.rng.random_range(0.0..h)),
                size: self.rng.random_range(1.0..3.0),
                speed: self.rng.random_range(0.5..2.5),
            };
            self.stars.push(star);
        }
    }

    /// Start (or retry) a session. Ignored while already playing.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }
        self.score = 0;
        self.health = MAX_HEALTH;
        self.level = 1;
        self.frame = 0;
        self.screen_shake = 0.0;
        self.shake_offset = Vec2::ZERO;
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.player.reset(self.viewport);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Sound(SoundEffect::Powerup));
        log::debug!("Session started (high score {})", self.high_score);
        true
    }

    /// Enter GameOver, finalizing the high score exactly once
    pub(crate) fn end_session(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        let new_record = self.score > self.high_score;
        if new_record {
            self.high_score = self.score;
        }
        self.events.push(GameEvent::GameOver {
            score: self.score,
            new_record,
        });
        log::debug!(
            "Session over: score {} at level {} (record: {})",
            self.score,
            self.level,
            new_record
        );
    }

    /// Radial-ish burst of particles at `center`
    pub fn spawn_burst(&mut self, center: Vec2, color: u32) {
        let speed = self.tuning.particle_speed;
        for _ in 0..self.tuning.particle_burst {
            let vel = Vec2::new(
                self.rng.random_range(-speed..speed),
                self.rng.random_range(-speed..speed),
            );
            self.particles.push(Particle {
                pos: center,
                vel,
                life: 1.0,
                color,
            });
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    #[test]
    fn test_new_state_is_idle_with_stars() {
        let state = GameState::new(1, viewport(), Tuning::default(), 0);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert!(state.stars.iter().all(|s| {
            (0.0..800.0).contains(&s.pos.x) && (1.0..3.0).contains(&s.size)
        }));
    }

    #[test]
    fn test_start_resets_session() {
        let mut state = GameState::new(1, viewport(), Tuning::default(), 0);
        state.start();
        state.score = 1200;
        state.health = 1;
        state.level = 4;
        state.bullets.push(Bullet::from_player(&state.player, 10.0));
        state.end_session();
        assert_eq!(state.phase, GamePhase::GameOver);

        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!((state.health, state.score, state.level), (3, 0, 1));
        assert!(state.bullets.is_empty());
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert_eq!(state.player.pos, Vec2::new(384.0, 500.0));
    }

    #[test]
    fn test_start_while_playing_is_ignored() {
        let mut state = GameState::new(1, viewport(), Tuning::default(), 0);
        assert!(state.start());
        state.score = 50;
        assert!(!state.start());
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_end_session_keeps_higher_record() {
        let mut state = GameState::new(1, viewport(), Tuning::default(), 500);
        state.start();
        state.score = 300;
        state.drain_events();
        state.end_session();
        assert_eq!(state.high_score, 500);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver {
                score: 300,
                new_record: false
            }]
        );
    }

    #[test]
    fn test_end_session_only_once() {
        let mut state = GameState::new(1, viewport(), Tuning::default(), 0);
        state.start();
        state.score = 900;
        state.end_session();
        state.score = 5000;
        state.end_session();
        assert_eq!(state.high_score, 900);
    }

    #[test]
    fn test_player_clamp() {
        let mut player = Player::default();
        player.follow_pointer(Vec2::new(-50.0, 2000.0));
        player.clamp_to(viewport());
        assert_eq!(player.pos, Vec2::new(0.0, 568.0));
    }

    #[test]
    fn test_burst_size_and_color() {
        let mut state = GameState::new(7, viewport(), Tuning::default(), 0);
        state.spawn_burst(Vec2::new(10.0, 10.0), COLOR_DRONE);
        assert_eq!(state.particles.len(), state.tuning.particle_burst);
        assert!(state.particles.iter().all(|p| p.color == COLOR_DRONE && p.life == 1.0));
    }
}
