//! Per-frame simulation tick
//!
//! One call per display refresh. The starfield always scrolls; everything
//! else only advances while playing.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_enemies;
use super::pools::{advance_bullets, advance_particles, advance_stars, prune_bullets, prune_particles};
use super::spawner::maybe_spawn;
use super::state::{Bullet, GameEvent, GamePhase, GameState};
use crate::audio::SoundEffect;

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Current viewport size in pixels
    pub viewport: Vec2,
    /// Latest pointer/touch position relative to the surface
    pub pointer: Option<Vec2>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.viewport.x > 0.0 && input.viewport.y > 0.0 {
        state.viewport = input.viewport;
    }

    decay_shake(state);
    advance_stars(&mut state.stars, state.viewport, &mut state.rng);

    if state.phase == GamePhase::Playing {
        tick_playing(state, input);
    } else {
        // Let the last explosion play out behind the overlay
        advance_particles(&mut state.particles, state.tuning.particle_decay);
        prune_particles(&mut state.particles);
    }

    // Rolled last so an impact this tick shows at full magnitude
    roll_shake_offset(state);
}

fn tick_playing(state: &mut GameState, input: &TickInput) {
    state.frame += 1;

    if state.frame % state.tuning.level_interval == 0 {
        state.level += 1;
        log::debug!("Level up: {}", state.level);
    }

    maybe_spawn(
        state.frame,
        state.level,
        state.viewport.x,
        &state.tuning,
        &mut state.rng,
        &mut state.enemies,
    );

    if let Some(pointer) = input.pointer {
        state.player.follow_pointer(pointer);
    }
    state.player.clamp_to(state.viewport);

    if state.frame % state.tuning.fire_interval == 0 {
        state
            .bullets
            .push(Bullet::from_player(&state.player, state.tuning.bullet_speed));
        state.events.push(GameEvent::Sound(SoundEffect::Shoot));
    }

    advance_bullets(&mut state.bullets);
    prune_bullets(&mut state.bullets);

    resolve_enemies(state);

    advance_particles(&mut state.particles, state.tuning.particle_decay);
    prune_particles(&mut state.particles);
}

/// Decay the magnitude left over from the previous frame
fn decay_shake(state: &mut GameState) {
    state.screen_shake *= state.tuning.shake_decay;
    if state.screen_shake < state.tuning.shake_cutoff {
        state.screen_shake = 0.0;
    }
}

fn roll_shake_offset(state: &mut GameState) {
    state.shake_offset = if state.screen_shake > 0.0 {
        let jitter = Vec2::new(
            state.rng.random::<f32>() - 0.5,
            state.rng.random::<f32>() - 0.5,
        );
        jitter * state.screen_shake
    } else {
        Vec2::ZERO
    };
}
