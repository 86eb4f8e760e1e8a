//! Scene building: game state to a triangle list in pixel space
//!
//! Draw order is back to front: stars, bullets, enemies, player, particles.
//! The background itself is the pass clear color.

use glam::Vec2;

use super::shapes;
use super::sprites::SpriteKind;
use super::vertex::Vertex;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};
use crate::{Rect, rgb};

/// Build every vertex for the current frame
pub fn build(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(
        (state.stars.len() + state.bullets.len() + state.particles.len()) * 6
            + (state.enemies.len() + 1) * 64 * 6,
    );

    let star_color = rgb(COLOR_STAR, STAR_ALPHA);
    for star in &state.stars {
        shapes::rect(&Rect::new(star.pos, Vec2::splat(star.size)), star_color, &mut out);
    }

    let bullet_color = rgb(COLOR_BULLET, 1.0);
    for bullet in &state.bullets {
        shapes::rect(&bullet.rect(), bullet_color, &mut out);
    }

    for enemy in &state.enemies {
        let sprite = SpriteKind::Enemy(enemy.kind);
        shapes::sprite(
            sprite.bitmap(),
            enemy.pos,
            enemy.size.x,
            rgb(sprite.color(), 1.0),
            &mut out,
        );
    }

    if state.phase == GamePhase::Playing {
        let sprite = SpriteKind::Player;
        shapes::sprite(
            sprite.bitmap(),
            state.player.pos,
            state.player.size.x,
            rgb(sprite.color(), 1.0),
            &mut out,
        );
    }

    for particle in &state.particles {
        let color = rgb(particle.color, particle.life.clamp(0.0, 1.0));
        shapes::rect(&Rect::new(particle.pos, Vec2::splat(PARTICLE_SIZE)), color, &mut out);
    }

    out
}

/// Translate for this frame, honoring the player's motion preferences
pub fn shake_offset(state: &GameState, settings: &Settings) -> Vec2 {
    if settings.effective_screen_shake() {
        state.shake_offset
    } else {
        Vec2::ZERO
    }
}

/// Background clear color
pub fn clear_color() -> [f32; 4] {
    rgb(COLOR_BACKGROUND, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Enemy, EnemyKind};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(1, Vec2::new(800.0, 600.0), Tuning::default(), 0)
    }

    #[test]
    fn test_title_screen_draws_only_stars() {
        let state = state();
        assert_eq!(build(&state).len(), STAR_COUNT * 6);
    }

    #[test]
    fn test_player_drawn_while_playing() {
        let mut state = state();
        state.start();
        let lit = super::super::sprites::lit_cells(SpriteKind::Player.bitmap()).count();
        assert_eq!(build(&state).len(), (STAR_COUNT + lit) * 6);
    }

    #[test]
    fn test_particle_alpha_follows_life() {
        let mut state = state();
        state.stars.clear();
        state.spawn_burst(Vec2::new(5.0, 5.0), COLOR_DRONE);
        state.particles[0].life = 0.25;
        let verts = build(&state);
        assert_eq!(verts[0].color[3], 0.25);
    }

    #[test]
    fn test_enemy_sprite_uses_kind_color() {
        let mut state = state();
        state.stars.clear();
        let tuning = state.tuning.clone();
        state
            .enemies
            .push(Enemy::new(EnemyKind::Bruiser, Vec2::new(0.0, 0.0), 1.0, &tuning));
        let verts = build(&state);
        assert!(!verts.is_empty());
        assert!(verts.iter().all(|v| v.color == rgb(COLOR_BRUISER, 1.0)));
    }

    #[test]
    fn test_reduced_motion_cancels_shake() {
        let mut state = state();
        state.shake_offset = Vec2::new(3.0, -2.0);
        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(shake_offset(&state, &calm), Vec2::ZERO);
        assert_eq!(shake_offset(&state, &Settings::default()), Vec2::new(3.0, -2.0));
    }
}
