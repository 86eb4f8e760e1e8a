//! Collision detection and combat resolution
//!
//! Enemies are resolved in pool order. Each enemy can absorb at most one
//! bullet per tick, and a consumed bullet is gone before the next enemy is
//! checked, so no bullet damages two enemies.

use super::pools::{advance_enemy, prune_enemies};
use super::state::{Bullet, GameEvent, GamePhase, GameState};
use crate::Rect;
use crate::audio::SoundEffect;
use crate::consts::COLOR_PLAYER;

/// What happened to a single enemy this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyOutcome {
    /// No contact
    Untouched,
    /// Took a bullet but survived
    Damaged,
    /// Shot down
    Destroyed,
    /// Rammed the player
    HitPlayer,
}

/// Index of the first bullet (pool order) overlapping `target`
pub fn first_bullet_hit(bullets: &[Bullet], target: &Rect) -> Option<usize> {
    bullets.iter().position(|b| b.rect().overlaps(target))
}

/// Move every enemy one step, resolve its collisions, then prune
pub fn resolve_enemies(state: &mut GameState) {
    for idx in 0..state.enemies.len() {
        // A fatal hit freezes the rest of the tick
        if state.phase != GamePhase::Playing {
            break;
        }
        advance_enemy(&mut state.enemies[idx]);
        resolve_enemy(state, idx);
    }
    prune_enemies(&mut state.enemies, state.viewport.y);
}

/// Resolve bullet and player contact for the enemy at `idx`
pub fn resolve_enemy(state: &mut GameState, idx: usize) -> EnemyOutcome {
    let enemy_box = state.enemies[idx].rect();
    let mut outcome = EnemyOutcome::Untouched;

    if let Some(bullet_idx) = first_bullet_hit(&state.bullets, &enemy_box) {
        state.bullets.remove(bullet_idx);
        let enemy = &mut state.enemies[idx];
        enemy.hp = enemy.hp.saturating_sub(1);
        outcome = EnemyOutcome::Damaged;
    }

    if state.enemies[idx].hp == 0 {
        destroy_enemy(state, idx);
        return EnemyOutcome::Destroyed;
    }

    let player_box = state.player.rect().inset(state.tuning.player_hitbox_inset);
    if player_box.overlaps(&enemy_box) {
        ram_player(state, idx);
        return EnemyOutcome::HitPlayer;
    }

    outcome
}

fn destroy_enemy(state: &mut GameState, idx: usize) {
    let enemy = &mut state.enemies[idx];
    enemy.destroyed = true;
    let (kind, center) = (enemy.kind, enemy.rect().center());
    let points = kind.points(&state.tuning);

    state.spawn_burst(center, kind.color());
    state.events.push(GameEvent::Sound(SoundEffect::Explosion));
    state.score += points;
    state.events.push(GameEvent::EnemyDestroyed { kind, points });
}

fn ram_player(state: &mut GameState, idx: usize) {
    state.enemies[idx].destroyed = true;
    let center = state.player.rect().center();
    state.spawn_burst(center, COLOR_PLAYER);
    state.screen_shake = state.tuning.shake_magnitude;
    state.health = state.health.saturating_sub(1);
    state.events.push(GameEvent::PlayerHit {
        health: state.health,
    });

    if state.health == 0 {
        state.end_session();
        state.events.push(GameEvent::Sound(SoundEffect::Explosion));
    }
}
