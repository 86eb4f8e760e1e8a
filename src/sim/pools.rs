//! Per-pool update rules
//!
//! Each pool has an advance step and a prune step. Pruning only looks at the
//! destruction predicate, so running it twice is the same as running it once.

use glam::Vec2;
use rand::Rng;

use super::state::{Bullet, Enemy, Particle, Star};

pub fn advance_bullets(bullets: &mut [Bullet]) {
    for bullet in bullets {
        bullet.pos.y -= bullet.speed;
    }
}

/// Drop bullets that have left the top of the viewport
pub fn prune_bullets(bullets: &mut Vec<Bullet>) {
    bullets.retain(|b| b.pos.y + b.size.y >= 0.0);
}

pub fn advance_enemy(enemy: &mut Enemy) {
    enemy.pos.y += enemy.speed;
}

/// Drop destroyed enemies and those that fell past the bottom edge
pub fn prune_enemies(enemies: &mut Vec<Enemy>, height: f32) {
    enemies.retain(|e| !e.destroyed && e.hp > 0 && e.pos.y <= height);
}

pub fn advance_particles(particles: &mut [Particle], decay: f32) {
    for p in particles {
        p.pos += p.vel;
        p.life -= decay;
    }
}

pub fn prune_particles(particles: &mut Vec<Particle>) {
    particles.retain(|p| p.life > 0.0);
}

/// Scroll stars down, wrapping to the top with a fresh x
pub fn advance_stars<R: Rng>(stars: &mut [Star], viewport: Vec2, rng: &mut R) {
    for star in stars {
        star.pos.y += star.speed;
        if star.pos.y > viewport.y {
            star.pos.y = 0.0;
            star.pos.x = rng.random_range(0.0..viewport.x.max(1.0));
        }
    }
}
