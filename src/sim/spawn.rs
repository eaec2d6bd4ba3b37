//! Entity spawning
//!
//! Star field, enemy spawner, explosions, thrust smoke and bonus drops.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::state::{
    BonusItem, BonusKind, Enemy, EnemyKind, GameEvent, GameState, Particle, Star,
};
use crate::audio::SoundEffect;
use crate::color::{Color, palette};
use crate::consts::*;

/// Scatter the fixed star population over the whole canvas
pub fn starfield(rng: &mut Pcg32, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.random::<f32>() * CANVAS_WIDTH,
                rng.random::<f32>() * CANVAS_HEIGHT,
            ),
            size: rng.random::<f32>() * 2.0 + 1.0,
            speed: rng.random::<f32>() * 2.0 + 0.5,
        })
        .collect()
}

/// Irregular asteroid outline: 7-11 vertices at even angles, each pushed
/// in or out by up to 20% of the half extents. Offsets are from the center.
pub fn asteroid_shape(rng: &mut Pcg32, width: f32, height: f32) -> Vec<Vec2> {
    let vertices = rng.random_range(7..=11);
    let half = Vec2::new(width / 2.0, height / 2.0);
    (0..vertices)
        .map(|i| {
            let angle = i as f32 / vertices as f32 * TAU;
            let wobble = 0.8 + rng.random::<f32>() * 0.4;
            Vec2::new(angle.cos(), angle.sin()) * half * wobble
        })
        .collect()
}

/// Spawn one enemy just above the top edge
pub fn spawn_enemy(state: &mut GameState) {
    let rng = &mut state.rng;
    let width = rng.random_range(ENEMY_MIN_WIDTH..ENEMY_MAX_WIDTH);
    let height = width * ENEMY_ASPECT;
    let x = rng.random::<f32>() * (CANVAS_WIDTH - width);
    let kind = if rng.random_bool(INVADER_SPAWN_CHANCE) {
        EnemyKind::Invader
    } else {
        EnemyKind::Asteroid
    };
    let shape = match kind {
        EnemyKind::Asteroid => Some(asteroid_shape(rng, width, height)),
        EnemyKind::Invader => None,
    };

    let id = state.next_entity_id();
    log::debug!("Spawned {:?} #{} at x={:.0}", kind, id, x);
    state.enemies.push(Enemy {
        id,
        rect: Rect::new(x, -height, width, height),
        kind,
        speed: kind.speed(),
        health: kind.health(),
        shape,
    });
}

/// Firework burst: `size * 5` sparks flying out in random directions
pub fn spawn_explosion(state: &mut GameState, center: Vec2, color: Color, size: f32) {
    let count = (size * 5.0).max(0.0) as usize;
    let rng = &mut state.rng;
    state.particles.reserve(count);
    for _ in 0..count {
        let angle = rng.random::<f32>() * TAU;
        let speed = rng.random::<f32>() * (size / 4.0) + 1.0;
        let max_life = rng.random::<f32>() * 80.0 + 40.0;
        let pick = rng.random_range(0..=palette::EXPLOSION.len());
        let spark_color = palette::EXPLOSION.get(pick).copied().unwrap_or(color);
        state.particles.push(Particle {
            pos: center,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color: spark_color,
            alpha: 1.0,
            radius: rng.random::<f32>() * 2.0 + 1.0,
            life: max_life,
            max_life,
        });
    }
    state.enforce_particle_budget();
    state.emit(GameEvent::Sound(SoundEffect::Explosion));
}

/// Maybe leave a pickup where an enemy died
pub fn maybe_drop_bonus(state: &mut GameState, at: Vec2) {
    if !state.rng.random_bool(BONUS_ITEM_SPAWN_CHANCE) {
        return;
    }
    let kind = if state.rng.random_bool(0.5) {
        BonusKind::Shield
    } else {
        BonusKind::Score
    };
    let id = state.next_entity_id();
    log::debug!("Dropped {:?} bonus #{}", kind, id);
    state.bonus_items.push(BonusItem {
        id,
        rect: Rect::new(at.x, at.y, BONUS_ITEM_SIZE, BONUS_ITEM_SIZE),
        kind,
        speed: BONUS_ITEM_SPEED,
    });
}

/// Intermittent exhaust puff under the ship
pub fn maybe_emit_smoke(state: &mut GameState) {
    if !state.rng.random_bool(SMOKE_SPAWN_CHANCE) {
        return;
    }
    let ship = state.player.rect;
    let rng = &mut state.rng;
    let pos = Vec2::new(
        ship.x + ship.width * 0.3 + rng.random::<f32>() * ship.width * 0.4,
        ship.bottom(),
    );
    let vel = Vec2::new(
        (rng.random::<f32>() - 0.5) * 0.5,
        rng.random::<f32>() + 1.0,
    );
    let radius = rng.random::<f32>() * 3.0 + 2.0;
    state.smoke.push(Particle {
        pos,
        vel,
        color: palette::SMOKE,
        alpha: 1.0,
        radius,
        life: SMOKE_LIFE,
        max_life: SMOKE_LIFE,
    });
    state.enforce_particle_budget();
}
