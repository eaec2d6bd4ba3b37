//! Autopilot
//!
//! Synthesizes held controls from the current player/enemy/bonus state.
//! Priorities: dodge the most imminent threat, otherwise drift toward the
//! nearest pickup (or enemy); fire when lined up with the nearest enemy; keep
//! the ship inside a vertical operating band.

use super::collision::Rect;
use super::input::Controls;
use super::state::{BonusItem, Enemy, Player};
use crate::consts::*;

/// Horizontal decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Steer {
    Left,
    Right,
}

/// Compute this frame's controls for the ship
pub fn steer(player: &Player, enemies: &[Enemy], bonus_items: &[BonusItem]) -> Controls {
    let ship = &player.rect;
    let mut controls = Controls::default();

    match dodge(ship, enemies).or_else(|| seek(ship, enemies, bonus_items)) {
        Some(Steer::Left) => controls.left = true,
        Some(Steer::Right) => controls.right = true,
        None => {}
    }

    controls.fire = nearest(ship, enemies.iter().map(|e| &e.rect))
        .is_some_and(|target| (target.center_x() - ship.center_x()).abs() < target.width);

    if ship.y > CANVAS_HEIGHT * AUTOPILOT_BAND_BOTTOM {
        controls.up = true;
    } else if ship.y < CANVAS_HEIGHT * AUTOPILOT_BAND_TOP {
        controls.down = true;
    }

    controls
}

/// Pick the enemy whose predicted column crosses the ship's safe corridor
/// soonest, and move away from it.
fn dodge(ship: &Rect, enemies: &[Enemy]) -> Option<Steer> {
    let safe_half_width = ship.width * AUTOPILOT_SAFE_ZONE / 2.0;
    let ship_x = ship.center_x();

    let mut best: Option<(f32, Steer)> = None;
    for enemy in enemies {
        if enemy.speed <= 0.0 {
            continue;
        }
        let steps_to_reach = (ship.y - enemy.rect.y) / enemy.speed;
        if steps_to_reach <= 0.0 || steps_to_reach >= AUTOPILOT_HORIZON_STEPS {
            continue;
        }

        // Enemies fall straight down, so the predicted column is the current one
        let enemy_x = enemy.rect.center_x();
        if (ship_x - enemy_x).abs() >= safe_half_width + enemy.rect.width / 2.0 {
            continue;
        }

        let threat = 1.0 / steps_to_reach;
        if best.is_none_or(|(highest, _)| threat > highest) {
            let away = if enemy_x < ship_x {
                Steer::Right
            } else {
                Steer::Left
            };
            best = Some((threat, away));
        }
    }
    best.map(|(_, away)| away)
}

/// Line up with the nearest pickup, or failing that the nearest enemy
fn seek(ship: &Rect, enemies: &[Enemy], bonus_items: &[BonusItem]) -> Option<Steer> {
    let target = nearest(ship, bonus_items.iter().map(|b| &b.rect))
        .or_else(|| nearest(ship, enemies.iter().map(|e| &e.rect)))?;

    let offset = target.center_x() - ship.center_x();
    if offset.abs() <= PLAYER_SPEED {
        None
    } else if offset < 0.0 {
        Some(Steer::Left)
    } else {
        Some(Steer::Right)
    }
}

/// Closest rect by straight-line distance between top-left corners
fn nearest<'a>(ship: &Rect, candidates: impl Iterator<Item = &'a Rect>) -> Option<&'a Rect> {
    candidates.min_by(|a, b| {
        ship.origin_distance(a)
            .partial_cmp(&ship.origin_distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}
