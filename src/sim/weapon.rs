//! Weapon table and firing patterns

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{Bullet, BulletKind, Player};
use crate::audio::SoundEffect;
use crate::color::{Color, palette};
use crate::consts::*;

/// Weapon variants, cycled in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Single,
    Triple,
    Laser,
    Missile,
}

/// Fixed per-weapon parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponConfig {
    /// Minimum time between volleys (ms)
    pub cooldown_ms: f32,
    pub color: Color,
    pub damage: i32,
    /// Projectile displacement per step
    pub speed: f32,
}

impl Weapon {
    pub const ALL: [Weapon; 4] = [
        Weapon::Single,
        Weapon::Triple,
        Weapon::Laser,
        Weapon::Missile,
    ];

    pub fn config(self) -> WeaponConfig {
        match self {
            Weapon::Single => WeaponConfig {
                cooldown_ms: 200.0,
                color: palette::SINGLE_SHOT,
                damage: 1,
                speed: 8.0,
            },
            Weapon::Triple => WeaponConfig {
                cooldown_ms: 400.0,
                color: palette::TRIPLE_SHOT,
                damage: 1,
                speed: 8.0,
            },
            Weapon::Laser => WeaponConfig {
                cooldown_ms: 300.0,
                color: palette::LASER,
                damage: 3,
                speed: 12.0,
            },
            Weapon::Missile => WeaponConfig {
                cooldown_ms: 600.0,
                color: palette::MISSILE,
                damage: 5,
                speed: 4.0,
            },
        }
    }

    /// Next weapon in the cycle (wraps)
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// HUD label
    pub fn name(self) -> &'static str {
        match self {
            Weapon::Single => "SINGLE SHOT",
            Weapon::Triple => "TRIPLE SHOT",
            Weapon::Laser => "LASER BEAM",
            Weapon::Missile => "HOMING MISSILE",
        }
    }

    /// Cue played when this weapon fires
    pub fn sound(self) -> SoundEffect {
        match self {
            Weapon::Single | Weapon::Triple => SoundEffect::Shoot,
            Weapon::Laser => SoundEffect::Laser,
            Weapon::Missile => SoundEffect::Missile,
        }
    }

    /// Projectiles for one volley from the given ship.
    ///
    /// Ids are left at 0; the caller allocates them when adding to the pool.
    pub fn volley(self, player: &Player) -> Vec<Bullet> {
        let cfg = self.config();
        let ship = &player.rect;
        let make = |rect: Rect, kind: BulletKind| Bullet {
            id: 0,
            rect,
            speed: cfg.speed,
            color: cfg.color,
            damage: cfg.damage,
            kind,
            trail: Vec::new(),
            target_id: None,
        };
        let nose = |width: f32, height: f32| {
            Rect::new(ship.center_x() - width / 2.0, ship.y, width, height)
        };

        match self {
            Weapon::Single => vec![make(nose(BULLET_WIDTH, BULLET_HEIGHT), BulletKind::Bullet)],
            Weapon::Triple => {
                let wing_y = ship.y + ship.height * 0.7;
                vec![
                    make(nose(BULLET_WIDTH, BULLET_HEIGHT), BulletKind::Bullet),
                    make(
                        Rect::new(ship.x, wing_y, BULLET_WIDTH, BULLET_HEIGHT),
                        BulletKind::Bullet,
                    ),
                    make(
                        Rect::new(
                            ship.right() - BULLET_WIDTH,
                            wing_y,
                            BULLET_WIDTH,
                            BULLET_HEIGHT,
                        ),
                        BulletKind::Bullet,
                    ),
                ]
            }
            Weapon::Laser => vec![make(nose(LASER_WIDTH, LASER_HEIGHT), BulletKind::Laser)],
            Weapon::Missile => vec![make(
                nose(MISSILE_WIDTH, MISSILE_HEIGHT),
                BulletKind::Missile,
            )],
        }
    }
}
