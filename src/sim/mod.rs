//! Simulation module
//!
//! All gameplay logic lives here:
//! - Frame-coupled motion, millisecond timers
//! - RNG owned by the session state
//! - Stable iteration order (pool insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::Rect;
pub use input::{Command, Controls, InputSnapshot};
pub use state::{
    BonusItem, BonusKind, Bullet, BulletKind, Enemy, EnemyKind, GameEvent, GamePhase, GameState,
    Particle, Player, Star, TrailPoint,
};
pub use tick::tick;
pub use weapon::{Weapon, WeaponConfig};
