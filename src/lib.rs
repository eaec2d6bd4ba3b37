//! Nova Strike - A vertical arcade shoot-'em-up
//!
//! Core modules:
//! - `sim`: Simulation step, entity pools, autopilot
//! - `renderer`: Render step against an abstract 2D surface
//! - `driver`: Per-frame loop driver and external callbacks
//! - `platform`: Keyboard mapping and browser canvas/scheduler glue

pub mod audio;
pub mod color;
pub mod driver;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use color::Color;
pub use driver::{FrameOutcome, GameHooks, LoopDriver};
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// Motion values are per simulation step (the game is frame-coupled),
/// timers are in milliseconds.
pub mod consts {
    /// Canvas dimensions (logical units)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Gap between the ship and the bottom edge at session start
    pub const PLAYER_START_MARGIN: f32 = 20.0;
    pub const INITIAL_LIVES: u32 = 3;

    /// Projectile sizes
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const LASER_WIDTH: f32 = 8.0;
    pub const LASER_HEIGHT: f32 = 40.0;
    pub const MISSILE_WIDTH: f32 = 10.0;
    pub const MISSILE_HEIGHT: f32 = 20.0;
    /// Missile trail length (oldest point dropped first)
    pub const MISSILE_TRAIL_LENGTH: usize = 20;
    /// Where a bullet is parked after hitting something (swept next retain)
    pub const RETIRED_BULLET_Y: f32 = -100.0;

    /// Enemy spawner
    pub const ENEMY_SPAWN_INTERVAL_MS: f32 = 1000.0;
    pub const INVADER_SPAWN_CHANCE: f64 = 0.7;
    pub const ENEMY_MIN_WIDTH: f32 = 30.0;
    pub const ENEMY_MAX_WIDTH: f32 = 50.0;
    pub const ENEMY_ASPECT: f32 = 0.8;
    pub const ASTEROID_SPEED: f32 = 2.75;
    pub const INVADER_SPEED: f32 = 3.5;
    pub const ASTEROID_HEALTH: i32 = 5;
    pub const INVADER_HEALTH: i32 = 2;
    pub const ASTEROID_POINTS: u64 = 10;
    pub const INVADER_POINTS: u64 = 25;

    /// Background
    pub const STAR_COUNT: usize = 200;

    /// Extra life awarded every this many points
    pub const SCORE_FOR_EXTRA_LIFE: u64 = 2000;

    /// Shield pickup duration
    pub const INVINCIBILITY_DURATION_MS: f32 = 15_000.0;

    /// Bonus items
    pub const BONUS_ITEM_SIZE: f32 = 30.0;
    pub const BONUS_ITEM_SPEED: f32 = 2.0;
    pub const BONUS_ITEM_SPAWN_CHANCE: f64 = 0.15;
    pub const SCORE_BONUS_POINTS: u64 = 1000;

    /// Particles
    pub const PARTICLE_GRAVITY: f32 = 0.04;
    pub const SMOKE_SPAWN_CHANCE: f64 = 0.6;
    pub const SMOKE_LIFE: f32 = 40.0;
    pub const SMOKE_GROWTH: f32 = 0.1;

    /// Autopilot look-ahead, in simulation steps (~1.5s at 60 Hz)
    pub const AUTOPILOT_HORIZON_STEPS: f32 = 90.0;
    /// Dodge corridor width as a multiple of the ship width
    pub const AUTOPILOT_SAFE_ZONE: f32 = 1.5;
    /// Vertical operating band (fractions of canvas height)
    pub const AUTOPILOT_BAND_TOP: f32 = 0.7;
    pub const AUTOPILOT_BAND_BOTTOM: f32 = 0.85;

    /// Nominal frame time used by headless runs
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
}
