//! Game state and entity records
//!
//! One `GameState` owns everything that lives across frames for a single
//! session: the player, every entity pool, timers and the RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawn;
use super::weapon::Weapon;
use crate::audio::SoundEffect;
use crate::color::{Color, palette};
use crate::consts::*;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted; further steps are ignored
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub lives: u32,
    pub weapon: Weapon,
    pub invincible: bool,
    /// Remaining shield time (ms), only meaningful while `invincible`
    pub invincibility_timer_ms: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::new(
                CANVAS_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                CANVAS_HEIGHT - PLAYER_HEIGHT - PLAYER_START_MARGIN,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            lives: INITIAL_LIVES,
            weapon: Weapon::Single,
            invincible: false,
            invincibility_timer_ms: 0.0,
        }
    }
}

impl Player {
    /// Start (or refresh) the shield window
    pub fn activate_shield(&mut self) {
        self.invincible = true;
        self.invincibility_timer_ms = INVINCIBILITY_DURATION_MS;
    }

    /// Count the shield down; clears the flag once the timer runs out
    pub fn tick_shield(&mut self, dt_ms: f32) {
        if !self.invincible {
            return;
        }
        self.invincibility_timer_ms -= dt_ms;
        if self.invincibility_timer_ms <= 0.0 {
            self.invincibility_timer_ms = 0.0;
            self.invincible = false;
        }
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Asteroid,
    Invader,
}

impl EnemyKind {
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Asteroid => ASTEROID_SPEED,
            EnemyKind::Invader => INVADER_SPEED,
        }
    }

    pub fn health(self) -> i32 {
        match self {
            EnemyKind::Asteroid => ASTEROID_HEALTH,
            EnemyKind::Invader => INVADER_HEALTH,
        }
    }

    /// Score awarded for destroying one
    pub fn points(self) -> u64 {
        match self {
            EnemyKind::Asteroid => ASTEROID_POINTS,
            EnemyKind::Invader => INVADER_POINTS,
        }
    }

    /// Color mixed into its explosion
    pub fn color(self) -> Color {
        match self {
            EnemyKind::Asteroid => palette::ASTEROID_FILL,
            EnemyKind::Invader => palette::INVADER,
        }
    }
}

/// A descending enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub kind: EnemyKind,
    pub speed: f32,
    pub health: i32,
    /// Outline offsets from the center, generated once at spawn (asteroids only)
    pub shape: Option<Vec<Vec2>>,
}

impl Enemy {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletKind {
    Bullet,
    Laser,
    Missile,
}

/// Trail point for missile smoke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub alpha: f32,
}

/// Alpha lost by every trail point per step
pub const TRAIL_FADE: f32 = 0.05;

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub rect: Rect,
    pub speed: f32,
    pub color: Color,
    pub damage: i32,
    pub kind: BulletKind,
    /// Trail history, oldest first (missiles only)
    pub trail: Vec<TrailPoint>,
    /// Enemy being homed on, re-resolved by id every step (missiles only)
    pub target_id: Option<u32>,
}

impl Bullet {
    /// Append the exhaust point, age the existing ones and cap the length
    pub fn record_trail(&mut self) {
        self.trail.push(TrailPoint {
            pos: Vec2::new(self.rect.center_x(), self.rect.bottom()),
            alpha: 1.0,
        });
        if self.trail.len() > MISSILE_TRAIL_LENGTH {
            self.trail.remove(0);
        }
        for point in &mut self.trail {
            point.alpha = (point.alpha - TRAIL_FADE).max(0.0);
        }
    }

    /// Still at least partly below the top edge
    #[inline]
    pub fn is_on_screen(&self) -> bool {
        self.rect.y > -self.rect.height
    }
}

/// An explosion spark or a puff of thrust smoke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Base opacity, scaled by remaining life when drawn
    pub alpha: f32,
    pub radius: f32,
    /// Remaining life in steps
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    /// Remaining life as a fraction (1 = fresh)
    #[inline]
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

/// Bonus item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// Temporary invincibility
    Shield,
    /// Flat score bonus
    Score,
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusItem {
    pub id: u32,
    pub rect: Rect,
    pub kind: BonusKind,
    pub speed: f32,
}

/// Things the outside world wants to hear about, drained by the loop driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u32),
    WeaponChanged(Weapon),
    AutopilotToggled(bool),
    Sound(SoundEffect),
    /// Emitted exactly once, when lives reach zero
    GameOver { final_score: u64 },
}

/// Default cap on explosion + smoke particles
pub const DEFAULT_PARTICLE_BUDGET: usize = 2000;

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    /// Score (never decreases within a session)
    pub score: u64,
    /// Score at which the next extra life is granted
    pub next_life_score: u64,
    /// Autopilot drives the ship instead of held input
    pub autopilot: bool,
    /// Ship is thrusting or firing this frame (exhaust flame)
    pub thrusting: bool,
    /// Accumulated frame time (ms) since session start
    pub clock_ms: f64,
    /// Session clock at the last volley; the next one needs strictly more
    /// than the weapon cooldown to have elapsed
    pub last_shot_ms: Option<f64>,
    /// Time until the next enemy spawn (ms, never negative)
    pub spawn_timer_ms: f32,
    /// Player projectiles (insertion order)
    pub bullets: Vec<Bullet>,
    /// Enemies (insertion order = collision priority)
    pub enemies: Vec<Enemy>,
    /// Explosion sparks
    pub particles: Vec<Particle>,
    /// Thrust smoke
    pub smoke: Vec<Particle>,
    /// Background stars (fixed population)
    pub stars: Vec<Star>,
    pub bonus_items: Vec<BonusItem>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Cap on `particles.len() + smoke.len()`
    pub max_particles: usize,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given RNG seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = spawn::starfield(&mut rng, STAR_COUNT);
        Self {
            phase: GamePhase::Playing,
            player: Player::default(),
            score: 0,
            next_life_score: SCORE_FOR_EXTRA_LIFE,
            autopilot: false,
            thrusting: false,
            clock_ms: 0.0,
            last_shot_ms: None,
            spawn_timer_ms: 0.0,
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            smoke: Vec::new(),
            stars,
            bonus_items: Vec::new(),
            events: Vec::new(),
            max_particles: DEFAULT_PARTICLE_BUDGET,
            rng,
            next_id: 1,
        }
    }

    /// Create a session with an unpredictable seed
    pub fn new_random() -> Self {
        Self::new(rand::random())
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Live enemy lookup by id (a miss means the enemy is gone)
    pub fn live_enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id && e.is_alive())
    }

    /// Add points and hand out every extra life the new total has earned
    pub fn award_score(&mut self, points: u64) {
        self.score += points;
        self.emit(GameEvent::ScoreChanged(self.score));

        while self.score >= self.next_life_score {
            self.player.lives += 1;
            self.next_life_score += SCORE_FOR_EXTRA_LIFE;
            log::info!(
                "Extra life at {} points ({} lives)",
                self.score,
                self.player.lives
            );
            self.emit(GameEvent::LivesChanged(self.player.lives));
            self.emit(GameEvent::Sound(SoundEffect::Powerup));
        }
    }

    /// Drop every entity whose liveness has ended
    pub fn retain_live(&mut self) {
        self.bullets.retain(Bullet::is_on_screen);
        self.enemies.retain(Enemy::is_alive);
        self.particles.retain(|p| p.life > 0.0);
        self.smoke.retain(|p| p.life > 0.0);
        self.bonus_items.retain(|b| b.rect.y < CANVAS_HEIGHT);
    }

    /// Trim the oldest particles once the budget is exceeded
    pub fn enforce_particle_budget(&mut self) {
        let total = self.particles.len() + self.smoke.len();
        if total <= self.max_particles {
            return;
        }
        let mut excess = total - self.max_particles;
        let from_sparks = excess.min(self.particles.len());
        self.particles.drain(..from_sparks);
        excess -= from_sparks;
        let from_smoke = excess.min(self.smoke.len());
        self.smoke.drain(..from_smoke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.lives, INITIAL_LIVES);
        assert_eq!(state.player.weapon, Weapon::Single);
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert!(state.enemies.is_empty());
        assert_eq!(state.next_life_score, SCORE_FOR_EXTRA_LIFE);
    }

    #[test]
    fn test_extra_life_single_crossing() {
        let mut state = GameState::new(1);
        state.score = 1990;
        state.award_score(20);
        assert_eq!(state.score, 2010);
        assert_eq!(state.player.lives, INITIAL_LIVES + 1);
        assert_eq!(state.next_life_score, 4000);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::LivesChanged(_)))
                .count(),
            1
        );
    }

    #[test]
    fn test_extra_life_multiple_crossings() {
        let mut state = GameState::new(1);
        state.score = 1990;
        state.award_score(4020);
        assert_eq!(state.score, 6010);
        assert_eq!(state.player.lives, INITIAL_LIVES + 3);
        assert_eq!(state.next_life_score, 8000);
    }

    #[test]
    fn test_shield_countdown() {
        let mut player = Player::default();
        player.activate_shield();
        player.tick_shield(INVINCIBILITY_DURATION_MS - 1.0);
        assert!(player.invincible);
        player.tick_shield(5.0);
        assert!(!player.invincible);
        assert_eq!(player.invincibility_timer_ms, 0.0);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut bullet = Bullet {
            id: 1,
            rect: Rect::new(0.0, 100.0, MISSILE_WIDTH, MISSILE_HEIGHT),
            speed: 4.0,
            color: palette::MISSILE,
            damage: 5,
            kind: BulletKind::Missile,
            trail: Vec::new(),
            target_id: None,
        };
        for i in 0..30 {
            bullet.rect.y = 100.0 - i as f32;
            bullet.record_trail();
        }
        assert_eq!(bullet.trail.len(), MISSILE_TRAIL_LENGTH);
        // Newest point is last and freshest
        let newest = bullet.trail.last().copied().unwrap_or(TrailPoint {
            pos: Vec2::ZERO,
            alpha: 0.0,
        });
        assert_eq!(newest.pos.y, 100.0 - 29.0 + MISSILE_HEIGHT);
        assert!(bullet.trail.iter().all(|p| p.alpha >= 0.0));
        assert!(bullet.trail[0].alpha <= newest.alpha);
    }

    #[test]
    fn test_particle_budget_drops_oldest() {
        let mut state = GameState::new(1);
        state.max_particles = 3;
        for i in 0..5 {
            state.particles.push(Particle {
                pos: Vec2::new(i as f32, 0.0),
                vel: Vec2::ZERO,
                color: palette::SMOKE,
                alpha: 1.0,
                radius: 1.0,
                life: 10.0,
                max_life: 10.0,
            });
        }
        state.enforce_particle_budget();
        assert_eq!(state.particles.len(), 3);
        assert_eq!(state.particles[0].pos.x, 2.0);
    }
}
