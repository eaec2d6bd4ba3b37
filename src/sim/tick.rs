//! Per-frame simulation step
//!
//! Motion is frame-coupled (fixed displacement per step); only timers read the
//! elapsed frame time. Stages run in a fixed order and later stages observe
//! the mutations of earlier ones.

use glam::Vec2;
use rand::Rng;

use super::autopilot;
use super::input::{Command, Controls, InputSnapshot};
use super::spawn;
use super::state::{BonusKind, BulletKind, EnemyKind, GameEvent, GamePhase, GameState};
use crate::audio::SoundEffect;
use crate::color::palette;
use crate::consts::*;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &mut InputSnapshot, dt_ms: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    let dt_ms = dt_ms.max(0.0);
    state.clock_ms += dt_ms as f64;

    if let Some(command) = input.take_command() {
        apply_command(state, command);
    }

    let controls = if state.autopilot {
        autopilot::steer(&state.player, &state.enemies, &state.bonus_items)
    } else {
        input.held
    };
    state.thrusting = controls.up || controls.fire;

    scroll_stars(state);
    move_player(state, &controls);
    state.player.tick_shield(dt_ms);
    fire_weapon(state, controls.fire);
    advance_bullets(state);

    state.spawn_timer_ms = (state.spawn_timer_ms - dt_ms).max(0.0);
    if state.spawn_timer_ms <= 0.0 {
        spawn::spawn_enemy(state);
        state.spawn_timer_ms = ENEMY_SPAWN_INTERVAL_MS;
    }
    advance_enemies(state);

    resolve_bullet_hits(state);
    resolve_player_hits(state);
    if state.phase == GamePhase::GameOver {
        state.retain_live();
        return;
    }

    advance_bonus_items(state);
    advance_particles(state);
    spawn::maybe_emit_smoke(state);

    state.retain_live();
}

fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::CycleWeapon => {
            let weapon = state.player.weapon.next();
            state.player.weapon = weapon;
            log::debug!("Weapon: {}", weapon.name());
            state.emit(GameEvent::WeaponChanged(weapon));
        }
        Command::ToggleAutopilot => {
            state.autopilot = !state.autopilot;
            log::info!(
                "Autopilot {}",
                if state.autopilot { "engaged" } else { "off" }
            );
            state.emit(GameEvent::AutopilotToggled(state.autopilot));
        }
    }
}

fn scroll_stars(state: &mut GameState) {
    for star in &mut state.stars {
        star.pos.y += star.speed;
        if star.pos.y > CANVAS_HEIGHT {
            star.pos.y = 0.0;
            star.pos.x = state.rng.random::<f32>() * CANVAS_WIDTH;
        }
    }
}

/// Fixed displacement per held direction, clamped to the canvas. Diagonals
/// are not normalized.
fn move_player(state: &mut GameState, controls: &Controls) {
    let ship = &mut state.player.rect;
    if controls.left {
        ship.x -= PLAYER_SPEED;
    }
    if controls.right {
        ship.x += PLAYER_SPEED;
    }
    if controls.up {
        ship.y -= PLAYER_SPEED;
    }
    if controls.down {
        ship.y += PLAYER_SPEED;
    }
    ship.x = ship.x.clamp(0.0, CANVAS_WIDTH - ship.width);
    ship.y = ship.y.clamp(0.0, CANVAS_HEIGHT - ship.height);
}

fn fire_weapon(state: &mut GameState, fire_held: bool) {
    if !fire_held {
        return;
    }
    let weapon = state.player.weapon;
    if let Some(last) = state.last_shot_ms {
        if state.clock_ms - last <= weapon.config().cooldown_ms as f64 {
            return;
        }
    }

    for mut bullet in weapon.volley(&state.player) {
        bullet.id = state.next_entity_id();
        state.bullets.push(bullet);
    }
    state.last_shot_ms = Some(state.clock_ms);
    state.emit(GameEvent::Sound(weapon.sound()));
}

fn advance_bullets(state: &mut GameState) {
    for i in 0..state.bullets.len() {
        if state.bullets[i].kind != BulletKind::Missile {
            state.bullets[i].rect.y -= state.bullets[i].speed;
            continue;
        }

        // Weak reference: re-resolve the target id against live enemies
        let target_live = state.bullets[i]
            .target_id
            .is_some_and(|id| state.live_enemy(id).is_some());
        if !target_live {
            let target = acquire_target(state);
            state.bullets[i].target_id = target;
        }

        let aim = state.bullets[i]
            .target_id
            .and_then(|id| state.live_enemy(id))
            .map(|enemy| enemy.rect.origin());

        let missile = &mut state.bullets[i];
        match aim {
            Some(target) => {
                let heading = (target - missile.rect.origin()).normalize_or_zero();
                missile.rect.x += heading.x * missile.speed;
                missile.rect.y += heading.y * missile.speed;
            }
            None => missile.rect.y -= missile.speed,
        }
        missile.record_trail();
    }
}

/// Highest `(y / canvas height) * width`: low on screen and large first
fn acquire_target(state: &GameState) -> Option<u32> {
    state
        .enemies
        .iter()
        .filter(|e| e.is_alive())
        .map(|e| (e.id, (e.rect.y / CANVAS_HEIGHT) * e.rect.width))
        .fold(None, |best: Option<(u32, f32)>, (id, threat)| match best {
            Some((_, highest)) if highest >= threat => best,
            _ => Some((id, threat)),
        })
        .map(|(id, _)| id)
}

fn advance_enemies(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.rect.y += enemy.speed;
        if enemy.rect.y > CANVAS_HEIGHT {
            enemy.health = 0;
        }
    }
}

/// Each bullet hits at most the first live enemy it overlaps (enemy insertion
/// order) and is then parked off-screen for the end-of-step sweep.
fn resolve_bullet_hits(state: &mut GameState) {
    let mut kills: Vec<(EnemyKind, Vec2, f32)> = Vec::new();

    for bullet in &mut state.bullets {
        let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.is_alive() && e.rect.overlaps(&bullet.rect))
        else {
            continue;
        };

        bullet.rect.y = RETIRED_BULLET_Y;
        enemy.health -= bullet.damage;
        if !enemy.is_alive() {
            kills.push((enemy.kind, enemy.rect.center(), enemy.rect.width));
        }
    }

    for (kind, center, size) in kills {
        spawn::spawn_explosion(state, center, kind.color(), size);
        spawn::maybe_drop_bonus(state, center);
        state.award_score(kind.points());
    }
}

/// Each overlapping enemy costs one life; the shield blocks all of them
fn resolve_player_hits(state: &mut GameState) {
    for i in 0..state.enemies.len() {
        if state.player.invincible {
            return;
        }
        let enemy = &mut state.enemies[i];
        if !enemy.is_alive() || !enemy.rect.overlaps(&state.player.rect) {
            continue;
        }
        enemy.health = 0;

        let ship = state.player.rect;
        spawn::spawn_explosion(state, ship.center(), palette::PLAYER_HIT, ship.width);
        state.emit(GameEvent::Sound(SoundEffect::PlayerHit));

        state.player.lives = state.player.lives.saturating_sub(1);
        state.emit(GameEvent::LivesChanged(state.player.lives));
        if state.player.lives == 0 {
            state.phase = GamePhase::GameOver;
            log::info!("Game over: final score {}", state.score);
            state.emit(GameEvent::GameOver {
                final_score: state.score,
            });
            return;
        }
    }
}

fn advance_bonus_items(state: &mut GameState) {
    let ship = state.player.rect;
    let mut collected = Vec::new();
    state.bonus_items.retain_mut(|item| {
        item.rect.y += item.speed;
        if item.rect.overlaps(&ship) {
            collected.push(item.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        match kind {
            BonusKind::Shield => state.player.activate_shield(),
            BonusKind::Score => state.award_score(SCORE_BONUS_POINTS),
        }
        state.emit(GameEvent::Sound(SoundEffect::Powerup));
    }
}

fn advance_particles(state: &mut GameState) {
    for spark in &mut state.particles {
        spark.vel.y += PARTICLE_GRAVITY;
        spark.pos += spark.vel;
        spark.life -= 1.0;
    }
    for puff in &mut state.smoke {
        puff.pos += puff.vel;
        puff.life -= 1.0;
        puff.radius += SMOKE_GROWTH;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Rect;
    use crate::sim::state::{BonusItem, Bullet, Enemy};
    use crate::sim::weapon::Weapon;
    use proptest::prelude::*;

    const DT: f32 = 16.0;

    /// Session with the enemy spawner pushed far into the future
    fn quiet_state() -> GameState {
        let mut state = GameState::new(12345);
        state.spawn_timer_ms = 1.0e9;
        state
    }

    fn add_enemy(state: &mut GameState, kind: EnemyKind, rect: Rect) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            rect,
            kind,
            speed: kind.speed(),
            health: kind.health(),
            shape: None,
        });
        id
    }

    fn add_bullet(state: &mut GameState, kind: BulletKind, rect: Rect, speed: f32) -> u32 {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            rect,
            speed,
            color: palette::MISSILE,
            damage: 1,
            kind,
            trail: Vec::new(),
            target_id: None,
        });
        id
    }

    fn count_events(state: &GameState, pred: impl Fn(&GameEvent) -> bool) -> usize {
        state.events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_kill_crossing_life_threshold() {
        let mut state = quiet_state();
        state.score = 1990;
        let enemy = add_enemy(&mut state, EnemyKind::Invader, Rect::new(100.0, 100.0, 40.0, 32.0));
        state.enemies[0].health = 1;
        add_bullet(&mut state, BulletKind::Bullet, Rect::new(110.0, 110.0, 5.0, 15.0), 8.0);

        let mut input = InputSnapshot::default();
        tick(&mut state, &mut input, DT);

        assert!(state.live_enemy(enemy).is_none());
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 1990 + INVADER_POINTS);
        assert_eq!(state.player.lives, INITIAL_LIVES + 1);
        assert_eq!(state.next_life_score, 4000);
        assert_eq!(count_events(&state, |e| matches!(e, GameEvent::LivesChanged(_))), 1);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_bullet_hits_only_first_enemy() {
        let mut state = quiet_state();
        let first = add_enemy(&mut state, EnemyKind::Asteroid, Rect::new(100.0, 100.0, 40.0, 32.0));
        let second = add_enemy(&mut state, EnemyKind::Asteroid, Rect::new(100.0, 100.0, 40.0, 32.0));
        add_bullet(&mut state, BulletKind::Bullet, Rect::new(110.0, 110.0, 5.0, 15.0), 8.0);

        tick(&mut state, &mut InputSnapshot::default(), DT);

        assert!(state.bullets.is_empty());
        let health = |id| state.live_enemy(id).map(|e| e.health);
        assert_eq!(health(first), Some(ASTEROID_HEALTH - 1));
        assert_eq!(health(second), Some(ASTEROID_HEALTH));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_last_life_collision_ends_game() {
        let mut state = quiet_state();
        state.score = 120;
        state.player.lives = 1;
        let ship = state.player.rect;
        add_enemy(&mut state, EnemyKind::Invader, Rect::new(ship.x, ship.y, 40.0, 32.0));

        tick(&mut state, &mut InputSnapshot::default(), DT);

        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.enemies.is_empty());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { final_score: 120 }));
        assert!(events.contains(&GameEvent::Sound(SoundEffect::PlayerHit)));

        // Further steps are inert
        let clock = state.clock_ms;
        tick(&mut state, &mut InputSnapshot::default(), DT);
        assert!(state.events.is_empty());
        assert_eq!(state.clock_ms, clock);
    }

    #[test]
    fn test_simultaneous_overlaps_each_cost_a_life() {
        let mut state = quiet_state();
        let ship = state.player.rect;
        add_enemy(&mut state, EnemyKind::Invader, Rect::new(ship.x, ship.y, 40.0, 32.0));
        add_enemy(&mut state, EnemyKind::Invader, Rect::new(ship.x + 5.0, ship.y, 40.0, 32.0));

        tick(&mut state, &mut InputSnapshot::default(), DT);

        assert_eq!(state.player.lives, INITIAL_LIVES - 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_shield_blocks_collision() {
        let mut state = quiet_state();
        state.player.activate_shield();
        let ship = state.player.rect;
        add_enemy(&mut state, EnemyKind::Invader, Rect::new(ship.x, ship.y, 40.0, 32.0));

        tick(&mut state, &mut InputSnapshot::default(), DT);

        assert_eq!(state.player.lives, INITIAL_LIVES);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.player.invincibility_timer_ms < INVINCIBILITY_DURATION_MS);
    }

    #[test]
    fn test_fire_is_rate_limited() {
        let mut state = quiet_state();
        let mut input = InputSnapshot::new(Controls {
            fire: true,
            ..Default::default()
        });
        let mut shots = 0;
        for _ in 0..20 {
            tick(&mut state, &mut input, DT);
            shots += count_events(&state, |e| *e == GameEvent::Sound(SoundEffect::Shoot));
            state.events.clear();
        }
        // Frame 1, then once more than 200ms have elapsed (frame 14)
        assert_eq!(shots, 2);
    }

    #[test]
    fn test_fire_waits_past_exact_cooldown() {
        let mut state = quiet_state();
        let mut input = InputSnapshot::new(Controls {
            fire: true,
            ..Default::default()
        });
        let mut shot_clocks = Vec::new();
        for _ in 0..6 {
            tick(&mut state, &mut input, 50.0);
            if state.drain_events().contains(&GameEvent::Sound(SoundEffect::Shoot)) {
                shot_clocks.push(state.clock_ms);
            }
        }
        // 250 is exactly one 200ms cooldown after 50, so the second shot waits
        assert_eq!(shot_clocks, vec![50.0, 300.0]);
    }

    #[test]
    fn test_triple_volley_from_table() {
        let mut state = quiet_state();
        state.player.weapon = Weapon::Triple;
        let mut input = InputSnapshot::new(Controls {
            fire: true,
            ..Default::default()
        });
        tick(&mut state, &mut input, DT);

        let cfg = Weapon::Triple.config();
        assert_eq!(state.bullets.len(), 3);
        assert!(state.bullets.iter().all(|b| b.damage == cfg.damage && b.speed == cfg.speed));
        let mut ids: Vec<u32> = state.bullets.iter().map(|b| b.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert_eq!(state.last_shot_ms, Some(state.clock_ms));
    }

    #[test]
    fn test_missile_reacquires_lost_target() {
        let mut state = quiet_state();
        let a = add_enemy(&mut state, EnemyKind::Invader, Rect::new(100.0, 100.0, 40.0, 32.0));
        let b = add_enemy(&mut state, EnemyKind::Invader, Rect::new(600.0, 300.0, 30.0, 24.0));
        add_bullet(&mut state, BulletKind::Missile, Rect::new(400.0, 400.0, 10.0, 20.0), 4.0);
        state.bullets[0].target_id = Some(999);

        tick(&mut state, &mut InputSnapshot::default(), DT);
        // b: 300/600*30 = 15 beats a: 100/600*40 = 6.7
        assert_eq!(state.bullets[0].target_id, Some(b));
        assert!(state.bullets[0].rect.x > 400.0);
        assert_eq!(state.bullets[0].trail.len(), 1);

        // Target destroyed: next step re-resolves to the remaining enemy
        if let Some(enemy) = state.enemies.iter_mut().find(|e| e.id == b) {
            enemy.health = 0;
        }
        tick(&mut state, &mut InputSnapshot::default(), DT);
        assert_eq!(state.bullets[0].target_id, Some(a));
    }

    #[test]
    fn test_missile_keeps_live_target() {
        let mut state = quiet_state();
        let a = add_enemy(&mut state, EnemyKind::Invader, Rect::new(100.0, 100.0, 40.0, 32.0));
        add_bullet(&mut state, BulletKind::Missile, Rect::new(400.0, 400.0, 10.0, 20.0), 4.0);
        tick(&mut state, &mut InputSnapshot::default(), DT);
        assert_eq!(state.bullets[0].target_id, Some(a));

        // A bigger threat appears, but the current target is still alive
        add_enemy(&mut state, EnemyKind::Invader, Rect::new(600.0, 350.0, 50.0, 40.0));
        tick(&mut state, &mut InputSnapshot::default(), DT);
        assert_eq!(state.bullets[0].target_id, Some(a));
    }

    #[test]
    fn test_missile_without_enemies_flies_straight() {
        let mut state = quiet_state();
        add_bullet(&mut state, BulletKind::Missile, Rect::new(400.0, 400.0, 10.0, 20.0), 4.0);
        state.bullets[0].target_id = Some(42);

        tick(&mut state, &mut InputSnapshot::default(), DT);

        let missile = &state.bullets[0];
        assert_eq!(missile.target_id, None);
        assert_eq!(missile.rect.x, 400.0);
        assert_eq!(missile.rect.y, 396.0);
    }

    #[test]
    fn test_offscreen_entities_are_removed() {
        let mut state = quiet_state();
        add_enemy(&mut state, EnemyKind::Asteroid, Rect::new(100.0, CANVAS_HEIGHT - 1.0, 40.0, 32.0));
        add_bullet(&mut state, BulletKind::Bullet, Rect::new(100.0, -10.0, 5.0, 15.0), 8.0);
        state.bonus_items.push(BonusItem {
            id: 77,
            rect: Rect::new(100.0, CANVAS_HEIGHT - 1.0, BONUS_ITEM_SIZE, BONUS_ITEM_SIZE),
            kind: BonusKind::Score,
            speed: BONUS_ITEM_SPEED,
        });

        tick(&mut state, &mut InputSnapshot::default(), DT);

        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert!(state.bonus_items.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_enemy_spawn_interval() {
        let mut state = GameState::new(9);
        let mut input = InputSnapshot::default();
        tick(&mut state, &mut input, 100.0);
        assert_eq!(state.enemies.len(), 1);
        for _ in 0..9 {
            tick(&mut state, &mut input, 100.0);
        }
        assert_eq!(state.enemies.len(), 1);
        tick(&mut state, &mut input, 100.0);
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_weapon_toggle_fires_once() {
        let mut state = quiet_state();
        let mut input = InputSnapshot::default();
        input.push_command(Command::CycleWeapon);
        tick(&mut state, &mut input, DT);
        tick(&mut state, &mut input, DT);
        assert_eq!(state.player.weapon, Weapon::Triple);
        assert_eq!(
            count_events(&state, |e| matches!(e, GameEvent::WeaponChanged(_))),
            1
        );
    }

    #[test]
    fn test_autopilot_overrides_held_input() {
        let mut state = quiet_state();
        let start = state.player.rect;
        let mut input = InputSnapshot::new(Controls {
            left: true,
            ..Default::default()
        });
        input.push_command(Command::ToggleAutopilot);
        tick(&mut state, &mut input, DT);

        assert!(state.autopilot);
        // Ship starts below the band: autopilot climbs and ignores the held key
        assert_eq!(state.player.rect.x, start.x);
        assert_eq!(state.player.rect.y, start.y - PLAYER_SPEED);
        assert!(state.thrusting);
        assert!(input.held.left);
    }

    #[test]
    fn test_bonus_pickups() {
        let mut state = quiet_state();
        let ship = state.player.rect;
        state.bonus_items.push(BonusItem {
            id: 1,
            rect: Rect::new(ship.x, ship.y, BONUS_ITEM_SIZE, BONUS_ITEM_SIZE),
            kind: BonusKind::Shield,
            speed: BONUS_ITEM_SPEED,
        });
        state.bonus_items.push(BonusItem {
            id: 2,
            rect: Rect::new(ship.x + 5.0, ship.y, BONUS_ITEM_SIZE, BONUS_ITEM_SIZE),
            kind: BonusKind::Score,
            speed: BONUS_ITEM_SPEED,
        });

        tick(&mut state, &mut InputSnapshot::default(), DT);

        assert!(state.bonus_items.is_empty());
        assert!(state.player.invincible);
        assert_eq!(state.player.invincibility_timer_ms, INVINCIBILITY_DURATION_MS);
        assert_eq!(state.score, SCORE_BONUS_POINTS);
        assert_eq!(
            count_events(&state, |e| *e == GameEvent::Sound(SoundEffect::Powerup)),
            2
        );
    }

    #[test]
    fn test_player_clamped_to_canvas() {
        let mut state = quiet_state();
        let mut input = InputSnapshot::new(Controls {
            left: true,
            down: true,
            ..Default::default()
        });
        for _ in 0..200 {
            tick(&mut state, &mut input, DT);
        }
        assert_eq!(state.player.rect.x, 0.0);
        assert_eq!(state.player.rect.y, CANVAS_HEIGHT - PLAYER_HEIGHT);
    }

    #[test]
    fn test_explosion_particles_expire() {
        let mut state = quiet_state();
        spawn::spawn_explosion(&mut state, Vec2::new(400.0, 300.0), palette::INVADER, 40.0);
        let mut input = InputSnapshot::default();
        for _ in 0..121 {
            tick(&mut state, &mut input, DT);
        }
        assert!(state.particles.is_empty());
        assert!(state.smoke.iter().all(|p| p.life > 0.0));
    }

    #[test]
    fn test_stars_wrap() {
        let mut state = quiet_state();
        state.stars.truncate(1);
        state.stars[0].pos.y = CANVAS_HEIGHT - 0.1;
        tick(&mut state, &mut InputSnapshot::default(), DT);
        assert_eq!(state.stars[0].pos.y, 0.0);
        assert!((0.0..=CANVAS_WIDTH).contains(&state.stars[0].pos.x));
    }

    fn controls_strategy() -> impl Strategy<Value = Controls> {
        any::<(bool, bool, bool, bool, bool)>().prop_map(|(up, down, left, right, fire)| {
            Controls {
                up,
                down,
                left,
                right,
                fire,
            }
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_player_stays_on_canvas(
            seed in any::<u64>(),
            frames in prop::collection::vec(controls_strategy(), 1..200),
        ) {
            let mut state = GameState::new(seed);
            state.player.activate_shield();
            let mut input = InputSnapshot::default();
            for held in frames {
                input.held = held;
                tick(&mut state, &mut input, DT);
                let ship = state.player.rect;
                prop_assert!(ship.x >= 0.0 && ship.right() <= CANVAS_WIDTH);
                prop_assert!(ship.y >= 0.0 && ship.bottom() <= CANVAS_HEIGHT);
            }
        }

        #[test]
        fn prop_shots_respect_cooldown(
            weapon_index in 0usize..4,
            dts in prop::collection::vec(1u32..50, 1..300),
        ) {
            let weapon = Weapon::ALL[weapon_index];
            let mut state = quiet_state();
            state.player.weapon = weapon;
            let mut input = InputSnapshot::new(Controls { fire: true, ..Default::default() });

            let mut last_shot: Option<f64> = None;
            for dt in dts {
                tick(&mut state, &mut input, dt as f32);
                if state.drain_events().contains(&GameEvent::Sound(weapon.sound())) {
                    if let Some(previous) = last_shot {
                        prop_assert!(state.clock_ms - previous > weapon.config().cooldown_ms as f64);
                    }
                    last_shot = Some(state.clock_ms);
                }
            }
        }

        #[test]
        fn prop_score_never_decreases(
            seed in any::<u64>(),
            autopilot in any::<bool>(),
            frames in prop::collection::vec(controls_strategy(), 1..300),
        ) {
            let mut state = GameState::new(seed);
            state.autopilot = autopilot;
            state.player.lives = 1000;
            let mut input = InputSnapshot::default();
            let mut previous = state.score;
            for (i, held) in frames.into_iter().enumerate() {
                input.held = held;
                if i % 50 == 0 {
                    input.push_command(Command::CycleWeapon);
                }
                tick(&mut state, &mut input, DT);
                prop_assert!(state.score >= previous);
                prop_assert!(state.enemies.iter().all(|e| e.health > 0));
                prop_assert!(state.particles.iter().all(|p| p.life > 0.0));
                prop_assert!(state.smoke.iter().all(|p| p.life > 0.0));
                prop_assert!(state.bullets.iter().all(|b| b.is_on_screen()));
                prop_assert!(state.bonus_items.iter().all(|b| b.rect.y < CANVAS_HEIGHT));
                previous = state.score;
            }
        }
    }
}
