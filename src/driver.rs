//! Game loop driver
//!
//! Owns one session and runs step + render once per display refresh. The
//! host scheduler (requestAnimationFrame in the browser, a plain loop in
//! headless runs) calls [`LoopDriver::frame`] with its timestamp.

use crate::audio::SoundEffect;
use crate::renderer::{RenderOptions, Surface, render};
use crate::settings::Settings;
use crate::sim::input::InputSnapshot;
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::tick;
use crate::sim::weapon::Weapon;

/// Callbacks into the HUD/menu/audio layer.
///
/// Everything except `game_over` defaults to a no-op.
pub trait GameHooks {
    fn score_changed(&mut self, _score: u64) {}
    fn lives_changed(&mut self, _lives: u32) {}
    fn weapon_changed(&mut self, _weapon: Weapon) {}
    fn autopilot_changed(&mut self, _enabled: bool) {}
    fn play_sound(&mut self, _effect: SoundEffect) {}
    /// Volume, mute and other preferences were replaced mid-session
    fn settings_changed(&mut self, _settings: &Settings) {}
    /// Called exactly once per session, when the last life is lost
    fn game_over(&mut self, final_score: u64);
}

/// What a call to [`LoopDriver::frame`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Stepped and drew a frame
    Rendered,
    /// No surface available: nothing touched, retry next frame
    Skipped,
    /// Stepped, drew the final frame and stopped
    GameOver { final_score: u64 },
    /// Loop is stopped; nothing happened
    Stopped,
}

/// Per-frame driver for a single session
pub struct LoopDriver<H: GameHooks> {
    state: GameState,
    input: InputSnapshot,
    hooks: H,
    settings: Settings,
    render_options: RenderOptions,
    /// Timestamp of the last stepped frame
    last_frame_ms: Option<f64>,
    running: bool,
}

impl<H: GameHooks> LoopDriver<H> {
    /// Start a session with an unpredictable seed
    pub fn new(hooks: H, settings: Settings) -> Self {
        Self::with_state(hooks, settings, GameState::new_random())
    }

    /// Start from a prepared session
    pub fn with_state(hooks: H, settings: Settings, state: GameState) -> Self {
        let mut driver = Self {
            state,
            input: InputSnapshot::default(),
            hooks,
            render_options: RenderOptions::from(&settings),
            settings,
            last_frame_ms: None,
            running: false,
        };
        driver.begin_session();
        driver
    }

    /// Advance and draw one frame at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64, surface: Option<&mut dyn Surface>) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Stopped;
        }
        let Some(surface) = surface else {
            log::debug!("No render surface, skipping frame");
            return FrameOutcome::Skipped;
        };

        let dt_ms = self
            .last_frame_ms
            .map_or(0.0, |previous| (now_ms - previous).max(0.0));
        self.last_frame_ms = Some(now_ms);

        tick(&mut self.state, &mut self.input, dt_ms as f32);
        let game_over = self.dispatch_events();
        render(&self.state, &self.render_options, surface);

        match game_over {
            Some(final_score) => {
                self.running = false;
                FrameOutcome::GameOver { final_score }
            }
            None => FrameOutcome::Rendered,
        }
    }

    /// Stop stepping and drawing; later frames are no-ops
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Game loop stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Throw the current session away and start a fresh one
    pub fn restart(&mut self) {
        self.restart_with(GameState::new_random());
    }

    pub fn restart_with(&mut self, state: GameState) {
        self.state = state;
        // Held keys carry over; a stale command does not
        self.input.clear_command();
        self.last_frame_ms = None;
        self.begin_session();
    }

    /// Swap settings; takes effect from the next frame
    pub fn apply_settings(&mut self, settings: Settings) {
        self.state.max_particles = settings.max_particles();
        self.render_options = RenderOptions::from(&settings);
        self.hooks.settings_changed(&settings);
        self.settings = settings;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Input slot the keyboard layer writes into
    pub fn input_mut(&mut self) -> &mut InputSnapshot {
        &mut self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    fn begin_session(&mut self) {
        self.state.max_particles = self.settings.max_particles();
        self.state.autopilot = self.settings.autopilot_on_start;
        self.running = true;
        log::info!(
            "Session started (autopilot {}, {} quality, particle budget {})",
            if self.state.autopilot { "on" } else { "off" },
            self.settings.quality.as_str(),
            self.state.max_particles
        );

        // Bring the HUD in line with the fresh session
        self.hooks.score_changed(self.state.score);
        self.hooks.lives_changed(self.state.player.lives);
        self.hooks.weapon_changed(self.state.player.weapon);
        self.hooks.autopilot_changed(self.state.autopilot);
    }

    /// Forward queued events to the hooks; returns the final score on game over
    fn dispatch_events(&mut self) -> Option<u64> {
        let mut final_score = None;
        for event in self.state.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => self.hooks.score_changed(score),
                GameEvent::LivesChanged(lives) => self.hooks.lives_changed(lives),
                GameEvent::WeaponChanged(weapon) => self.hooks.weapon_changed(weapon),
                GameEvent::AutopilotToggled(on) => self.hooks.autopilot_changed(on),
                GameEvent::Sound(effect) => self.hooks.play_sound(effect),
                GameEvent::GameOver { final_score: score } => {
                    self.hooks.game_over(score);
                    final_score = Some(score);
                }
            }
        }
        final_score
    }
}
