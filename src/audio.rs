//! Audio system using Web Audio API
//!
//! Every cue is synthesized from oscillators, so no sample files ship with
//! the game. Native builds get a silent manager that only logs.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound cues raised by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Single or triple shot
    Shoot,
    /// Laser beam
    Laser,
    /// Homing missile launch
    Missile,
    /// Enemy or ship destroyed
    Explosion,
    /// Pickup collected or extra life
    Powerup,
    /// Ship collided with an enemy
    PlayerHit,
}

/// Volume state shared by both backends
#[derive(Debug, Clone, Copy, PartialEq)]
struct Mix {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Mix {
    fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use native::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Mix, SoundEffect};
    use crate::settings::Settings;

    /// Silence floor for exponential ramps (must stay above zero)
    const RAMP_FLOOR: f32 = 0.0001;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        mix: Mix,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                mix: Mix::from_settings(settings),
            }
        }

        /// Pick up volume changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.mix = Mix::from_settings(settings);
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            let vol = self.mix.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Shoot => {
                    self.tone(ctx, 440.0, OscillatorType::Triangle, 0.1, vol * 0.1);
                    self.tone(ctx, 880.0, OscillatorType::Sine, 0.1, vol * 0.1);
                }
                SoundEffect::Missile => {
                    self.tone(ctx, 220.0, OscillatorType::Sawtooth, 0.2, vol * 0.2);
                }
                SoundEffect::Laser => self.play_laser(ctx, vol),
                SoundEffect::Explosion => {
                    self.tone(ctx, 16.0, OscillatorType::Sawtooth, 0.5, vol * 0.4);
                    self.tone(ctx, 55.0, OscillatorType::Square, 0.4, vol * 0.3);
                }
                SoundEffect::Powerup => {
                    for freq in [523.25, 659.25, 783.99] {
                        self.tone(ctx, freq, OscillatorType::Sine, 0.1, vol * 0.2);
                    }
                }
                SoundEffect::PlayerHit => {
                    self.tone(ctx, 220.0, OscillatorType::Square, 0.3, vol * 0.3);
                    self.tone(ctx, 110.0, OscillatorType::Sawtooth, 0.3, vol * 0.3);
                }
            }
        }

        /// Create an oscillator routed through its own gain node
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Fixed-pitch tone decaying to silence over `duration` seconds
        fn tone(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
            duration: f64,
            peak: f32,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(peak, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(RAMP_FLOOR, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration).ok();
        }

        /// Laser - rising zap
        fn play_laser(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 800.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(800.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(1200.0, t + 0.1)
                .ok();
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(RAMP_FLOOR, t + 0.2)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::{Mix, SoundEffect};
    use crate::settings::Settings;

    /// Silent stand-in for headless runs
    pub struct AudioManager {
        mix: Mix,
        played: usize,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            Self {
                mix: Mix::from_settings(settings),
                played: 0,
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.mix = Mix::from_settings(settings);
        }

        pub fn play(&mut self, effect: SoundEffect) {
            if self.mix.effective_volume() <= 0.0 {
                return;
            }
            self.played += 1;
            log::trace!("sfx {:?}", effect);
        }

        /// Cues that would have been audible so far
        pub fn played(&self) -> usize {
            self.played
        }
    }
}
