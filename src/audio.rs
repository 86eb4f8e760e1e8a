//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is a single oscillator with a frequency sweep and a gain
//! envelope, described by a `Tone`.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Auto-fire
    Shoot,
    /// Enemy destroyed, or the final hit on the player
    Explosion,
    /// Session start
    Powerup,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// How an `AudioParam` moves to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    Linear,
    /// Target must be > 0
    Exponential,
}

/// A value sweep from `from` to `to` over `time` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub from: f32,
    pub to: f32,
    pub ramp: Ramp,
    pub time: f64,
}

/// Complete recipe for one sound effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub frequency: Sweep,
    pub gain: Sweep,
    /// Oscillator stops after this many seconds
    pub duration: f64,
}

impl SoundEffect {
    pub fn tone(self) -> Tone {
        match self {
            // Short downward zap
            SoundEffect::Shoot => Tone {
                waveform: Waveform::Square,
                frequency: Sweep { from: 400.0, to: 100.0, ramp: Ramp::Exponential, time: 0.1 },
                gain: Sweep { from: 0.1, to: 0.01, ramp: Ramp::Exponential, time: 0.1 },
                duration: 0.1,
            },
            // Noisy low rumble falling away
            SoundEffect::Explosion => Tone {
                waveform: Waveform::Sawtooth,
                frequency: Sweep { from: 100.0, to: 0.01, ramp: Ramp::Exponential, time: 0.2 },
                gain: Sweep { from: 0.2, to: 0.01, ramp: Ramp::Exponential, time: 0.2 },
                duration: 0.2,
            },
            // Rising chirp
            SoundEffect::Powerup => Tone {
                waveform: Waveform::Sine,
                frequency: Sweep { from: 600.0, to: 1200.0, ramp: Ramp::Linear, time: 0.1 },
                gain: Sweep { from: 0.1, to: 0.0, ramp: Ramp::Linear, time: 0.2 },
                duration: 0.2,
            },
        }
    }
}

/// Anything that can play sound effects. Fire-and-forget; never fails.
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Silent sink for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl SoundSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioParam, OscillatorType};

    use super::{Ramp, SoundEffect, SoundSink, Sweep, Tone, Waveform};

    /// Audio manager for the game
    ///
    /// The context is created on the first sound request (after the user
    /// gesture that started the game) and reused for the rest of the page.
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Creation failed once; stay silent
        unavailable: bool,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            Self {
                ctx: None,
                unavailable: false,
                volume: 1.0,
            }
        }

        /// Set volume (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Lazily create the context, resuming it if the browser suspended it
        fn context(&mut self) -> Option<&AudioContext> {
            if self.ctx.is_none() && !self.unavailable {
                match AudioContext::new() {
                    Ok(ctx) => {
                        log::info!("AudioContext created");
                        self.ctx = Some(ctx);
                    }
                    Err(_) => {
                        log::warn!("Failed to create AudioContext - audio disabled");
                        self.unavailable = true;
                    }
                }
            }

            let ctx = self.ctx.as_ref()?;
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Some(ctx)
        }

        fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            });
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let t = ctx.current_time();
            apply_sweep(&osc.frequency(), &tone.frequency, 1.0, t)?;
            apply_sweep(&gain.gain(), &tone.gain, vol, t)?;

            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + tone.duration).ok()?;
            Some(())
        }
    }

    fn apply_sweep(param: &AudioParam, sweep: &Sweep, scale: f32, t: f64) -> Option<()> {
        param.set_value_at_time(sweep.from * scale, t).ok()?;
        let target = sweep.to * scale;
        match sweep.ramp {
            Ramp::Linear => param.linear_ramp_to_value_at_time(target, t + sweep.time),
            Ramp::Exponential => {
                param.exponential_ramp_to_value_at_time(target.max(f32::MIN_POSITIVE), t + sweep.time)
            }
        }
        .ok()?;
        Some(())
    }

    impl SoundSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.context() else { return };
            if Self::play_tone(ctx, &effect.tone(), vol).is_none() {
                log::debug!("Dropped {:?}: Web Audio call failed", effect);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_targets_are_positive() {
        for effect in [SoundEffect::Shoot, SoundEffect::Explosion, SoundEffect::Powerup] {
            let tone = effect.tone();
            for sweep in [tone.frequency, tone.gain] {
                if sweep.ramp == Ramp::Exponential {
                    assert!(sweep.from > 0.0 && sweep.to > 0.0, "{effect:?}");
                }
                assert!(sweep.time <= tone.duration);
            }
        }
    }

    #[test]
    fn test_sweep_directions() {
        let shoot = SoundEffect::Shoot.tone();
        assert!(shoot.frequency.to < shoot.frequency.from);

        let explosion = SoundEffect::Explosion.tone();
        assert!(explosion.gain.from > shoot.gain.from);
        assert_eq!(explosion.waveform, Waveform::Sawtooth);

        let powerup = SoundEffect::Powerup.tone();
        assert!(powerup.frequency.to > powerup.frequency.from);
    }
}
