//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is a short list of oscillator tones; only playback touches
//! the browser.

use crate::puzzle::SessionEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Piece picked, still short of the target
    Pick,
    /// Last pick taken back
    Undo,
    /// Undo/hint with nothing to act on
    Nope,
    /// Target hit exactly
    Solved,
    /// Went past the target
    Overshoot,
    /// New round on screen
    RoundStart,
    /// Hint highlighted a piece
    Hint,
    GameOver,
    /// New high score
    HighScore,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// One oscillator voice with an exponential fade-out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Frequency to glide to by the end of the tone
    pub glide_to: Option<f32>,
    pub wave: Wave,
    /// Seconds after the effect starts
    pub delay: f64,
    pub duration: f64,
    /// Peak gain before volume scaling
    pub gain: f32,
}

const fn tone(freq: f32, wave: Wave, delay: f64, duration: f64, gain: f32) -> Tone {
    Tone {
        freq,
        glide_to: None,
        wave,
        delay,
        duration,
        gain,
    }
}

const fn glide(freq: f32, to: f32, wave: Wave, duration: f64, gain: f32) -> Tone {
    Tone {
        freq,
        glide_to: Some(to),
        wave,
        delay: 0.0,
        duration,
        gain,
    }
}

impl SoundEffect {
    /// Sound for a session event, if it has one
    pub fn for_event(event: &SessionEvent) -> Option<Self> {
        match event {
            SessionEvent::Picked { .. } => Some(SoundEffect::Pick),
            SessionEvent::Solved { .. } => Some(SoundEffect::Solved),
            SessionEvent::Overshot { .. } => Some(SoundEffect::Overshoot),
            SessionEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            SessionEvent::Undone { .. } | SessionEvent::Cleared => Some(SoundEffect::Undo),
            SessionEvent::NothingToUndo | SessionEvent::NoHint | SessionEvent::Rejected(_) => {
                Some(SoundEffect::Nope)
            }
            SessionEvent::Hinted { .. } => Some(SoundEffect::Hint),
            SessionEvent::RoundStarted { .. } => Some(SoundEffect::RoundStart),
            SessionEvent::Ignored => None,
        }
    }

    /// The tones that make up this effect
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::Pick => PICK,
            SoundEffect::Undo => UNDO,
            SoundEffect::Nope => NOPE,
            SoundEffect::Solved => SOLVED,
            SoundEffect::Overshoot => OVERSHOOT,
            SoundEffect::RoundStart => ROUND_START,
            SoundEffect::Hint => HINT,
            SoundEffect::GameOver => GAME_OVER,
            SoundEffect::HighScore => HIGH_SCORE,
        }
    }
}

/// Soft wooden click
const PICK: &[Tone] = &[glide(520.0, 660.0, Wave::Triangle, 0.09, 0.3)];

/// Short downward blip
const UNDO: &[Tone] = &[glide(500.0, 300.0, Wave::Sine, 0.1, 0.25)];

/// Low double buzz
const NOPE: &[Tone] = &[
    tone(180.0, Wave::Square, 0.0, 0.07, 0.12),
    tone(160.0, Wave::Square, 0.09, 0.07, 0.12),
];

/// Rising major arpeggio
const SOLVED: &[Tone] = &[
    tone(523.0, Wave::Triangle, 0.0, 0.25, 0.3),
    tone(659.0, Wave::Triangle, 0.1, 0.25, 0.3),
    tone(784.0, Wave::Triangle, 0.2, 0.25, 0.3),
    tone(1047.0, Wave::Triangle, 0.3, 0.4, 0.3),
];

/// Gentle "uh-oh" slide over a soft thump
const OVERSHOOT: &[Tone] = &[
    glide(400.0, 250.0, Wave::Sine, 0.35, 0.35),
    tone(120.0, Wave::Triangle, 0.0, 0.2, 0.2),
];

const ROUND_START: &[Tone] = &[
    tone(600.0, Wave::Sine, 0.0, 0.12, 0.2),
    tone(800.0, Wave::Sine, 0.08, 0.15, 0.2),
];

/// Sparkly chime
const HINT: &[Tone] = &[
    tone(1200.0, Wave::Sine, 0.0, 0.3, 0.15),
    tone(1800.0, Wave::Sine, 0.02, 0.3, 0.15),
    tone(2400.0, Wave::Sine, 0.04, 0.3, 0.15),
];

/// Sad descending
const GAME_OVER: &[Tone] = &[
    tone(400.0, Wave::Sine, 0.0, 0.3, 0.3),
    tone(350.0, Wave::Sine, 0.2, 0.3, 0.3),
    tone(300.0, Wave::Sine, 0.4, 0.3, 0.3),
    tone(200.0, Wave::Sine, 0.6, 0.3, 0.3),
];

/// Celebratory
const HIGH_SCORE: &[Tone] = &[
    tone(500.0, Wave::Triangle, 0.0, 0.25, 0.25),
    tone(600.0, Wave::Triangle, 0.08, 0.25, 0.25),
    tone(700.0, Wave::Triangle, 0.16, 0.25, 0.25),
    tone(800.0, Wave::Triangle, 0.24, 0.25, 0.25),
    tone(1000.0, Wave::Triangle, 0.32, 0.25, 0.25),
];

#[cfg(target_arch = "wasm32")]
pub use manager::AudioManager;

#[cfg(target_arch = "wasm32")]
mod manager {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Wave};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in effect.tones() {
                self.play_tone(ctx, tone, vol);
            }
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq, tone.wave) else {
                return;
            };
            let t = ctx.current_time() + tone.delay;
            let end = t + tone.duration;

            gain.gain().set_value_at_time(vol * tone.gain, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if let Some(to) = tone.glide_to {
                osc.frequency().set_value_at_time(tone.freq, t).ok();
                osc.frequency().exponential_ramp_to_value_at_time(to, end).ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.05).ok();
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            wave: Wave,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Triangle => OscillatorType::Triangle,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
            });
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectError;

    const ALL: [SoundEffect; 9] = [
        SoundEffect::Pick,
        SoundEffect::Undo,
        SoundEffect::Nope,
        SoundEffect::Solved,
        SoundEffect::Overshoot,
        SoundEffect::RoundStart,
        SoundEffect::Hint,
        SoundEffect::GameOver,
        SoundEffect::HighScore,
    ];

    #[test]
    fn test_tones_are_audible() {
        for effect in ALL {
            let tones = effect.tones();
            assert!(!tones.is_empty(), "{:?} has no tones", effect);
            for t in tones {
                assert!(t.freq > 20.0 && t.freq < 20_000.0);
                assert!(t.duration > 0.0 && t.delay >= 0.0);
                assert!(t.gain > 0.0 && t.gain <= 1.0);
            }
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&SessionEvent::Solved {
                points: 10,
                total_score: 10
            }),
            Some(SoundEffect::Solved)
        );
        assert_eq!(
            SoundEffect::for_event(&SessionEvent::Overshot {
                total: 13,
                lives_left: 2
            }),
            Some(SoundEffect::Overshoot)
        );
        assert_eq!(
            SoundEffect::for_event(&SessionEvent::Rejected(SelectError::Closed)),
            Some(SoundEffect::Nope)
        );
        assert_eq!(SoundEffect::for_event(&SessionEvent::Ignored), None);
    }
}
