//! Audio system using the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed. Every
//! effect is a short oscillator tone or sequence; playback is fire-and-forget
//! and failures never reach the simulation.

/// Oscillator waveform for a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
}

/// One oscillator note with a gain envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
    pub waveform: Waveform,
    pub volume: f32,
    /// Seconds after the trigger before this note starts
    pub delay: f32,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Pin leaves the launcher
    Shoot,
    /// Pin attaches cleanly
    Attach,
    /// Pin hit an attached pin
    Fail,
    /// Level cleared
    Win,
}

impl SoundEffect {
    /// The tone sequence for this effect
    pub fn tones(self) -> &'static [Tone] {
        use Waveform::*;
        match self {
            SoundEffect::Shoot => &[Tone {
                frequency: 600.0,
                duration: 0.1,
                waveform: Sine,
                volume: 0.2,
                delay: 0.0,
            }],
            SoundEffect::Attach => &[Tone {
                frequency: 800.0,
                duration: 0.15,
                waveform: Sine,
                volume: 0.25,
                delay: 0.0,
            }],
            // Descending buzz, two notes
            SoundEffect::Fail => &[
                Tone {
                    frequency: 200.0,
                    duration: 0.3,
                    waveform: Sawtooth,
                    volume: 0.3,
                    delay: 0.0,
                },
                Tone {
                    frequency: 150.0,
                    duration: 0.2,
                    waveform: Sawtooth,
                    volume: 0.2,
                    delay: 0.1,
                },
            ],
            // Ascending C5-E5-G5 arpeggio
            SoundEffect::Win => &[
                Tone {
                    frequency: 523.0,
                    duration: 0.1,
                    waveform: Sine,
                    volume: 0.2,
                    delay: 0.0,
                },
                Tone {
                    frequency: 659.0,
                    duration: 0.1,
                    waveform: Sine,
                    volume: 0.2,
                    delay: 0.1,
                },
                Tone {
                    frequency: 784.0,
                    duration: 0.2,
                    waveform: Sine,
                    volume: 0.25,
                    delay: 0.2,
                },
            ],
        }
    }
}

/// Audio manager for the game (WASM: Web Audio, native: silent)
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<web_sys::AudioContext>,
}

#[cfg(target_arch = "wasm32")]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context; the game keeps running silent
        let ctx = web_sys::AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    /// Resume the audio context (required after a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a sound effect, best effort
    pub fn play(&self, effect: SoundEffect) {
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        for tone in effect.tones() {
            self.play_tone(ctx, tone);
        }
    }

    /// Create an oscillator with a decaying gain envelope and schedule it
    fn play_tone(&self, ctx: &web_sys::AudioContext, tone: &Tone) {
        let Ok(osc) = ctx.create_oscillator() else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else { return };

        let osc_type = match tone.waveform {
            Waveform::Sine => web_sys::OscillatorType::Sine,
            Waveform::Sawtooth => web_sys::OscillatorType::Sawtooth,
        };
        osc.set_type(osc_type);
        osc.frequency().set_value(tone.frequency);

        if osc.connect_with_audio_node(&gain).is_err() {
            return;
        }
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }

        let t = ctx.current_time() + tone.delay as f64;
        gain.gain().set_value_at_time(tone.volume, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + tone.duration as f64)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + tone.duration as f64).ok();
    }
}

/// Silent stand-in so the session compiles natively (tests, headless demo)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct AudioManager;

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new() -> Self {
        Self
    }

    pub fn resume(&self) {}

    pub fn play(&self, effect: SoundEffect) {
        log::debug!("audio: {effect:?}");
    }
}
