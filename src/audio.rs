//! Tone cues using the Web Audio API.
//!
//! Every cue is a short list of plain oscillator tones, so there are no sound
//! files to ship.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Clean drop caught
    Success,
    /// Polluted drop caught
    Fail,
    /// Win threshold reached
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
}

impl Wave {
    fn oscillator_type(self) -> OscillatorType {
        match self {
            Wave::Sine => OscillatorType::Sine,
            Wave::Square => OscillatorType::Square,
            Wave::Triangle => OscillatorType::Triangle,
        }
    }
}

/// A single scheduled tone, relative to the moment the cue is played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub offset_secs: f64,
    pub freq: f32,
    pub duration_secs: f64,
    pub wave: Wave,
    pub volume: f32,
}

const SUCCESS: &[ToneSpec] = &[ToneSpec {
    offset_secs: 0.0,
    freq: 740.0,
    duration_secs: 0.11,
    wave: Wave::Sine,
    volume: 0.12,
}];

const FAIL: &[ToneSpec] = &[ToneSpec {
    offset_secs: 0.0,
    freq: 160.0,
    duration_secs: 0.16,
    wave: Wave::Square,
    volume: 0.12,
}];

// small arpeggio
const WIN: &[ToneSpec] = &[
    ToneSpec { offset_secs: 0.0, freq: 660.0, duration_secs: 0.10, wave: Wave::Sine, volume: 0.14 },
    ToneSpec { offset_secs: 0.12, freq: 880.0, duration_secs: 0.10, wave: Wave::Sine, volume: 0.14 },
    ToneSpec { offset_secs: 0.24, freq: 990.0, duration_secs: 0.12, wave: Wave::Triangle, volume: 0.14 },
];

impl Cue {
    pub fn tones(self) -> &'static [ToneSpec] {
        match self {
            Cue::Success => SUCCESS,
            Cue::Fail => FAIL,
            Cue::Win => WIN,
        }
    }
}

/// Owns the (lazily created) audio context.
#[derive(Default)]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    muted: bool,
    /// Creation already failed once; don't keep retrying every click.
    unavailable: bool,
}

impl AudioManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Browsers only allow an AudioContext after a user gesture, so it is built
    /// on the first cue rather than at start-up.
    fn ensure_context(&mut self) -> Result<&AudioContext, GameError> {
        if self.unavailable {
            return Err(GameError::Audio("previously failed".into()));
        }
        if self.ctx.is_none() {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(e) => {
                    self.unavailable = true;
                    return Err(GameError::Audio(format!("{:?}", e)));
                }
            }
        }
        self.ctx.as_ref().ok_or_else(|| GameError::Audio("no context".into()))
    }

    pub fn play(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        let ctx = match self.ensure_context() {
            Ok(ctx) => ctx,
            Err(e) => {
                log::warn!("sound disabled: {}", e);
                return;
            }
        };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            if let Err(e) = ctx.resume() {
                log::warn!("audio context resume failed: {}", GameError::from(e));
            }
        }
        let t = ctx.current_time();
        for tone in cue.tones() {
            if let Err(e) = schedule_tone(ctx, t, tone) {
                log::warn!("failed to play {:?}: {}", cue, e);
                return;
            }
        }
    }
}

fn create_osc(ctx: &AudioContext, tone: &ToneSpec) -> Result<(OscillatorNode, GainNode), GameError> {
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    osc.set_type(tone.wave.oscillator_type());
    osc.frequency().set_value(tone.freq);
    gain.gain().set_value(tone.volume);
    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    Ok((osc, gain))
}

fn schedule_tone(ctx: &AudioContext, now: f64, tone: &ToneSpec) -> Result<(), GameError> {
    let (osc, _gain) = create_osc(ctx, tone)?;
    let start = now + tone.offset_secs;
    osc.start_with_when(start)?;
    osc.stop_with_when(start + tone.duration_secs)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_is_a_rising_arpeggio() {
        let tones = Cue::Win.tones();
        assert_eq!(tones.len(), 3);
        assert!(tones.windows(2).all(|w| w[0].freq < w[1].freq));
        assert!(tones.windows(2).all(|w| w[0].offset_secs < w[1].offset_secs));
        assert_eq!(tones[2].wave, Wave::Triangle);
    }

    #[test]
    fn fail_is_low_square() {
        let t = Cue::Fail.tones()[0];
        assert_eq!(t.wave, Wave::Square);
        assert!(t.freq < Cue::Success.tones()[0].freq);
    }

    #[test]
    fn manager_starts_unmuted_without_context() {
        let mut m = AudioManager::new();
        assert!(!m.is_muted());
        m.set_muted(true);
        assert!(m.is_muted());
        // muted play must not touch the browser
        m.play(Cue::Win);
    }
}
