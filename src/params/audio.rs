//! Synthesis parameters and output format constants.

use crate::error::{Error, Result};

/// Parameters shared by every row of a synthesis run
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisParams {
    /// Output sample rate (Hz)
    pub sample_rate_hz: u32,

    /// Tone assigned to grid column 0 (Hz)
    pub min_frequency_hz: f64,

    /// Tone assigned to the last grid column (Hz)
    pub max_frequency_hz: f64,

    /// Floor applied to per-pixel opacity when the grid carries one.
    /// Keeps faint but visible pixels audible.
    pub min_opacity: f32,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            sample_rate_hz: audio_constants::DEFAULT_SAMPLE_RATE_HZ,
            min_frequency_hz: 200.0,
            max_frequency_hz: 8000.0,
            min_opacity: 0.1,
        }
    }
}

impl SynthesisParams {
    /// Validate configuration (positive rate, ordered frequency range, etc.)
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate_hz == 0 {
            return Err(Error::InvalidParams("Sample rate must be > 0".to_string()));
        }
        if !self.min_frequency_hz.is_finite() || !self.max_frequency_hz.is_finite() {
            return Err(Error::InvalidParams(
                "Frequency range must be finite".to_string(),
            ));
        }
        if self.min_frequency_hz <= 0.0 {
            return Err(Error::InvalidParams(format!(
                "Minimum frequency must be > 0 Hz, got {}",
                self.min_frequency_hz
            )));
        }
        if self.min_frequency_hz >= self.max_frequency_hz {
            return Err(Error::InvalidParams(format!(
                "Minimum frequency ({} Hz) must be below maximum frequency ({} Hz)",
                self.min_frequency_hz, self.max_frequency_hz
            )));
        }
        if !(0.0..=1.0).contains(&self.min_opacity) {
            return Err(Error::InvalidParams(format!(
                "Minimum opacity must be within 0.0..=1.0, got {}",
                self.min_opacity
            )));
        }
        Ok(())
    }
}

/// Output format constants (mono 16-bit PCM)
pub mod audio_constants {
    /// Default output sample rate (Hz)
    pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 44100;

    /// Output channel count
    pub const CHANNELS: u16 = 1;

    /// Output bit depth
    pub const BITS_PER_SAMPLE: u16 = 16;

    /// Scale applied to a clamped [-1, 1] sample before rounding
    pub const FULL_SCALE: f64 = i16::MAX as f64;

    /// Default silence threshold, out of 32767
    pub const DEFAULT_SILENCE_THRESHOLD: u16 = 500;
}
