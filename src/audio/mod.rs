//! Image-to-audio synthesis.
//!
//! Maps grid columns to tones, sums them per row with additive synthesis,
//! trims leading/trailing silence and writes mono 16-bit WAV.

mod frequency;
mod synthesis;
mod system;
mod trim;
mod wav;

// Re-export public types
pub use frequency::{frequency, FrequencyMap};
pub use synthesis::{quantize, synthesize};
pub use system::{Rendering, SonificationSystem};
pub use trim::{trim_range, trim_silence};
pub use wav::write_wav;
