//! Rendering and output configuration.

use std::path::{Path, PathBuf};

use super::audio::{audio_constants, SynthesisParams};
use super::duration::DurationPolicy;
use crate::error::{Error, Result};

/// Everything the sonification system needs besides the grid itself
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Sample rate, frequency range and opacity floor
    pub synthesis: SynthesisParams,

    /// How grid size maps to audio length
    pub duration: DurationPolicy,

    /// Samples quieter than this (absolute value, out of 32767) are trimmed
    /// from both ends of the output
    pub silence_threshold: SilenceThreshold,

    /// Render rows on worker threads
    pub parallel: ParallelConfig,
}

impl RenderConfig {
    /// Validate every nested parameter group
    pub fn validate(&self) -> Result<()> {
        self.synthesis.validate()?;
        self.duration.validate()?;
        Ok(())
    }
}

/// Minimum audible sample magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilenceThreshold(pub u16);

impl Default for SilenceThreshold {
    fn default() -> Self {
        Self(audio_constants::DEFAULT_SILENCE_THRESHOLD)
    }
}

/// Row-level parallelism settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Disable to render rows one after another on the calling thread
    pub enabled: bool,

    /// Worker count for a dedicated pool (`None` = rayon global pool)
    pub threads: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threads: None,
        }
    }
}

/// Output location configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Destination WAV path
    pub wav_path: PathBuf,
}

impl OutputConfig {
    /// Image file extensions accepted as input (lowercase)
    pub const IMAGE_EXTENSIONS: &'static [&'static str] = &[
        "png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp", "tga", "pnm", "pgm", "ppm",
        "ico",
    ];

    /// Derive output path from the input image (same name, `.wav` extension)
    pub fn for_input(image_path: &Path) -> Result<Self> {
        check_image_path(image_path)?;
        Ok(Self {
            wav_path: image_path.with_extension("wav"),
        })
    }
}

/// Check that `path` names an image file by extension
pub fn check_image_path(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext {
        Some(ext) if OutputConfig::IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(Error::Usage(format!(
            "Unsupported image extension '.{}' for {} (expected one of: {})",
            ext,
            path.display(),
            OutputConfig::IMAGE_EXTENSIONS.join(", ")
        ))),
        None => Err(Error::Usage(format!(
            "Input {} has no image file extension",
            path.display()
        ))),
    }
}
