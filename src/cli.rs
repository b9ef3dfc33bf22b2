//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::error::Result;
use crate::params::{
    check_image_path, DurationPolicy, FixedRowDuration, FixedTotalDuration, ImageOptions,
    Orientation, OutputConfig, ParallelConfig, RenderConfig, SilenceThreshold,
    SizeHeuristicDuration, SynthesisParams,
};

/// Duration policy names accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    /// Constant total duration (see --duration)
    FixedTotal,
    /// Duration grows with sqrt(rows * cols) (see --secs-per-side)
    SizeHeuristic,
    /// Constant duration per row (see --row-duration)
    PerRow,
}

/// Orientation names accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrientationArg {
    /// Flip vertically, then rotate 90° counter-clockwise
    FlipRotate,
    /// Time left to right, pitch bottom to top
    Spectrogram,
    /// Image rows are time slices
    AsIs,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::FlipRotate => Orientation::FlipRotate,
            OrientationArg::Spectrogram => Orientation::Spectrogram,
            OrientationArg::AsIs => Orientation::AsIs,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "pixeltone", version)]
#[command(about = "Render an image as sound (one tone per column)", long_about = None)]
pub struct Args {
    /// Input image file (png, jpg, bmp, gif, tiff, webp, ...)
    #[arg(value_name = "IMAGE")]
    pub input: PathBuf,

    /// Output WAV path (default: input path with a .wav extension)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// How image size maps to audio length
    #[arg(long, value_enum, default_value_t = PolicyArg::FixedTotal)]
    pub duration_policy: PolicyArg,

    /// Total duration for the fixed-total policy (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 5.0)]
    pub duration: f64,

    /// Seconds of audio per pixel of side length for the size-heuristic policy
    #[arg(long, value_name = "SECONDS", default_value_t = 0.05)]
    pub secs_per_side: f64,

    /// Duration of one row for the per-row policy (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 0.1)]
    pub row_duration: f64,

    /// Output sample rate (Hz)
    #[arg(long, value_name = "HZ", default_value_t = 44100)]
    pub sample_rate: u32,

    /// Tone for the first grid column (Hz)
    #[arg(long, value_name = "HZ", default_value_t = 200.0)]
    pub min_freq: f64,

    /// Tone for the last grid column (Hz)
    #[arg(long, value_name = "HZ", default_value_t = 8000.0)]
    pub max_freq: f64,

    /// Floor applied to pixel opacity so faint pixels stay audible
    #[arg(long, value_name = "0..1", default_value_t = 0.1)]
    pub min_opacity: f32,

    /// Silence threshold for trimming (absolute sample value, out of 32767)
    #[arg(long, value_name = "SAMPLE", default_value_t = 500)]
    pub threshold: u16,

    /// How image axes map onto time and pitch
    #[arg(long, value_enum, default_value_t = OrientationArg::FlipRotate)]
    pub orientation: OrientationArg,

    /// Downscale so neither side exceeds this many pixels
    #[arg(long, value_name = "PIXELS")]
    pub max_size: Option<u32>,

    /// Worker threads for row rendering (default: one per core)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Render rows on the main thread only
    #[arg(long)]
    pub sequential: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parse duration policy from command-line arguments
    pub fn parse_duration_policy(&self) -> DurationPolicy {
        match self.duration_policy {
            PolicyArg::FixedTotal => DurationPolicy::FixedTotal(FixedTotalDuration {
                duration_secs: self.duration,
            }),
            PolicyArg::SizeHeuristic => DurationPolicy::SizeHeuristic(SizeHeuristicDuration {
                secs_per_side: self.secs_per_side,
                ..Default::default()
            }),
            PolicyArg::PerRow => DurationPolicy::FixedPerRow(FixedRowDuration {
                row_duration_secs: self.row_duration,
            }),
        }
    }

    /// Create rendering configuration (validated)
    pub fn render_config(&self) -> Result<RenderConfig> {
        let config = RenderConfig {
            synthesis: SynthesisParams {
                sample_rate_hz: self.sample_rate,
                min_frequency_hz: self.min_freq,
                max_frequency_hz: self.max_freq,
                min_opacity: self.min_opacity,
            },
            duration: self.parse_duration_policy(),
            silence_threshold: SilenceThreshold(self.threshold),
            parallel: ParallelConfig {
                enabled: !self.sequential,
                threads: self.threads,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn image_options(&self) -> ImageOptions {
        ImageOptions {
            orientation: self.orientation.into(),
            max_dimension: self.max_size,
        }
    }

    /// Resolve output location, checking the input names an image file
    pub fn output_config(&self) -> Result<OutputConfig> {
        match &self.output {
            Some(path) => {
                check_image_path(&self.input)?;
                Ok(OutputConfig {
                    wav_path: path.clone(),
                })
            }
            None => OutputConfig::for_input(&self.input),
        }
    }

    /// Log filter implied by `-v` flags
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
