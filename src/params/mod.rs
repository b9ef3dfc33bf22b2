//! Parameter definitions with physical units and documented semantics.
//!
//! All tunable numbers live here with:
//! - Physical units (seconds, Hz, samples)
//! - Documented ranges and defaults
//! - Validation before anything is rendered

mod audio;
mod duration;
mod input;
mod render;

// Re-export all types
pub use audio::{audio_constants, SynthesisParams};
pub use duration::{
    DurationPlan, DurationPolicy, FixedRowDuration, FixedTotalDuration, SizeHeuristicDuration,
    MAX_TOTAL_SAMPLES,
};
pub use input::{ImageOptions, Orientation};
pub use render::{check_image_path, OutputConfig, ParallelConfig, RenderConfig, SilenceThreshold};
