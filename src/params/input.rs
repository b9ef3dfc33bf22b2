//! Image pre-processing options.

/// How image axes map onto grid rows (time) and columns (pitch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Flip vertically, then rotate 90° counter-clockwise.
    /// Grid rows walk the image columns right to left; column 0 is the bottom row.
    #[default]
    FlipRotate,

    /// Read like a spectrogram: time runs left to right, pitch rises bottom to top
    Spectrogram,

    /// Image rows are grid rows, image columns are grid columns
    AsIs,
}

/// Image loading options
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    /// Axis mapping applied after grayscale conversion
    pub orientation: Orientation,

    /// Downscale so neither side exceeds this many pixels (aspect preserved)
    pub max_dimension: Option<u32>,
}
