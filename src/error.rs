//! Error taxonomy shared by every stage of the pipeline.
//!
//! All variants are fatal: a stage either fully succeeds or the run aborts.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid command-line input
    #[error("Usage error: {0}")]
    Usage(String),

    /// Image could be opened but not turned into a usable grid
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid grid shape {rows}x{cols} (dimensions must be > 0 and match the pixel count)")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("Invalid pixel value {value} at row {row}, col {col} (expected 0.0..=1.0)")]
    InvalidPixel { row: usize, col: usize, value: f32 },

    #[error(
        "Opacity dimensions {}x{} do not match intensity dimensions {}x{}",
        .opacity.0, .opacity.1, .intensity.0, .intensity.1
    )]
    DimensionMismatch {
        intensity: (usize, usize),
        opacity: (usize, usize),
    },

    /// Flat opacity buffer whose length differs from the intensity buffer
    #[error("Opacity has {actual} values but intensity has {expected}")]
    OpacityLength { expected: usize, actual: usize },

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Failed to write WAV file {}: {source}", .path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = Error::DimensionMismatch {
            intensity: (4, 3),
            opacity: (4, 2),
        };
        assert_eq!(
            err.to_string(),
            "Opacity dimensions 4x2 do not match intensity dimensions 4x3"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }

        assert!(matches!(fails(), Err(Error::Io(_))));
    }
}
