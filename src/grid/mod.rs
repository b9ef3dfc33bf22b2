//! Normalized pixel grid consumed by the synthesizer.
//!
//! Rows are time slices and columns are tones. Values are stored row-major in
//! flat vectors; opacity is optional and, when present, always matches the
//! intensity shape.

mod decode;

pub use decode::{grid_from_image, grid_from_luma_alpha, load_grid};

use crate::error::{Error, Result};

/// Intensity (and optional opacity) values in [0, 1], immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    rows: usize,
    cols: usize,
    intensity: Vec<f32>,
    opacity: Option<Vec<f32>>,
}

impl PixelGrid {
    /// Build a grid from row-major intensity values
    pub fn new(rows: usize, cols: usize, intensity: Vec<f32>) -> Result<Self> {
        Self::with_opacity(rows, cols, intensity, None)
    }

    /// Build a grid from row-major intensity and optional opacity values
    ///
    /// Fails with `InvalidGrid` for an empty shape or a value buffer of the
    /// wrong length, `OpacityLength` when opacity has a different length
    /// than intensity, and `InvalidPixel` for values outside [0, 1].
    pub fn with_opacity(
        rows: usize,
        cols: usize,
        intensity: Vec<f32>,
        opacity: Option<Vec<f32>>,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 || intensity.len() != rows * cols {
            return Err(Error::InvalidGrid { rows, cols });
        }
        if let Some(alpha) = &opacity {
            if alpha.len() != intensity.len() {
                return Err(Error::OpacityLength {
                    expected: intensity.len(),
                    actual: alpha.len(),
                });
            }
        }

        check_range(&intensity, cols)?;
        if let Some(alpha) = &opacity {
            check_range(alpha, cols)?;
        }

        Ok(Self {
            rows,
            cols,
            intensity,
            opacity,
        })
    }

    /// Build a grid from nested rows (intensity, optional opacity)
    pub fn from_rows(intensity: &[Vec<f32>], opacity: Option<&[Vec<f32>]>) -> Result<Self> {
        let (rows, cols) = nested_shape(intensity)?;
        let alpha = match opacity {
            Some(alpha) => {
                let alpha_shape = nested_shape(alpha).map_err(|_| Error::DimensionMismatch {
                    intensity: (rows, cols),
                    opacity: (alpha.len(), alpha.first().map_or(0, Vec::len)),
                })?;
                if alpha_shape != (rows, cols) {
                    return Err(Error::DimensionMismatch {
                        intensity: (rows, cols),
                        opacity: alpha_shape,
                    });
                }
                Some(alpha.concat())
            }
            None => None,
        };

        Self::with_opacity(rows, cols, intensity.concat(), alpha)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the source image carried a transparency channel
    pub fn has_opacity(&self) -> bool {
        self.opacity.is_some()
    }

    pub fn intensity(&self, row: usize, col: usize) -> f32 {
        self.intensity[row * self.cols + col]
    }

    /// Opacity at a pixel (1.0 when the grid has no opacity channel)
    pub fn opacity(&self, row: usize, col: usize) -> f32 {
        self.opacity
            .as_ref()
            .map_or(1.0, |alpha| alpha[row * self.cols + col])
    }

    /// Per-column amplitudes for one row: `intensity * max(opacity, min_opacity)`
    ///
    /// Without an opacity channel the amplitude is the intensity itself.
    pub fn row_amplitudes(&self, row: usize, min_opacity: f32) -> Vec<f64> {
        let start = row * self.cols;
        let intensity = &self.intensity[start..start + self.cols];

        match &self.opacity {
            Some(alpha) => intensity
                .iter()
                .zip(&alpha[start..start + self.cols])
                .map(|(&i, &a)| i as f64 * a.max(min_opacity) as f64)
                .collect(),
            None => intensity.iter().map(|&i| i as f64).collect(),
        }
    }
}

fn nested_shape(values: &[Vec<f32>]) -> Result<(usize, usize)> {
    let rows = values.len();
    let cols = values.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 || values.iter().any(|row| row.len() != cols) {
        return Err(Error::InvalidGrid { rows, cols });
    }
    Ok((rows, cols))
}

fn check_range(values: &[f32], cols: usize) -> Result<()> {
    match values.iter().position(|v| !(0.0..=1.0).contains(v)) {
        Some(idx) => Err(Error::InvalidPixel {
            row: idx / cols,
            col: idx % cols,
            value: values[idx],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_accessors() {
        let grid = PixelGrid::new(2, 3, vec![0.0, 0.5, 1.0, 0.25, 0.75, 0.1]).unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert!(!grid.has_opacity());
        assert_eq!(grid.intensity(1, 1), 0.75);
        assert_eq!(grid.opacity(1, 1), 1.0);
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert!(matches!(
            PixelGrid::new(0, 3, vec![]),
            Err(Error::InvalidGrid { rows: 0, cols: 3 })
        ));
        assert!(matches!(
            PixelGrid::new(3, 0, vec![]),
            Err(Error::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_rejects_wrong_value_count() {
        assert!(matches!(
            PixelGrid::new(2, 2, vec![0.0; 3]),
            Err(Error::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_rejects_opacity_shape_mismatch() {
        let result = PixelGrid::with_opacity(2, 2, vec![0.5; 4], Some(vec![1.0; 2]));
        assert!(matches!(
            result,
            Err(Error::OpacityLength {
                expected: 4,
                actual: 2
            })
        ));

        // 5 values cannot be laid out as any 2-column shape
        let result = PixelGrid::with_opacity(3, 2, vec![0.5; 6], Some(vec![1.0; 5]));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Opacity has 5 values but intensity has 6"
        );
    }

    #[test]
    fn test_from_rows_rejects_opacity_shape_mismatch() {
        let intensity = vec![vec![0.5, 0.5], vec![0.5, 0.5]];
        let opacity = vec![vec![1.0, 1.0, 1.0], vec![1.0, 1.0, 1.0]];

        let result = PixelGrid::from_rows(&intensity, Some(opacity.as_slice()));
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                intensity: (2, 2),
                opacity: (2, 3)
            })
        ));
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let intensity = vec![vec![0.5, 0.5], vec![0.5]];
        assert!(PixelGrid::from_rows(&intensity, None).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let result = PixelGrid::new(1, 3, vec![0.0, 1.5, 0.0]);
        assert!(matches!(
            result,
            Err(Error::InvalidPixel { row: 0, col: 1, .. })
        ));

        let result = PixelGrid::new(1, 2, vec![f32::NAN, 0.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_row_amplitudes_without_opacity() {
        let grid = PixelGrid::from_rows(&[vec![0.2, 0.4], vec![0.6, 0.8]], None).unwrap();
        let amps = grid.row_amplitudes(1, 0.1);

        assert!((amps[0] - 0.6).abs() < 1e-6);
        assert!((amps[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_row_amplitudes_floor_opacity() {
        let grid =
            PixelGrid::from_rows(&[vec![1.0, 1.0, 0.5]], Some(&[vec![0.0, 0.5, 1.0]][..])).unwrap();
        let amps = grid.row_amplitudes(0, 0.1);

        // Transparent pixel is floored to 0.1, not silenced
        assert!((amps[0] - 0.1).abs() < 1e-6);
        assert!((amps[1] - 0.5).abs() < 1e-6);
        assert!((amps[2] - 0.5).abs() < 1e-6);
    }
}
