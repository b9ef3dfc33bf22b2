//! Column index to tone frequency.

use std::f64::consts::TAU;

/// Linear column-to-frequency mapping
///
/// Column 0 maps to `min_hz` and column `cols - 1` to `max_hz`. A single
/// column has no range to interpolate over and sits at the midpoint.
pub fn frequency(col: usize, cols: usize, min_hz: f64, max_hz: f64) -> f64 {
    if cols <= 1 {
        return (min_hz + max_hz) / 2.0;
    }
    min_hz + (max_hz - min_hz) * col as f64 / (cols - 1) as f64
}

/// Per-column frequency table, computed once per synthesis run
#[derive(Debug, Clone)]
pub struct FrequencyMap {
    frequencies_hz: Vec<f64>,
    /// 2π f for each column (radians per second)
    angular: Vec<f64>,
}

impl FrequencyMap {
    pub fn new(cols: usize, min_hz: f64, max_hz: f64) -> Self {
        let frequencies_hz: Vec<f64> = (0..cols)
            .map(|col| frequency(col, cols, min_hz, max_hz))
            .collect();
        let angular = frequencies_hz.iter().map(|f| TAU * f).collect();

        Self {
            frequencies_hz,
            angular,
        }
    }

    pub fn len(&self) -> usize {
        self.frequencies_hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies_hz.is_empty()
    }

    /// Tone for `col` (Hz)
    pub fn hz(&self, col: usize) -> f64 {
        self.frequencies_hz[col]
    }

    /// Angular frequencies, one per column (rad/s)
    pub fn angular(&self) -> &[f64] {
        &self.angular
    }
}
