//! Duration policies: how grid size turns into audio length.
//!
//! Three strategies are supported and they are mutually exclusive. Each one
//! resolves to a [`DurationPlan`] holding the per-row sample allocation.

use crate::error::{Error, Result};

/// Longest untrimmed output: a WAV data chunk holds at most `u32::MAX` bytes
pub const MAX_TOTAL_SAMPLES: usize = (u32::MAX / 2) as usize;

/// Spread a constant wall-clock duration evenly across all rows
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTotalDuration {
    /// Total output length before trimming (seconds)
    pub duration_secs: f64,
}

impl Default for FixedTotalDuration {
    fn default() -> Self {
        Self { duration_secs: 5.0 }
    }
}

/// Derive total duration from image size: `sqrt(rows * cols) * secs_per_side`
#[derive(Debug, Clone, PartialEq)]
pub struct SizeHeuristicDuration {
    /// Seconds of audio per pixel along the geometric-mean side
    pub secs_per_side: f64,

    /// Lower bound on total duration (seconds)
    pub min_duration_secs: f64,

    /// Upper bound on total duration (seconds)
    pub max_duration_secs: f64,
}

impl Default for SizeHeuristicDuration {
    fn default() -> Self {
        Self {
            secs_per_side: 0.05, // 200x200 image = 10s
            min_duration_secs: 1.0,
            max_duration_secs: 60.0,
        }
    }
}

/// Give every row the same length, so duration grows with row count only
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRowDuration {
    /// Length of one row (seconds)
    pub row_duration_secs: f64,
}

impl Default for FixedRowDuration {
    fn default() -> Self {
        Self {
            row_duration_secs: 0.1, // sample_rate / 10 samples per row
        }
    }
}

/// Duration policy selection
#[derive(Debug, Clone, PartialEq)]
pub enum DurationPolicy {
    /// Constant total duration divided across rows
    FixedTotal(FixedTotalDuration),

    /// Total duration scaled by image size
    SizeHeuristic(SizeHeuristicDuration),

    /// Constant duration per row
    FixedPerRow(FixedRowDuration),
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self::FixedTotal(FixedTotalDuration::default())
    }
}

/// Resolved sample allocation for one grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationPlan {
    pub sample_rate_hz: u32,
    pub samples_per_row: usize,
    pub rows: usize,
}

impl DurationPlan {
    /// Untrimmed output length (samples)
    pub fn total_samples(&self) -> usize {
        self.rows * self.samples_per_row
    }

    /// Untrimmed output length (seconds)
    pub fn duration_secs(&self) -> f64 {
        self.total_samples() as f64 / self.sample_rate_hz as f64
    }

    /// Offset of the first sample belonging to `row`
    pub fn row_offset(&self, row: usize) -> usize {
        row * self.samples_per_row
    }
}

impl DurationPolicy {
    /// Human-readable policy name (for logs)
    pub fn name(&self) -> &'static str {
        match self {
            Self::FixedTotal(_) => "fixed-total",
            Self::SizeHeuristic(_) => "size-heuristic",
            Self::FixedPerRow(_) => "per-row",
        }
    }

    /// Validate policy parameters (finite, positive durations)
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::FixedTotal(p) => positive("duration", p.duration_secs),
            Self::SizeHeuristic(p) => {
                positive("seconds per side", p.secs_per_side)?;
                positive("minimum duration", p.min_duration_secs)?;
                positive("maximum duration", p.max_duration_secs)?;
                if p.min_duration_secs > p.max_duration_secs {
                    return Err(Error::InvalidParams(format!(
                        "Minimum duration ({}s) exceeds maximum duration ({}s)",
                        p.min_duration_secs, p.max_duration_secs
                    )));
                }
                Ok(())
            }
            Self::FixedPerRow(p) => positive("row duration", p.row_duration_secs),
        }
    }

    /// Resolve the policy for a grid of `rows` x `cols` at `sample_rate_hz`
    ///
    /// Total-duration strategies divide with integer truncation, so the
    /// untrimmed output may be slightly shorter than requested. Every row gets
    /// at least one sample. Plans longer than [`MAX_TOTAL_SAMPLES`] are
    /// rejected with `InvalidParams`.
    pub fn resolve(&self, rows: usize, cols: usize, sample_rate_hz: u32) -> Result<DurationPlan> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidGrid { rows, cols });
        }
        if sample_rate_hz == 0 {
            return Err(Error::InvalidParams("Sample rate must be > 0".to_string()));
        }
        self.validate()?;

        let rate = sample_rate_hz as f64;
        let samples_per_row = match self {
            Self::FixedTotal(p) => per_row_from_total(p.duration_secs, rate, rows),
            Self::SizeHeuristic(p) => {
                let side = ((rows * cols) as f64).sqrt();
                let duration = (side * p.secs_per_side)
                    .clamp(p.min_duration_secs, p.max_duration_secs);
                per_row_from_total(duration, rate, rows)
            }
            Self::FixedPerRow(p) => ((rate * p.row_duration_secs).round() as usize).max(1),
        };

        match samples_per_row.checked_mul(rows) {
            Some(total) if total <= MAX_TOTAL_SAMPLES => {}
            _ => {
                return Err(Error::InvalidParams(format!(
                    "{} policy yields more than {} samples for {} rows",
                    self.name(),
                    MAX_TOTAL_SAMPLES,
                    rows
                )));
            }
        }

        Ok(DurationPlan {
            sample_rate_hz,
            samples_per_row,
            rows,
        })
    }
}

fn per_row_from_total(duration_secs: f64, rate: f64, rows: usize) -> usize {
    let total_samples = (rate * duration_secs).round() as usize;
    (total_samples / rows).max(1)
}

fn positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParams(format!(
            "{} must be a positive number of seconds, got {}",
            what, value
        )))
    }
}
