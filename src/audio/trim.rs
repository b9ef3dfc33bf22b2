//! Leading/trailing silence removal.
//!
//! A plain magnitude threshold, no averaging or windowing: the first sample
//! at or above the threshold (from either end) stops the scan.

use std::ops::Range;

use crate::params::SilenceThreshold;

/// Index range of `samples` that survives trimming
///
/// Returns an empty range (`0..0`) when every sample is below the threshold.
pub fn trim_range(samples: &[i16], threshold: SilenceThreshold) -> Range<usize> {
    let audible = |s: &i16| s.unsigned_abs() >= threshold.0;

    let Some(start) = samples.iter().position(audible) else {
        return 0..0;
    };
    // A forward hit guarantees a backward hit at or after `start`
    let end = samples.iter().rposition(audible).map_or(start, |i| i + 1);

    start..end
}

/// Trimmed view of `samples` (contiguous, never copied)
pub fn trim_silence(samples: &[i16], threshold: SilenceThreshold) -> &[i16] {
    &samples[trim_range(samples, threshold)]
}
