//! Sonification system: duration plan, synthesis, trimming and output.

use std::ops::Range;
use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};

use super::synthesis::synthesize;
use super::trim::trim_range;
use super::wav::write_wav;
use crate::error::{Error, Result};
use crate::grid::PixelGrid;
use crate::params::{DurationPlan, RenderConfig};

/// Result of rendering one grid (owns the untrimmed buffer)
#[derive(Debug, Clone)]
pub struct Rendering {
    plan: DurationPlan,
    raw: Vec<i16>,
    kept: Range<usize>,
}

impl Rendering {
    /// Trimmed samples, ready for output
    pub fn samples(&self) -> &[i16] {
        &self.raw[self.kept.clone()]
    }

    /// Untrimmed samples in row order
    pub fn raw_samples(&self) -> &[i16] {
        &self.raw
    }

    pub fn raw_len(&self) -> usize {
        self.raw.len()
    }

    pub fn plan(&self) -> &DurationPlan {
        &self.plan
    }

    pub fn leading_trimmed(&self) -> usize {
        self.kept.start
    }

    pub fn trailing_trimmed(&self) -> usize {
        self.raw.len() - self.kept.end
    }

    pub fn is_silent(&self) -> bool {
        self.kept.is_empty()
    }

    /// Length of the trimmed output (seconds)
    pub fn duration_secs(&self) -> f64 {
        self.kept.len() as f64 / self.plan.sample_rate_hz as f64
    }
}

/// Turns pixel grids into audio according to one validated configuration
pub struct SonificationSystem {
    config: RenderConfig,
    pool: Option<rayon::ThreadPool>,
}

impl SonificationSystem {
    /// Create system with specified configuration
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;

        let pool = match config.parallel.threads {
            Some(threads) if config.parallel.enabled => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| {
                        Error::InvalidParams(format!("Failed to build worker pool: {}", e))
                    })?,
            ),
            _ => None,
        };

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Resolve the duration plan, synthesize and trim
    pub fn render(&self, grid: &PixelGrid) -> Result<Rendering> {
        let synthesis = &self.config.synthesis;
        let plan = self
            .config
            .duration
            .resolve(grid.rows(), grid.cols(), synthesis.sample_rate_hz)?;

        info!(
            "Rendering {}x{} grid: {} policy, {} samples/row, {:.2}s untrimmed",
            grid.rows(),
            grid.cols(),
            self.config.duration.name(),
            plan.samples_per_row,
            plan.duration_secs()
        );

        let start = Instant::now();
        let parallel = self.config.parallel.enabled;
        let raw = match &self.pool {
            Some(pool) => pool.install(|| synthesize(grid, synthesis, &plan, parallel))?,
            None => synthesize(grid, synthesis, &plan, parallel)?,
        };
        debug!("Synthesis took {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

        let kept = trim_range(&raw, self.config.silence_threshold);
        let rendering = Rendering { plan, raw, kept };

        if rendering.is_silent() {
            warn!("Output is entirely below the silence threshold; writing an empty file");
        } else {
            debug!(
                "Trimmed {} leading and {} trailing samples",
                rendering.leading_trimmed(),
                rendering.trailing_trimmed()
            );
        }

        Ok(rendering)
    }

    /// Render and write the trimmed samples to `path` in one sink call
    pub fn render_to_file(&self, grid: &PixelGrid, path: &Path) -> Result<Rendering> {
        let rendering = self.render(grid)?;
        write_wav(path, rendering.plan.sample_rate_hz, rendering.samples())?;
        info!(
            "Wrote {} ({:.2}s, {} samples)",
            path.display(),
            rendering.duration_secs(),
            rendering.samples().len()
        );
        Ok(rendering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{
        DurationPolicy, FixedRowDuration, ParallelConfig, SilenceThreshold, SynthesisParams,
    };

    fn per_row_config(row_duration_secs: f64) -> RenderConfig {
        RenderConfig {
            duration: DurationPolicy::FixedPerRow(FixedRowDuration { row_duration_secs }),
            ..Default::default()
        }
    }

    #[test]
    fn test_silent_grid_trims_to_empty() {
        let system = SonificationSystem::new(RenderConfig::default()).unwrap();
        let grid = PixelGrid::new(4, 4, vec![0.0; 16]).unwrap();

        let rendering = system.render(&grid).unwrap();

        assert!(rendering.raw_len() > 0);
        assert!(rendering.is_silent());
        assert!(rendering.samples().is_empty());
        assert_eq!(rendering.duration_secs(), 0.0);
    }

    #[test]
    fn test_transparent_grid_without_floor_trims_to_empty() {
        let config = RenderConfig {
            synthesis: SynthesisParams {
                min_opacity: 0.0,
                ..Default::default()
            },
            ..per_row_config(0.01)
        };
        let system = SonificationSystem::new(config).unwrap();
        let grid = PixelGrid::with_opacity(2, 3, vec![1.0; 6], Some(vec![0.0; 6])).unwrap();

        assert!(system.render(&grid).unwrap().samples().is_empty());
    }

    #[test]
    fn test_full_grid_keeps_both_ends() {
        let system = SonificationSystem::new(per_row_config(0.05)).unwrap();
        let grid = PixelGrid::with_opacity(3, 8, vec![1.0; 24], Some(vec![1.0; 24])).unwrap();

        let rendering = system.render(&grid).unwrap();
        let samples = rendering.samples();

        // Only the zero sample at t = 0 is below threshold
        assert_eq!(rendering.leading_trimmed(), 1);
        assert_eq!(rendering.trailing_trimmed(), 0);
        assert!(samples[0].unsigned_abs() >= 500);
        assert!(samples[samples.len() - 1].unsigned_abs() >= 500);
    }

    #[test]
    fn test_rendering_is_deterministic_across_pools() {
        let grid = PixelGrid::new(
            6,
            5,
            (0..30).map(|i| ((i * 7) % 11) as f32 / 10.0).collect(),
        )
        .unwrap();

        let sequential = SonificationSystem::new(RenderConfig {
            parallel: ParallelConfig {
                enabled: false,
                threads: None,
            },
            ..per_row_config(0.01)
        })
        .unwrap();
        let pooled = SonificationSystem::new(RenderConfig {
            parallel: ParallelConfig {
                enabled: true,
                threads: Some(3),
            },
            ..per_row_config(0.01)
        })
        .unwrap();

        let a = sequential.render(&grid).unwrap();
        let b = pooled.render(&grid).unwrap();
        assert_eq!(a.raw_samples(), b.raw_samples());
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn test_render_to_file_writes_trimmed_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let system = SonificationSystem::new(RenderConfig {
            silence_threshold: SilenceThreshold(1000),
            ..per_row_config(0.02)
        })
        .unwrap();
        let grid = PixelGrid::new(2, 2, vec![0.8, 0.0, 0.0, 0.8]).unwrap();

        let rendering = system.render_to_file(&grid, &path).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let written: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(written, rendering.samples());
        assert_eq!(
            written.len() + rendering.leading_trimmed() + rendering.trailing_trimmed(),
            rendering.raw_len()
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RenderConfig {
            synthesis: SynthesisParams {
                min_frequency_hz: 500.0,
                max_frequency_hz: 100.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            SonificationSystem::new(config),
            Err(Error::InvalidParams(_))
        ));
    }

    #[test]
    fn test_zero_threads_uses_default_pool_size() {
        let config = RenderConfig {
            parallel: ParallelConfig {
                enabled: true,
                threads: Some(0),
            },
            ..Default::default()
        };
        // rayon reads 0 as "pick automatically"
        assert!(SonificationSystem::new(config).is_ok());
    }
}
