//! WAV output (mono, 16-bit PCM) through hound.
//!
//! Samples are written to `<path>.part` and renamed into place once the file
//! is finalized, so a failed write never leaves a truncated WAV behind.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::params::audio_constants::{BITS_PER_SAMPLE, CHANNELS};

/// Write `samples` as a mono 16-bit PCM WAV file at `sample_rate_hz`
pub fn write_wav(path: &Path, sample_rate_hz: u32, samples: &[i16]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: CHANNELS,
        sample_rate: sample_rate_hz,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let part = part_path(path);
    let written = write_samples(&part, spec, samples)
        .and_then(|()| fs::rename(&part, path).map_err(hound::Error::IoError));
    if let Err(source) = written {
        let _ = fs::remove_file(&part);
        return Err(Error::Sink {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}

fn write_samples(path: &Path, spec: hound::WavSpec, samples: &[i16]) -> hound::Result<()> {
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
