//! Pixeltone library - still images rendered as sound
//!
//! Each grid column is a fixed tone, each row a slice of time, and each
//! pixel's brightness (scaled by its opacity) the loudness of that tone.

pub mod audio;
pub mod cli;
pub mod error;
pub mod grid;
pub mod params;

pub use error::{Error, Result};
