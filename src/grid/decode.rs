//! Image file to pixel grid: decode, downscale, grayscale, orient.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayAlphaImage};
use log::{debug, info};

use super::PixelGrid;
use crate::error::{Error, Result};
use crate::params::{ImageOptions, Orientation};

/// Decode an image file into a normalized grid
///
/// Opacity is only produced when the source colour type carries alpha.
pub fn load_grid(path: &Path, options: &ImageOptions) -> Result<PixelGrid> {
    let img = image::open(path)?;
    info!(
        "Decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    grid_from_image(&img, options)
}

/// Grayscale, downscale and orient an already decoded image
pub fn grid_from_image(img: &DynamicImage, options: &ImageOptions) -> Result<PixelGrid> {
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::Decode(format!(
            "Image has no pixels ({}x{})",
            img.width(),
            img.height()
        )));
    }

    let has_alpha = img.color().has_alpha();

    let luma_alpha = match options.max_dimension {
        Some(0) => {
            return Err(Error::InvalidParams(
                "Maximum image dimension must be > 0".to_string(),
            ));
        }
        Some(max) if img.width() > max || img.height() > max => {
            let resized = img.resize(max, max, FilterType::Triangle);
            debug!(
                "Downscaled {}x{} -> {}x{}",
                img.width(),
                img.height(),
                resized.width(),
                resized.height()
            );
            resized.to_luma_alpha8()
        }
        _ => img.to_luma_alpha8(),
    };

    let oriented = orient(&luma_alpha, options.orientation);
    grid_from_luma_alpha(&oriented, has_alpha)
}

/// Convert a grayscale+alpha buffer to a grid (image rows become grid rows)
pub fn grid_from_luma_alpha(buffer: &GrayAlphaImage, has_alpha: bool) -> Result<PixelGrid> {
    let rows = buffer.height() as usize;
    let cols = buffer.width() as usize;

    let intensity = buffer
        .pixels()
        .map(|p| p.0[0] as f32 / 255.0)
        .collect();
    let opacity = has_alpha.then(|| buffer.pixels().map(|p| p.0[1] as f32 / 255.0).collect());

    PixelGrid::with_opacity(rows, cols, intensity, opacity)
}

fn orient(buffer: &GrayAlphaImage, orientation: Orientation) -> GrayAlphaImage {
    match orientation {
        // Counter-clockwise quarter turn
        Orientation::FlipRotate => imageops::rotate270(&imageops::flip_vertical(buffer)),
        Orientation::Spectrogram => imageops::rotate90(buffer),
        Orientation::AsIs => buffer.clone(),
    }
}
