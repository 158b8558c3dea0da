//! Image decoding and resizing for terminal display.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use image::{imageops::FilterType, RgbaImage};
use tracing::debug;

use crate::config::PrintConfig;
use crate::term::PixelSource;
use crate::types::Rgba;

/// A decoded RGBA image usable as a [`PixelSource`].
#[derive(Debug, Clone)]
pub struct LoadedImage {
    image: RgbaImage,
    width: u16,
    height: u16,
}

impl LoadedImage {
    /// Wrap an RGBA buffer. Fails if a side does not fit a terminal coordinate.
    pub fn new(image: RgbaImage) -> Result<Self> {
        let (w, h) = image.dimensions();
        let width = u16::try_from(w).context("image too wide")?;
        let height = u16::try_from(h).context("image too tall")?;
        Ok(Self {
            image,
            width,
            height,
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl PixelSource for LoadedImage {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn pixel(&self, x: u16, y: u16) -> Rgba {
        self.image
            .get_pixel_checked(x as u32, y as u32)
            .map(|p| Rgba::from(p.0))
            .unwrap_or(Rgba::TRANSPARENT)
    }
}

/// Target size for an image of `width` x `height`.
///
/// The aspect ratio scales the height first, then the image is scaled so its
/// longer side is `max_len`. Results are truncated and never below 1.
pub fn resize_dimensions(
    width: u32,
    height: u32,
    max_len: Option<u32>,
    aspect_ratio: f32,
) -> (u32, u32) {
    let mut w = width;
    let mut h = height;
    if aspect_ratio != 1.0 {
        h = (aspect_ratio as f64 * h as f64) as u32;
    }
    if let Some(max_len) = max_len {
        let longest = w.max(h).max(1);
        let rate = max_len as f64 / longest as f64;
        w = (rate * w as f64) as u32;
        h = (rate * h as f64) as u32;
    }
    (w.max(1), h.max(1))
}

/// Decode any supported image, convert to RGBA and resize per `config`.
pub fn load_and_resize(path: &Path, config: &PrintConfig) -> Result<LoadedImage> {
    let decoded = image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?
        .to_rgba8();
    let (native_w, native_h) = decoded.dimensions();
    ensure!(native_w > 0 && native_h > 0, "image {} is empty", path.display());

    let (w, h) = resize_dimensions(native_w, native_h, config.max_len, config.aspect_ratio);
    let image = if (w, h) != (native_w, native_h) {
        let filter = if config.antialias {
            FilterType::Lanczos3
        } else {
            FilterType::Nearest
        };
        image::imageops::resize(&decoded, w, h, filter)
    } else {
        decoded
    };

    debug!(
        path = %path.display(),
        native_w,
        native_h,
        w,
        h,
        "loaded image"
    );
    LoadedImage::new(image)
}
