//! Image dimension probing.
//!
//! Only the image header is read; pixel data is never decoded.

use std::fmt;
use std::io::Cursor;

use image::ImageReader;

use crate::error::{MockupError, Result};

/// Canvas size used when the base image cannot be read.
pub const FALLBACK_CANVAS: Dimensions = Dimensions::new(2000, 1500);

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Reads image dimensions from raw bytes.
#[cfg_attr(test, mockall::automock)]
pub trait DimensionResolver {
    /// Return the dimensions encoded in `bytes`, or `MockupError::Decode`.
    fn resolve(&self, bytes: &[u8]) -> Result<Dimensions>;
}

/// Header-only probe backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageProbe;

impl DimensionResolver for ImageProbe {
    fn resolve(&self, bytes: &[u8]) -> Result<Dimensions> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| MockupError::Decode {
                message: format!("Failed to guess image format: {}", e),
            })?;

        let (width, height) = reader.into_dimensions().map_err(|e| MockupError::Decode {
            message: e.to_string(),
        })?;

        if width == 0 || height == 0 {
            return Err(MockupError::Decode {
                message: format!("Image reports empty dimensions {}x{}", width, height),
            });
        }

        Ok(Dimensions::new(width, height))
    }
}
