//! Linear radiance image buffer and display encoding.

use std::path::Path;

use lumen_math::{Color, Interval};
use thiserror::Error;

/// Display gamma applied when encoding to 8 bits.
pub const DISPLAY_GAMMA: f64 = 2.2;

/// Errors that can occur when accessing or saving an image.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("encoded buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },

    #[error("failed to save image: {0}")]
    Save(#[from] image::ImageError),
}

pub type ImageResult<T> = Result<T, ImageError>;

/// Clamp to [0, 1] and apply the display gamma curve.
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    Interval::UNIT.clamp(linear).powf(1.0 / DISPLAY_GAMMA)
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    // Truncation, so only exactly 1.0 reaches 255
    let encode = |c: f64| (255.0 * linear_to_gamma(c)) as u8;
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// Row-major grid of linear radiance values, origin at the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> ImageResult<Self> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> ImageResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(ImageError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> ImageResult<Color> {
        Ok(self.pixels[self.index(x, y)?])
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> ImageResult<()> {
        let index = self.index(x, y)?;
        self.pixels[index] = color;
        Ok(())
    }

    /// Mean of every pixel, in linear space.
    pub fn average(&self) -> Color {
        let sum: Color = self.pixels.iter().copied().sum();
        sum / self.pixels.len() as f64
    }

    /// Gamma-encoded RGB bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    pub fn to_rgb_image(&self) -> ImageResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.to_rgb8()).ok_or(
            ImageError::BufferSize {
                width: self.width,
                height: self.height,
            },
        )
    }

    /// Encode and write the image. The format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let path = path.as_ref();
        self.to_rgb_image()?.save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
