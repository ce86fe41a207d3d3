//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input was empty.
    #[error("No image data provided")]
    EmptyInput,

    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Width or height is zero, or the pixel buffer does not match them.
    #[error("Invalid image dimensions {width}x{height} for {len} bytes of RGB data")]
    InvalidDimensions { width: u32, height: u32, len: usize },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded image with RGB pixel data.
///
/// Once an image is placed in the editor's live state it is shared behind an
/// `Arc` and never mutated; every edit produces a new `DecodedImage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from untrusted input, checking that the buffer
    /// length matches the dimensions.
    pub fn try_new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DecodeError> {
        let expected = (width as usize) * (height as usize) * 3;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(DecodeError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// RGB value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 3;
        self.pixels
            .get(idx..idx + 3)
            .map(|p| [p[0], p[1], p[2]])
    }
}
