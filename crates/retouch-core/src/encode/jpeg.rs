//! JPEG encoding for export.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::DecodedImage;

/// Export quality used when the caller does not pick one.
pub const DEFAULT_QUALITY: u8 = 90;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The output buffer could not be allocated
    #[error("Could not allocate {0} bytes for the encoded image")]
    Allocation(usize),

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped into 1..=100.
///
/// # Errors
///
/// Fails on zero dimensions, on a buffer whose length is not
/// `width * height * 3`, or when the encoder itself fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    // JPEG output is almost always well under a quarter of the raw size.
    let mut buffer = Vec::new();
    let reserve = expected_len / 4;
    buffer
        .try_reserve(reserve)
        .map_err(|_| EncodeError::Allocation(reserve))?;

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    tracing::debug!(width, height, quality, bytes = buffer.len(), "Encoded JPEG");
    Ok(buffer)
}

/// Encode a decoded image to JPEG bytes.
pub fn encode_image(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg(&image.pixels, image.width, image.height, quality)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Valid input always yields a complete JPEG stream.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            width in 1u32..=40,
            height in 1u32..=40,
            quality in 0u8..=255,
        ) {
            let pixels = vec![100u8; (width * height * 3) as usize];
            let jpeg = encode_jpeg(&pixels, width, height, quality);
            prop_assert!(jpeg.is_ok());
            let jpeg = jpeg.unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Encoding is deterministic.
        #[test]
        fn prop_deterministic_output(
            width in 1u32..=20,
            height in 1u32..=20,
            quality in 1u8..=100,
        ) {
            let pixels: Vec<u8> = (0..(width * height * 3)).map(|i| (i * 37 % 256) as u8).collect();
            let a = encode_jpeg(&pixels, width, height, quality).unwrap();
            let b = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(a, b);
        }

        /// A buffer of the wrong length is always rejected.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            width in 1u32..=30,
            height in 1u32..=30,
            delta in 1usize..=10,
            grow in any::<bool>(),
        ) {
            let expected = (width * height * 3) as usize;
            let len = if grow { expected + delta } else { expected.saturating_sub(delta) };
            let result = encode_jpeg(&vec![0u8; len], width, height, 90);
            prop_assert!(
                matches!(result, Err(EncodeError::InvalidPixelData { .. })),
                "Mismatched pixel data should return InvalidPixelData error"
            );
        }
    }
}
