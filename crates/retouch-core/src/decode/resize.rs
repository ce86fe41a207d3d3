//! Display fitting and preview resizing.
//!
//! The editor shows the image scaled down to fit a display box. The UI draws
//! crop rectangles in that scaled space, so the scale factor computed here is
//! the one the crop pipeline divides by.

use super::{DecodeError, DecodedImage, FilterType};

/// Scale factor that fits `width x height` inside `max_width x max_height`
/// without upscaling.
///
/// Returns `1.0` for images that already fit, and for degenerate input.
pub fn display_scale(width: u32, height: u32, max_width: u32, max_height: u32) -> f64 {
    if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
        return 1.0;
    }
    let sx = max_width as f64 / width as f64;
    let sy = max_height as f64 / height as f64;
    sx.min(sy).min(1.0)
}

/// Whole-pixel length a `source` edge is laid out at when shown at `scale`.
///
/// Never less than one pixel for a non-empty edge. The crop pipeline uses the
/// same rounding to decide where the displayed image ends.
pub fn display_length(source: u32, scale: f64) -> u32 {
    if source == 0 {
        return 0;
    }
    ((source as f64 * scale).round() as u32).max(1)
}

/// On-screen dimensions of a `width x height` image fitted into
/// `max_width x max_height`, preserving aspect ratio.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let scale = display_scale(width, height, max_width, max_height);
    (display_length(width, scale), display_length(height, scale))
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero target size and
/// `DecodeError::CorruptedFile` if the source buffer is inconsistent.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width,
            height,
            len: image.pixels.len(),
        });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resize an image so its longest edge is at most `max_edge`.
///
/// Images that already fit are returned unchanged.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: 0,
            height: 0,
            len: image.pixels.len(),
        });
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = fit_within(image.width, image.height, max_edge, max_edge);
    resize(image, new_width, new_height, filter)
}
