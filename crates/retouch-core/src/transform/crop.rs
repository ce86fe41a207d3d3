//! Crop commit pipeline.
//!
//! The user draws a crop rectangle on the displayed image, which is usually
//! scaled down to fit the editor. Committing the crop:
//!
//! 1. validates the rectangle in display space,
//! 2. divides by the display scale and rounds each of x, y, width and height
//!    half away from zero,
//! 3. snaps a right or bottom edge that reaches the displayed edge to the
//!    source edge, and clamps the result into the source bounds,
//! 4. copies exactly those source pixels into a new image (no resampling).
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - `DisplayRect` is in display pixels (`f64`)
//! - `CropRegion` is in source pixels (`u32`)

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{display_length, DecodedImage};

/// Slack allowed when checking a display rectangle against the displayed
/// image bounds, to absorb floating point noise from the UI.
const BOUNDS_TOLERANCE: f64 = 0.5;

/// Errors produced while validating or executing a crop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CropError {
    /// Width or height is zero or negative.
    #[error("Crop rectangle is degenerate ({width}x{height})")]
    Degenerate { width: f64, height: f64 },

    /// A coordinate is NaN or infinite.
    #[error("Crop rectangle has a non-finite coordinate")]
    NotFinite,

    /// The display scale is not a positive finite number.
    #[error("Invalid display scale {0}")]
    InvalidScale(f64),

    /// The rectangle extends past the displayed image.
    #[error(
        "Crop rectangle ({x}, {y}, {width}x{height}) lies outside the displayed \
         image ({display_width}x{display_height})"
    )]
    OutOfBounds {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        display_width: f64,
        display_height: f64,
    },

    /// A source-space region does not fit the image it is applied to.
    #[error("Crop region {region:?} does not fit a {width}x{height} image")]
    RegionOutsideImage {
        region: CropRegion,
        width: u32,
        height: u32,
    },

    /// The output buffer could not be allocated.
    #[error("Could not allocate {0} bytes for the cropped image")]
    Allocation(usize),
}

/// Crop rectangle as drawn on the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Crop rectangle in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole `width x height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Whether the region is non-empty and lies inside a
    /// `width x height` image.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some_and(|r| r <= width)
            && self.y.checked_add(self.height).is_some_and(|b| b <= height)
    }
}

/// Map a display-space rectangle to a source-space region.
///
/// `scale` is display size divided by source size (0.5 when the image is
/// shown at half size).
pub fn source_region(
    rect: &DisplayRect,
    scale: f64,
    source_width: u32,
    source_height: u32,
) -> Result<CropRegion, CropError> {
    if ![rect.x, rect.y, rect.width, rect.height]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(CropError::NotFinite);
    }
    if !(scale.is_finite() && scale > 0.0) {
        return Err(CropError::InvalidScale(scale));
    }
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Err(CropError::Degenerate {
            width: rect.width,
            height: rect.height,
        });
    }

    // The UI lays the image out at whole-pixel size (see `fit_within`), which
    // can differ from `source * scale` by up to half a pixel, or more for
    // edges clamped to one pixel. Both count as the displayed edge.
    let exact_width = source_width as f64 * scale;
    let exact_height = source_height as f64 * scale;
    let shown_width = display_length(source_width, scale) as f64;
    let shown_height = display_length(source_height, scale) as f64;

    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;
    if rect.x < -BOUNDS_TOLERANCE
        || rect.y < -BOUNDS_TOLERANCE
        || right > exact_width.max(shown_width) + BOUNDS_TOLERANCE
        || bottom > exact_height.max(shown_height) + BOUNDS_TOLERANCE
    {
        return Err(CropError::OutOfBounds {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            display_width: exact_width.max(shown_width),
            display_height: exact_height.max(shown_height),
        });
    }

    // f64::round rounds half away from zero; the float-to-int cast
    // saturates, so negatives become 0.
    let to_source = |v: f64| (v / scale).round().max(0.0) as u64;
    let source_width = source_width as u64;
    let source_height = source_height as u64;
    let x = to_source(rect.x).min(source_width);
    let y = to_source(rect.y).min(source_height);

    // An edge that reaches the displayed edge is the source edge.
    let width = if right >= exact_width.min(shown_width) - BOUNDS_TOLERANCE {
        source_width - x
    } else {
        to_source(rect.width).min(source_width - x)
    };
    let height = if bottom >= exact_height.min(shown_height) - BOUNDS_TOLERANCE {
        source_height - y
    } else {
        to_source(rect.height).min(source_height - y)
    };

    if width == 0 || height == 0 {
        return Err(CropError::Degenerate {
            width: rect.width,
            height: rect.height,
        });
    }

    Ok(CropRegion::new(x as u32, y as u32, width as u32, height as u32))
}

/// Copy the pixels inside `region` into a new image.
///
/// The output is exactly `region.width x region.height`; no scaling is
/// applied.
pub fn crop_pixels(image: &DecodedImage, region: &CropRegion) -> Result<DecodedImage, CropError> {
    if !region.fits(image.width, image.height) {
        return Err(CropError::RegionOutsideImage {
            region: *region,
            width: image.width,
            height: image.height,
        });
    }

    if *region == CropRegion::full(image.width, image.height) {
        return Ok(image.clone());
    }

    let row_bytes = region.width as usize * 3;
    let total = row_bytes * region.height as usize;
    let mut output = Vec::new();
    output
        .try_reserve_exact(total)
        .map_err(|_| CropError::Allocation(total))?;

    let stride = image.width as usize * 3;
    for row in region.y..region.y + region.height {
        let start = row as usize * stride + region.x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Ok(DecodedImage::new(region.width, region.height, output))
}

/// Validate, map and extract a display-space crop in one step.
pub fn crop_display_rect(
    image: &DecodedImage,
    rect: &DisplayRect,
    scale: f64,
) -> Result<DecodedImage, CropError> {
    let region = source_region(rect, scale, image.width, image.height)?;
    crop_pixels(image, &region)
}
