//! Geometric edits.
//!
//! Cropping is the only geometric edit. It is destructive: a committed crop
//! produces a new image that replaces the live one, and the previous image
//! stays reachable through undo.
//!
//! # Coordinate System
//!
//! - Crop rectangles arrive in display coordinates (the scaled-down image
//!   the user sees) together with the display scale
//! - They are converted to source pixels before extraction
//! - Origin is top-left corner

mod crop;

pub use crop::{
    crop_display_rect, crop_pixels, source_region, CropError, CropRegion, DisplayRect,
};

#[cfg(test)]
pub(crate) use crop::test_support;
