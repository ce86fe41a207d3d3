//! Retouch Core - single-image editing library
//!
//! This crate provides the editing core behind the Retouch browser editor:
//! snapshot-based undo/redo, the crop pipeline, hue/saturation/exposure
//! rendering, and image decode/encode.

pub mod adjustments;
pub mod config;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod error;
pub mod history;
pub mod snapshot;
pub mod transform;

pub use adjustments::{apply_adjustments, apply_adjustments_in_place, AdjustmentError};
pub use config::EditorConfig;
pub use decode::DecodedImage;
pub use editor::{EditMode, Editor};
pub use error::EditError;
pub use history::History;
pub use snapshot::Snapshot;
pub use transform::{
    crop_display_rect, crop_pixels, source_region, CropError, CropRegion, DisplayRect,
};

/// Hue, saturation and exposure for the live image.
///
/// All values are whole numbers. Constructors clamp into the slider ranges:
/// hue -180..=180 degrees, saturation and exposure -100..=100 percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "AdjustmentValues")]
pub struct Adjustments {
    /// Hue rotation in degrees (-180 to 180)
    pub hue: i32,
    /// Saturation change in percent (-100 to 100)
    pub saturation: i32,
    /// Exposure (brightness) change in percent (-100 to 100)
    pub exposure: i32,
}

/// Unchecked wire form of [`Adjustments`]; deserialized values are clamped
/// through [`Adjustments::new`].
#[derive(serde::Deserialize)]
struct AdjustmentValues {
    hue: i32,
    saturation: i32,
    exposure: i32,
}

impl From<AdjustmentValues> for Adjustments {
    fn from(v: AdjustmentValues) -> Self {
        Self::new(v.hue, v.saturation, v.exposure)
    }
}

impl Adjustments {
    pub const HUE_MIN: i32 = -180;
    pub const HUE_MAX: i32 = 180;
    pub const PERCENT_MIN: i32 = -100;
    pub const PERCENT_MAX: i32 = 100;

    /// Create adjustments, clamping each value into its range.
    pub fn new(hue: i32, saturation: i32, exposure: i32) -> Self {
        Self {
            hue: hue.clamp(Self::HUE_MIN, Self::HUE_MAX),
            saturation: saturation.clamp(Self::PERCENT_MIN, Self::PERCENT_MAX),
            exposure: exposure.clamp(Self::PERCENT_MIN, Self::PERCENT_MAX),
        }
    }

    /// Build adjustments from untyped numbers (slider input from JavaScript).
    ///
    /// Values are rounded half away from zero and clamped. NaN and infinities
    /// are rejected.
    pub fn from_f64(hue: f64, saturation: f64, exposure: f64) -> Result<Self, AdjustmentError> {
        let whole = |name: &'static str, value: f64| {
            if value.is_finite() {
                // Saturating cast: out-of-range values are clamped by `new`.
                Ok(value.round() as i32)
            } else {
                Err(AdjustmentError::NotFinite { name, value })
            }
        };
        Ok(Self::new(
            whole("hue", hue)?,
            whole("saturation", saturation)?,
            whole("exposure", exposure)?,
        ))
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Hue in degrees mapped onto (-180, 180], so -180 and 180 render alike.
    pub fn normalized_hue(&self) -> i32 {
        let h = self.hue.rem_euclid(360);
        if h > 180 {
            h - 360
        } else {
            h
        }
    }

    /// Saturation multiplier `(100 + saturation) / 100`, never negative.
    pub fn saturation_factor(&self) -> f32 {
        ((100 + self.saturation) as f32 / 100.0).max(0.0)
    }

    /// Brightness multiplier `(100 + exposure) / 100`, never negative.
    pub fn exposure_factor(&self) -> f32 {
        ((100 + self.exposure) as f32 / 100.0).max(0.0)
    }
}
