//! Hue/saturation/exposure WASM bindings.
//!
//! The `Editor` class renders adjustments itself; this stateless function is
//! for callers that manage their own images (thumbnails, before/after views).

use crate::js_error;
use crate::types::JsDecodedImage;
use retouch_core::Adjustments;
use wasm_bindgen::prelude::*;

/// Apply hue, saturation and exposure to an image.
///
/// Values are slider positions: hue in degrees (-180 to 180), saturation and
/// exposure in percent (-100 to 100). They are rounded and clamped into range.
/// The source image is not modified.
///
/// # Errors
///
/// Returns an error for NaN or infinite values and for an image whose buffer
/// does not match its dimensions.
///
/// # Example (TypeScript)
/// ```typescript
/// const warmer = apply_adjustments(sourceImage, -15, 10, 5);
/// ```
#[wasm_bindgen]
pub fn apply_adjustments(
    image: &JsDecodedImage,
    hue: f64,
    saturation: f64,
    exposure: f64,
) -> Result<JsDecodedImage, JsValue> {
    let adjustments = Adjustments::from_f64(hue, saturation, exposure).map_err(js_error)?;
    let mut decoded = image.to_decoded().map_err(js_error)?;
    retouch_core::apply_adjustments_in_place(&mut decoded.pixels, &adjustments);
    Ok(JsDecodedImage::from_decoded(decoded))
}
