//! WASM bindings for cropping.

use crate::js_error;
use crate::types::JsDecodedImage;
use retouch_core::transform::{crop_display_rect, DisplayRect};
use wasm_bindgen::prelude::*;

/// Crop an image to a rectangle drawn on its scaled-down display.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `x`, `y`, `width`, `height` - Rectangle in display pixels
/// * `scale` - Display size divided by source size (see `display_scale`)
///
/// # Returns
///
/// New `JsDecodedImage` holding exactly the selected source pixels.
///
/// # Errors
///
/// Fails for an empty or non-finite rectangle, a rectangle outside the
/// displayed image, or a non-positive scale.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const scale = display_scale(image.width, image.height, 600, 600);
/// const cropped = crop_image(image, 10, 10, 200, 150, scale);
/// ```
#[wasm_bindgen]
pub fn crop_image(
    image: &JsDecodedImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    scale: f64,
) -> Result<JsDecodedImage, JsValue> {
    let src = image.to_decoded().map_err(js_error)?;
    let rect = DisplayRect::new(x, y, width, height);
    crop_display_rect(&src, &rect, scale)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}
