//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG or PNG from bytes, EXIF orientation applied
//! - [`fit_within`] - On-screen size of an image inside a display box
//! - [`display_scale`] - Scale factor between the display and the source image
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, fit_within, display_scale } from '@retouch/wasm';
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const [w, h] = fit_within(image.width, image.height, 600, 600);
//! const scale = display_scale(image.width, image.height, 600, 600);
//! ```

use crate::js_error;
use crate::types::JsDecodedImage;
use retouch_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from bytes.
///
/// The format is guessed from the content. EXIF orientation is applied so the
/// image is upright.
///
/// # Errors
///
/// Returns an error if the bytes are empty, not a supported format, or
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Size of a `width x height` image fitted into `max_width x max_height`
/// without upscaling, as `[width, height]`.
#[wasm_bindgen]
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> Vec<u32> {
    let (w, h) = decode::fit_within(width, height, max_width, max_height);
    vec![w, h]
}

/// Display size divided by source size for an image fitted into the box.
///
/// Pass the result to `crop_image` or `Editor.commit_crop` with a rectangle
/// drawn on the fitted image.
#[wasm_bindgen]
pub fn display_scale(width: u32, height: u32, max_width: u32, max_height: u32) -> f64 {
    decode::display_scale(width, height, max_width, max_height)
}
