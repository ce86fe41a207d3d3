//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGB pixel data to JPEG bytes
//! - [`encode_jpeg_from_image`] - Encode a JsDecodedImage to JPEG bytes
//!
//! Most callers export through `Editor.export()`, which bakes in the live
//! adjustments first. These functions encode pixels exactly as given.
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg_from_image } from '@retouch/wasm';
//!
//! const jpeg = encode_jpeg_from_image(image, 90);
//! const blob = new Blob([jpeg], { type: 'image/jpeg' });
//! ```

use crate::js_error;
use crate::types::JsDecodedImage;
use retouch_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data as a `Uint8Array` (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, values outside are clamped; recommended: 90)
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(js_error)
}

/// Encode a JsDecodedImage to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let image = image.to_decoded().map_err(js_error)?;
    encode::encode_image(&image, quality).map_err(js_error)
}
