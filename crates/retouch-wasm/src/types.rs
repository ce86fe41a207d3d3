//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Retouch
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use retouch_core::decode::{DecodeError, DecodedImage};
use wasm_bindgen::prelude::*;

/// A decoded RGB image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is
/// made to JavaScript memory as a `Uint8Array`. To paint it on a canvas, expand
/// it to RGBA and wrap it in an `ImageData`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this
/// is optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    ///
    /// The buffer length is checked when the image is handed to an operation,
    /// not here.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns the pixels expanded to RGBA with opaque alpha, ready for
    /// `new ImageData(new Uint8ClampedArray(rgba), width, height)`.
    pub fn rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for px in self.pixels.chunks_exact(3) {
            out.extend_from_slice(px);
            out.push(255);
        }
        out
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsDecodedImage {
    /// Wrap a core image without copying.
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Copy into a core image, checking that the buffer matches the
    /// dimensions.
    pub(crate) fn to_decoded(&self) -> Result<DecodedImage, DecodeError> {
        DecodedImage::try_new(self.width, self.height, self.pixels.clone())
    }
}
