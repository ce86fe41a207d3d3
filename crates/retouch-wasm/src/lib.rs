//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editor to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `editor` - The stateful `Editor` class (history, adjustments, crop, export)
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding and display fitting
//! - `encode` - JPEG encoding
//! - `adjustments` - Stateless hue/saturation/exposure rendering
//! - `transform` - Stateless display-space cropping
//!
//! # Usage
//!
//! ```typescript
//! import init, { Editor } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new Editor({ export_quality: 85 });
//! editor.load_image(new Uint8Array(await file.arrayBuffer()));
//!
//! editor.begin_adjustments();
//! editor.update_adjustments(30, 0, 0);
//! const preview = editor.render_preview();
//! editor.commit_adjustments();
//!
//! const jpeg = editor.export();
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod decode;
mod editor;
mod encode;
mod transform;
mod types;

// Re-export public types
pub use adjustments::apply_adjustments;
pub use decode::{decode_image, display_scale, fit_within};
pub use editor::JsEditor;
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use transform::crop_image;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert a core error into a JS exception value.
///
/// The message is also written to the browser console as a warning, since
/// most rejected edits are recoverable and callers often ignore them.
pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    let message = err.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}
