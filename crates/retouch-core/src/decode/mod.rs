//! Image ingestion for the editor.
//!
//! This module provides functionality for:
//! - Decoding uploaded image bytes (JPEG, PNG) with EXIF orientation applied
//! - Fitting an image into the on-screen display box
//! - Downscaling previews
//!
//! All operations are synchronous. In the browser they can run inside a Web
//! Worker; the editor only sees the finished `DecodedImage`.

mod ingest;
mod resize;
mod types;

pub use ingest::decode_image;
pub use resize::{display_length, display_scale, fit_within, resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};

#[cfg(test)]
pub(crate) use ingest::test_support;
