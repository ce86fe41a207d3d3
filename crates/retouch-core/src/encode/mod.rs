//! Export encoding.
//!
//! The exported file is the live image with its adjustments already baked in;
//! callers render through [`crate::adjustments`] first and hand the result to
//! [`encode_image`].

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError, DEFAULT_QUALITY};
