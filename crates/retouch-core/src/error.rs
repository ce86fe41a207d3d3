//! Errors returned by [`Editor`](crate::Editor) operations.

use thiserror::Error;

use crate::adjustments::AdjustmentError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::transform::CropError;

/// Any failure of an editor operation. None of them change editor state.
#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Adjustment(#[from] AdjustmentError),

    /// An operation that needs an image was called before one was loaded.
    #[error("No image loaded")]
    NoImage,
}
