//! Immutable edit state.
//!
//! A `Snapshot` is the image plus its adjustment values at one commit point.
//! The live state of the editor is itself a `Snapshot`; undo and redo move
//! snapshots between the live slot and the history stacks.
//!
//! Images are held behind `Arc`, so consecutive snapshots that only differ in
//! adjustment values share one pixel buffer.

use std::sync::Arc;

use crate::decode::DecodedImage;
use crate::Adjustments;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    image: Option<Arc<DecodedImage>>,
    adjustments: Adjustments,
}

impl Snapshot {
    pub fn new(image: Option<Arc<DecodedImage>>, adjustments: Adjustments) -> Self {
        Self { image, adjustments }
    }

    /// A snapshot with no image and default adjustments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copy of this snapshot with a different image.
    pub fn with_image(&self, image: Arc<DecodedImage>) -> Self {
        Self {
            image: Some(image),
            adjustments: self.adjustments,
        }
    }

    /// Copy of this snapshot with different adjustment values.
    pub fn with_adjustments(&self, adjustments: Adjustments) -> Self {
        Self {
            image: self.image.clone(),
            adjustments,
        }
    }

    pub fn image(&self) -> Option<&Arc<DecodedImage>> {
        self.image.as_ref()
    }

    pub fn adjustments(&self) -> Adjustments {
        self.adjustments
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Width and height of the image, if any.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| (img.width, img.height))
    }
}
