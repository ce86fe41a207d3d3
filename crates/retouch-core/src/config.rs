//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::encode::DEFAULT_QUALITY;

/// Settings for an [`Editor`](crate::Editor).
///
/// Missing fields take their defaults when deserialized, so a host can pass a
/// partial object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo depth (`None` = unbounded).
    pub max_history: Option<usize>,
    /// JPEG quality used by `export` (1-100).
    pub export_quality: u8,
    /// Width of the box the image is fitted into on screen.
    pub display_max_width: u32,
    /// Height of the box the image is fitted into on screen.
    pub display_max_height: u32,
    /// Longest edge of rendered previews (`None` = full size).
    pub preview_max_edge: Option<u32>,
    pub preview_filter: FilterType,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: None,
            export_quality: DEFAULT_QUALITY,
            display_max_width: 600,
            display_max_height: 600,
            preview_max_edge: None,
            preview_filter: FilterType::Bilinear,
        }
    }
}

impl EditorConfig {
    /// Export quality clamped into the range the encoder accepts.
    pub fn effective_quality(&self) -> u8 {
        self.export_quality.clamp(1, 100)
    }
}
