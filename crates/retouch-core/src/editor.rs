//! The editing session for one image.
//!
//! `Editor` owns the live [`Snapshot`], the [`History`] around it, and the
//! current interaction mode. Every committed edit follows the same steps:
//! 1. Build the new state (decode, crop) without touching the editor
//! 2. Record the live state in history
//! 3. Replace the live state
//!
//! A failure in step 1 returns an error and leaves the editor untouched.
//!
//! # Usage
//!
//! ```ignore
//! let mut editor = Editor::new(EditorConfig::default());
//! editor.load_image(&bytes)?;
//!
//! editor.begin_adjustments();
//! editor.update_adjustments(Adjustments::new(30, 0, 0));
//! let preview = editor.render_preview()?;
//! editor.commit_adjustments();
//!
//! let scale = editor.display_scale().unwrap_or(1.0);
//! editor.begin_crop();
//! editor.commit_crop(&DisplayRect::new(0.0, 0.0, 50.0, 50.0), scale)?;
//!
//! editor.undo();
//! let jpeg = editor.export()?;
//! ```

use std::sync::Arc;

use crate::adjustments::apply_adjustments;
use crate::config::EditorConfig;
use crate::decode::{self, DecodedImage};
use crate::encode;
use crate::error::EditError;
use crate::history::History;
use crate::snapshot::Snapshot;
use crate::transform::{crop_display_rect, DisplayRect};
use crate::Adjustments;

/// What the user is currently doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Idle,
    /// Adjustment panel open. Holds the uncommitted slider values.
    Adjusting(Adjustments),
    /// Crop overlay shown.
    Cropping,
}

#[derive(Debug)]
pub struct Editor {
    live: Snapshot,
    history: History,
    mode: EditMode,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let history = match config.max_history {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };
        Self {
            live: Snapshot::empty(),
            history,
            mode: EditMode::Idle,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The live state.
    pub fn snapshot(&self) -> &Snapshot {
        &self.live
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.live.image().map(|img| img.as_ref())
    }

    pub fn has_image(&self) -> bool {
        self.live.has_image()
    }

    /// Committed adjustment values.
    pub fn adjustments(&self) -> Adjustments {
        self.live.adjustments()
    }

    /// Values the preview shows: pending ones while adjusting, otherwise the
    /// committed ones.
    pub fn pending_adjustments(&self) -> Adjustments {
        match self.mode {
            EditMode::Adjusting(pending) => pending,
            _ => self.live.adjustments(),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Record the live state as an undo step and clear redo.
    pub fn record_snapshot(&mut self) {
        self.history.record_snapshot(self.live.clone());
    }

    /// Restore the state before the last commit. Any open adjustment or crop
    /// session is abandoned.
    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.live);
        if changed {
            self.mode = EditMode::Idle;
        }
        changed
    }

    /// Re-apply the last undone commit. Any open session is abandoned.
    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.live);
        if changed {
            self.mode = EditMode::Idle;
        }
        changed
    }

    /// Drop all history and return to an empty editor.
    pub fn reset(&mut self) {
        self.history.clear();
        self.live = Snapshot::empty();
        self.mode = EditMode::Idle;
        tracing::debug!("Editor reset");
    }

    fn commit(&mut self, next: Snapshot) {
        let previous = std::mem::replace(&mut self.live, next);
        self.history.record_snapshot(previous);
    }

    // ===== Image =====

    /// Decode `bytes` and make the result the live image.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), EditError> {
        let image = decode::decode_image(bytes).map_err(|e| {
            tracing::warn!(error = %e, "Image load rejected");
            e
        })?;
        self.replace_image(image);
        Ok(())
    }

    /// Replace the live image. Adjustment values are kept.
    pub fn replace_image(&mut self, image: DecodedImage) {
        tracing::debug!(width = image.width, height = image.height, "Image replaced");
        let next = self.live.with_image(Arc::new(image));
        self.commit(next);
        self.mode = EditMode::Idle;
    }

    /// Scale the live image is shown at inside the configured display box.
    pub fn display_scale(&self) -> Option<f64> {
        self.live.dimensions().map(|(w, h)| {
            decode::display_scale(
                w,
                h,
                self.config.display_max_width,
                self.config.display_max_height,
            )
        })
    }

    /// On-screen size of the live image.
    pub fn display_size(&self) -> Option<(u32, u32)> {
        self.live.dimensions().map(|(w, h)| {
            decode::fit_within(
                w,
                h,
                self.config.display_max_width,
                self.config.display_max_height,
            )
        })
    }

    // ===== Adjustments =====

    /// Open an adjustment session seeded with the live values. Does nothing
    /// if one is already open.
    pub fn begin_adjustments(&mut self) {
        if !matches!(self.mode, EditMode::Adjusting(_)) {
            self.mode = EditMode::Adjusting(self.live.adjustments());
        }
    }

    /// Change the pending values. Opens a session if none is open.
    pub fn update_adjustments(&mut self, adjustments: Adjustments) {
        self.mode = EditMode::Adjusting(adjustments);
    }

    /// Make the pending values live as one undo step.
    ///
    /// Returns `false` when no session is open.
    pub fn commit_adjustments(&mut self) -> bool {
        let EditMode::Adjusting(pending) = self.mode else {
            return false;
        };
        self.mode = EditMode::Idle;
        self.set_adjustments(pending);
        true
    }

    /// Discard the pending values. Returns `false` when no session is open.
    pub fn cancel_adjustments(&mut self) -> bool {
        if !matches!(self.mode, EditMode::Adjusting(_)) {
            return false;
        }
        self.mode = EditMode::Idle;
        tracing::debug!("Adjustments cancelled");
        true
    }

    /// Commit final adjustment values in one step.
    pub fn apply_adjustments(&mut self, adjustments: Adjustments) {
        self.mode = EditMode::Idle;
        self.set_adjustments(adjustments);
    }

    fn set_adjustments(&mut self, adjustments: Adjustments) {
        tracing::debug!(
            hue = adjustments.hue,
            saturation = adjustments.saturation,
            exposure = adjustments.exposure,
            "Adjustments committed"
        );
        let next = self.live.with_adjustments(adjustments);
        self.commit(next);
    }

    // ===== Crop =====

    /// Show the crop overlay. Returns `false` without an image.
    pub fn begin_crop(&mut self) -> bool {
        if !self.live.has_image() {
            return false;
        }
        self.mode = EditMode::Cropping;
        true
    }

    /// Leave crop mode without cropping. Returns `false` if not cropping.
    pub fn cancel_crop(&mut self) -> bool {
        if self.mode != EditMode::Cropping {
            return false;
        }
        self.mode = EditMode::Idle;
        true
    }

    pub fn is_cropping(&self) -> bool {
        self.mode == EditMode::Cropping
    }

    /// Crop the live image to a rectangle drawn on the display.
    ///
    /// `scale` is display size over source size. Returns `Ok(false)` when
    /// there is no image. On error the editor is unchanged and stays in
    /// crop mode.
    pub fn commit_crop(&mut self, rect: &DisplayRect, scale: f64) -> Result<bool, EditError> {
        let Some(image) = self.live.image() else {
            tracing::warn!("Crop ignored: no image loaded");
            return Ok(false);
        };

        let cropped = crop_display_rect(image, rect, scale).map_err(|e| {
            tracing::warn!(error = %e, "Crop rejected");
            e
        })?;

        tracing::debug!(
            width = cropped.width,
            height = cropped.height,
            "Crop committed"
        );
        let next = self.live.with_image(Arc::new(cropped));
        self.commit(next);
        self.mode = EditMode::Idle;
        Ok(true)
    }

    // ===== Output =====

    /// Render the image as the user should currently see it.
    ///
    /// Uses pending adjustment values while a session is open and downscales
    /// to `preview_max_edge` when configured.
    pub fn render_preview(&self) -> Result<DecodedImage, EditError> {
        let image = self.live.image().ok_or(EditError::NoImage)?;
        let adjustments = self.pending_adjustments();

        match self.config.preview_max_edge {
            Some(max_edge) => {
                let mut small =
                    decode::resize_to_fit(image, max_edge, self.config.preview_filter)?;
                crate::adjustments::apply_adjustments_in_place(&mut small.pixels, &adjustments);
                Ok(small)
            }
            None => Ok(apply_adjustments(image, &adjustments)),
        }
    }

    /// Encode the live image with its committed adjustments at the configured
    /// quality.
    pub fn export(&self) -> Result<Vec<u8>, EditError> {
        self.export_with_quality(self.config.effective_quality())
    }

    pub fn export_with_quality(&self, quality: u8) -> Result<Vec<u8>, EditError> {
        let image = self.live.image().ok_or(EditError::NoImage)?;
        let rendered = apply_adjustments(image, &self.live.adjustments());
        let bytes = encode::encode_image(&rendered, quality).map_err(|e| {
            tracing::warn!(error = %e, "Export failed");
            e
        })?;
        tracing::debug!(bytes = bytes.len(), quality, "Exported JPEG");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::test_support::png_bytes;
    use crate::transform::test_support::test_image;
    use crate::transform::CropError;

    fn editor_with(width: u32, height: u32) -> Editor {
        let mut editor = Editor::default();
        editor.replace_image(test_image(width, height));
        editor.history.clear();
        editor
    }

    #[test]
    fn test_new_editor_is_empty() {
        let editor = Editor::default();
        assert!(!editor.has_image());
        assert!(!editor.can_undo());
        assert!(!editor.can_redo());
        assert_eq!(editor.mode(), EditMode::Idle);
    }

    #[test]
    fn test_history_limit_from_config() {
        let config = EditorConfig {
            max_history: Some(2),
            ..EditorConfig::default()
        };
        let mut editor = Editor::new(config);
        for hue in 1..=5 {
            editor.apply_adjustments(Adjustments::new(hue, 0, 0));
        }
        assert_eq!(editor.history().undo_count(), 2);
    }

    #[test]
    fn test_hue_crop_undo_redo_scenario() {
        let mut editor = editor_with(100, 100);
        let original = editor.snapshot().image().cloned().unwrap();

        editor.begin_adjustments();
        editor.update_adjustments(Adjustments::new(30, 0, 0));
        assert!(editor.commit_adjustments());

        let scale = editor.display_scale().unwrap();
        assert_eq!(scale, 1.0);
        assert!(editor.begin_crop());
        assert!(editor
            .commit_crop(&DisplayRect::new(0.0, 0.0, 50.0, 50.0), scale)
            .unwrap());
        assert_eq!(editor.snapshot().dimensions(), Some((50, 50)));
        assert_eq!(editor.adjustments().hue, 30);

        // Back to hue=30 on the full image
        assert!(editor.undo());
        assert_eq!(editor.snapshot().dimensions(), Some((100, 100)));
        assert_eq!(editor.adjustments().hue, 30);
        assert_eq!(editor.history().redo_count(), 1);
        let nearest = editor.history().future().next().unwrap();
        assert_eq!(nearest.dimensions(), Some((50, 50)));

        // Back to the start
        assert!(editor.undo());
        assert_eq!(editor.adjustments().hue, 0);
        assert!(Arc::ptr_eq(editor.snapshot().image().unwrap(), &original));

        assert!(editor.redo());
        assert!(editor.redo());
        assert_eq!(editor.snapshot().dimensions(), Some((50, 50)));
        assert_eq!(editor.adjustments().hue, 30);
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_rejected_crop_changes_nothing() {
        let mut editor = editor_with(100, 100);
        editor.apply_adjustments(Adjustments::new(10, 0, 0));
        editor.undo();
        assert!(editor.begin_crop());

        let before = editor.snapshot().clone();
        let undo_before = editor.history().undo_count();
        let redo_before = editor.history().redo_count();

        let result = editor.commit_crop(&DisplayRect::new(10.0, 10.0, 0.0, 50.0), 1.0);

        assert!(matches!(
            result,
            Err(EditError::Crop(CropError::Degenerate { .. }))
        ));
        assert_eq!(editor.snapshot(), &before);
        assert_eq!(editor.history().undo_count(), undo_before);
        assert_eq!(editor.history().redo_count(), redo_before);
        assert!(editor.is_cropping());
    }

    #[test]
    fn test_out_of_bounds_crop_rejected() {
        let mut editor = editor_with(100, 100);
        let result = editor.commit_crop(&DisplayRect::new(60.0, 0.0, 50.0, 50.0), 1.0);
        assert!(matches!(
            result,
            Err(EditError::Crop(CropError::OutOfBounds { .. }))
        ));
        assert_eq!(editor.snapshot().dimensions(), Some((100, 100)));
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_crop_without_image_is_noop() {
        let mut editor = Editor::default();
        assert!(!editor.begin_crop());
        let result = editor.commit_crop(&DisplayRect::new(0.0, 0.0, 10.0, 10.0), 1.0);
        assert!(matches!(result, Ok(false)));
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_crop_uses_display_scale() {
        let mut editor = editor_with(1200, 600);
        let scale = editor.display_scale().unwrap();
        assert_eq!(scale, 0.5);
        assert_eq!(editor.display_size(), Some((600, 300)));

        editor
            .commit_crop(&DisplayRect::new(100.0, 50.0, 200.0, 100.0), scale)
            .unwrap();

        let image = editor.image().unwrap();
        assert_eq!((image.width, image.height), (400, 200));
        let expected = test_image(1200, 600).pixel(200, 100);
        assert_eq!(image.pixel(0, 0), expected);
    }

    #[test]
    fn test_full_display_crop_keeps_every_pixel() {
        for (w, h) in [(401, 997), (403, 1333), (1, 1333), (1333, 1), (997, 599)] {
            let mut editor = editor_with(w, h);
            let before = editor.image().cloned().unwrap();

            let (dw, dh) = editor.display_size().unwrap();
            let scale = editor.display_scale().unwrap();
            assert!(editor.begin_crop());
            let committed = editor
                .commit_crop(&DisplayRect::new(0.0, 0.0, dw as f64, dh as f64), scale)
                .unwrap();

            assert!(committed, "{w}x{h}");
            assert_eq!(editor.image(), Some(&before), "{w}x{h} shown at {dw}x{dh}");
        }
    }

    #[test]
    fn test_full_bounds_crop_is_identical() {
        let mut editor = editor_with(40, 30);
        let before = editor.image().cloned().unwrap();
        editor
            .commit_crop(&DisplayRect::new(0.0, 0.0, 40.0, 30.0), 1.0)
            .unwrap();
        assert_eq!(editor.image(), Some(&before));
        assert!(editor.can_undo());
    }

    #[test]
    fn test_commit_clears_future() {
        let mut editor = editor_with(10, 10);
        editor.apply_adjustments(Adjustments::new(10, 0, 0));
        editor.apply_adjustments(Adjustments::new(20, 0, 0));
        editor.undo();
        assert!(editor.can_redo());

        editor.apply_adjustments(Adjustments::new(20, 0, 0));
        assert!(!editor.can_redo());

        editor.undo();
        assert!(editor.can_redo());
        editor
            .commit_crop(&DisplayRect::new(0.0, 0.0, 5.0, 5.0), 1.0)
            .unwrap();
        assert!(!editor.can_redo());

        editor.undo();
        editor.replace_image(test_image(4, 4));
        assert!(!editor.can_redo());

        editor.undo();
        editor.record_snapshot();
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_cancel_adjustments_keeps_live_values() {
        let mut editor = editor_with(10, 10);
        editor.begin_adjustments();
        editor.update_adjustments(Adjustments::new(0, -50, 0));
        assert_eq!(editor.pending_adjustments().saturation, -50);

        assert!(editor.cancel_adjustments());
        assert!(editor.adjustments().is_default());
        assert!(editor.pending_adjustments().is_default());
        assert!(!editor.can_undo());
        assert!(!editor.cancel_adjustments());
    }

    #[test]
    fn test_session_records_one_step() {
        let mut editor = editor_with(10, 10);
        editor.begin_adjustments();
        for v in 1..=20 {
            editor.update_adjustments(Adjustments::new(v, 0, v));
        }
        assert!(!editor.can_undo());
        assert!(editor.commit_adjustments());

        assert_eq!(editor.history().undo_count(), 1);
        assert_eq!(editor.adjustments(), Adjustments::new(20, 0, 20));
        assert!(!editor.commit_adjustments());
    }

    #[test]
    fn test_begin_adjustments_seeds_live_values() {
        let mut editor = editor_with(10, 10);
        editor.apply_adjustments(Adjustments::new(45, 0, 0));
        editor.begin_adjustments();
        assert_eq!(editor.mode(), EditMode::Adjusting(Adjustments::new(45, 0, 0)));

        editor.update_adjustments(Adjustments::new(50, 0, 0));
        editor.begin_adjustments();
        assert_eq!(editor.pending_adjustments().hue, 50);
    }

    #[test]
    fn test_undo_abandons_session() {
        let mut editor = editor_with(10, 10);
        editor.apply_adjustments(Adjustments::new(45, 0, 0));
        editor.update_adjustments(Adjustments::new(90, 0, 0));

        assert!(editor.undo());
        assert_eq!(editor.mode(), EditMode::Idle);
        assert!(editor.adjustments().is_default());
    }

    #[test]
    fn test_undo_redo_on_empty_history() {
        let mut editor = editor_with(10, 10);
        let before = editor.snapshot().clone();
        assert!(!editor.undo());
        assert!(!editor.redo());
        assert_eq!(editor.snapshot(), &before);
    }

    #[test]
    fn test_replace_image_keeps_adjustments() {
        let mut editor = editor_with(10, 10);
        editor.apply_adjustments(Adjustments::new(0, 25, 0));
        editor.replace_image(test_image(20, 20));

        assert_eq!(editor.adjustments().saturation, 25);
        assert_eq!(editor.snapshot().dimensions(), Some((20, 20)));
        assert!(editor.undo());
        assert_eq!(editor.snapshot().dimensions(), Some((10, 10)));
    }

    #[test]
    fn test_load_image_decodes_png() {
        let mut editor = Editor::default();
        let pixels = vec![200u8; 6 * 4 * 3];
        editor.load_image(&png_bytes(6, 4, &pixels)).unwrap();

        assert_eq!(editor.snapshot().dimensions(), Some((6, 4)));
        assert_eq!(editor.image().unwrap().pixel(0, 0), Some([200, 200, 200]));
        assert!(editor.can_undo());
    }

    #[test]
    fn test_load_invalid_bytes_changes_nothing() {
        let mut editor = editor_with(10, 10);
        let before = editor.snapshot().clone();

        assert!(matches!(
            editor.load_image(&[]),
            Err(EditError::Decode(decode::DecodeError::EmptyInput))
        ));
        assert!(editor.load_image(b"definitely not an image").is_err());

        assert_eq!(editor.snapshot(), &before);
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_preview_uses_pending_values() {
        let mut editor = editor_with(4, 4);
        editor.update_adjustments(Adjustments::new(0, 0, -100));

        let preview = editor.render_preview().unwrap();
        assert!(preview.pixels.iter().all(|&p| p == 0));

        // Committed state is untouched
        let committed = apply_adjustments(editor.image().unwrap(), &editor.adjustments());
        assert_eq!(&committed, editor.image().unwrap());
    }

    #[test]
    fn test_preview_matches_export_render() {
        let mut editor = editor_with(8, 8);
        editor.apply_adjustments(Adjustments::new(60, -30, 20));

        let preview = editor.render_preview().unwrap();
        let expected = apply_adjustments(editor.image().unwrap(), &editor.adjustments());
        assert_eq!(preview, expected);
    }

    #[test]
    fn test_preview_downscales_when_configured() {
        let config = EditorConfig {
            preview_max_edge: Some(50),
            ..EditorConfig::default()
        };
        let mut editor = Editor::new(config);
        editor.replace_image(test_image(200, 100));

        let preview = editor.render_preview().unwrap();
        assert_eq!((preview.width, preview.height), (50, 25));
    }

    #[test]
    fn test_preview_and_export_without_image() {
        let editor = Editor::default();
        assert!(matches!(editor.render_preview(), Err(EditError::NoImage)));
        assert!(matches!(editor.export(), Err(EditError::NoImage)));
    }

    #[test]
    fn test_export_produces_jpeg() {
        let mut editor = editor_with(16, 16);
        editor.apply_adjustments(Adjustments::new(0, 0, 50));

        let bytes = editor.export().unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = decode::decode_image(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 16));
    }

    #[test]
    fn test_export_ignores_pending_values() {
        let mut editor = editor_with(16, 16);
        let committed = editor.export_with_quality(90).unwrap();

        editor.update_adjustments(Adjustments::new(0, 0, -100));
        let during_session = editor.export_with_quality(90).unwrap();

        assert_eq!(committed, during_session);
    }

    #[test]
    fn test_reset() {
        let mut editor = editor_with(10, 10);
        editor.apply_adjustments(Adjustments::new(10, 0, 0));
        editor.reset();

        assert!(!editor.has_image());
        assert!(!editor.can_undo());
        assert!(editor.adjustments().is_default());
    }
}
