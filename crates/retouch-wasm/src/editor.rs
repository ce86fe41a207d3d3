//! The stateful `Editor` class exposed to JavaScript.
//!
//! Wraps one [`retouch_core::Editor`]. Methods that can be rejected return
//! `Result<_, JsValue>` so they throw on the JS side; rejected edits leave the
//! editor unchanged.
//!
//! # Example
//!
//! ```typescript
//! const editor = new Editor();          // or new Editor({ max_history: 50 })
//! editor.load_image(bytes);
//!
//! // Adjustment panel
//! editor.begin_adjustments();
//! editor.update_adjustments(hue, saturation, exposure); // on every slider tick
//! draw(editor.render_preview());
//! editor.commit_adjustments();                          // panel closed
//!
//! // Crop overlay, rectangle drawn on the fitted display image
//! editor.begin_crop();
//! editor.commit_crop(x, y, w, h, editor.display_scale());
//!
//! if (editor.can_undo) editor.undo();
//! ```

use crate::js_error;
use crate::types::JsDecodedImage;
use retouch_core::transform::DisplayRect;
use retouch_core::{Adjustments, EditMode, Editor, EditorConfig};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = Editor)]
pub struct JsEditor {
    inner: Editor,
}

#[wasm_bindgen(js_class = Editor)]
impl JsEditor {
    /// Create an editor.
    ///
    /// `config` is an optional plain object; missing fields take their
    /// defaults. Recognized fields: `max_history`, `export_quality`,
    /// `display_max_width`, `display_max_height`, `preview_max_edge`,
    /// `preview_filter` (`"Nearest"`, `"Bilinear"` or `"Lanczos3"`).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_error)?
        };
        Ok(Self::with_config(config))
    }

    /// The active configuration as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config()).map_err(js_error)
    }

    // ===== Image =====

    /// Decode `bytes` and make the result the live image (one undo step).
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_image(bytes).map_err(js_error)
    }

    /// Make an already decoded image the live image (one undo step).
    pub fn set_image(&mut self, image: &JsDecodedImage) -> Result<(), JsValue> {
        let image = image.to_decoded().map_err(js_error)?;
        self.inner.replace_image(image);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> Option<u32> {
        self.inner.snapshot().dimensions().map(|(w, _)| w)
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> Option<u32> {
        self.inner.snapshot().dimensions().map(|(_, h)| h)
    }

    /// Copy of the live image without adjustments applied.
    pub fn image(&self) -> Option<JsDecodedImage> {
        self.inner
            .image()
            .map(|img| JsDecodedImage::from_decoded(img.clone()))
    }

    /// Scale the live image is displayed at, for use with `commit_crop`.
    pub fn display_scale(&self) -> Option<f64> {
        self.inner.display_scale()
    }

    /// On-screen `[width, height]` of the live image.
    pub fn display_size(&self) -> Option<Vec<u32>> {
        self.inner.display_size().map(|(w, h)| vec![w, h])
    }

    // ===== History =====

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    #[wasm_bindgen(getter)]
    pub fn undo_count(&self) -> usize {
        self.inner.history().undo_count()
    }

    #[wasm_bindgen(getter)]
    pub fn redo_count(&self) -> usize {
        self.inner.history().redo_count()
    }

    /// Record the live state as an undo step. Clears redo.
    pub fn record_snapshot(&mut self) {
        self.inner.record_snapshot();
    }

    /// Drop the image and all history.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    // ===== Adjustments =====

    /// Committed hue in degrees.
    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> i32 {
        self.inner.adjustments().hue
    }

    /// Committed saturation in percent.
    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> i32 {
        self.inner.adjustments().saturation
    }

    /// Committed exposure in percent.
    #[wasm_bindgen(getter)]
    pub fn exposure(&self) -> i32 {
        self.inner.adjustments().exposure
    }

    /// Committed values as `{ hue, saturation, exposure }`.
    pub fn adjustments(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.adjustments()).map_err(js_error)
    }

    /// Values the preview currently shows as `{ hue, saturation, exposure }`.
    pub fn pending_adjustments(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.pending_adjustments()).map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn is_adjusting(&self) -> bool {
        matches!(self.inner.mode(), EditMode::Adjusting(_))
    }

    pub fn begin_adjustments(&mut self) {
        self.inner.begin_adjustments();
    }

    /// Change the pending slider values. Nothing is recorded until
    /// `commit_adjustments`.
    pub fn update_adjustments(
        &mut self,
        hue: f64,
        saturation: f64,
        exposure: f64,
    ) -> Result<(), JsValue> {
        let adjustments = Adjustments::from_f64(hue, saturation, exposure).map_err(js_error)?;
        self.inner.update_adjustments(adjustments);
        Ok(())
    }

    pub fn commit_adjustments(&mut self) -> bool {
        self.inner.commit_adjustments()
    }

    pub fn cancel_adjustments(&mut self) -> bool {
        self.inner.cancel_adjustments()
    }

    /// Commit final values in one step.
    pub fn apply_adjustments(
        &mut self,
        hue: f64,
        saturation: f64,
        exposure: f64,
    ) -> Result<(), JsValue> {
        let adjustments = Adjustments::from_f64(hue, saturation, exposure).map_err(js_error)?;
        self.inner.apply_adjustments(adjustments);
        Ok(())
    }

    // ===== Crop =====

    pub fn begin_crop(&mut self) -> bool {
        self.inner.begin_crop()
    }

    pub fn cancel_crop(&mut self) -> bool {
        self.inner.cancel_crop()
    }

    #[wasm_bindgen(getter)]
    pub fn is_cropping(&self) -> bool {
        self.inner.is_cropping()
    }

    /// Crop to a rectangle drawn on the display. Returns `false` when no image
    /// is loaded.
    pub fn commit_crop(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        scale: f64,
    ) -> Result<bool, JsValue> {
        let rect = DisplayRect::new(x, y, width, height);
        self.inner.commit_crop(&rect, scale).map_err(js_error)
    }

    // ===== Output =====

    pub fn render_preview(&self) -> Result<JsDecodedImage, JsValue> {
        self.inner
            .render_preview()
            .map(JsDecodedImage::from_decoded)
            .map_err(js_error)
    }

    /// JPEG bytes at the configured quality.
    pub fn export(&self) -> Result<Vec<u8>, JsValue> {
        self.inner.export().map_err(js_error)
    }

    pub fn export_with_quality(&self, quality: u8) -> Result<Vec<u8>, JsValue> {
        self.inner.export_with_quality(quality).map_err(js_error)
    }
}

impl JsEditor {
    pub(crate) fn with_config(config: EditorConfig) -> Self {
        Self {
            inner: Editor::new(config),
        }
    }
}
