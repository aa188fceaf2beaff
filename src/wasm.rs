//! WebAssembly bindings for compounding

use crate::{Alignment, Color, Direction, Generator};
use image::RgbaImage;
use wasm_bindgen::prelude::*;

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WasmGenerator {
    inner: Generator,
    surface: RgbaImage,
}

#[wasm_bindgen]
impl WasmGenerator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGenerator {
        WasmGenerator { inner: Generator::new(), surface: RgbaImage::new(0, 0) }
    }

    /// Decode an uploaded file. The previous photo is kept if decoding fails.
    #[wasm_bindgen]
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<js_sys::Object, JsValue> {
        let info = self.inner.load_image(bytes).map_err(|e| {
            web_sys::console::error_1(&format!("Error loading image: {e}").into());
            js_err(e)
        })?;

        let result = js_sys::Object::new();
        js_sys::Reflect::set(&result, &"width".into(), &info.width.into())?;
        js_sys::Reflect::set(&result, &"height".into(), &info.height.into())?;
        Ok(result)
    }

    #[wasm_bindgen]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    #[wasm_bindgen]
    pub fn set_direction(&mut self, direction: &str) -> Result<(), JsValue> {
        self.inner.set_direction(direction.parse::<Direction>().map_err(js_err)?);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_alignment(&mut self, alignment: &str) -> Result<(), JsValue> {
        self.inner.set_alignment(alignment.parse::<Alignment>().map_err(js_err)?);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_background(&mut self, color: &str) -> Result<(), JsValue> {
        self.inner.set_background(color.parse::<Color>().map_err(js_err)?);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_photo_size(&mut self, photo_size: u32) {
        self.inner.set_photo_size(photo_size);
    }

    #[wasm_bindgen]
    pub fn set_crop(&mut self, crop_x: f64, crop_y: f64) {
        self.inner.set_crop(crop_x, crop_y);
    }

    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.pointer_down(x, y);
    }

    /// Returns true when the preview should be redrawn.
    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_move(x, y)
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    /// Render the preview and return `{ width, height, pixels }`, or null without a photo.
    /// `pixels` is RGBA, ready for `new ImageData(pixels, width, height)`.
    #[wasm_bindgen]
    pub fn render(&mut self) -> Result<JsValue, JsValue> {
        if !self.inner.preview(&mut self.surface).map_err(js_err)? {
            return Ok(JsValue::NULL);
        }

        let result = js_sys::Object::new();
        let pixels = js_sys::Uint8ClampedArray::from(self.surface.as_raw().as_slice());
        js_sys::Reflect::set(&result, &"width".into(), &self.surface.width().into())?;
        js_sys::Reflect::set(&result, &"height".into(), &self.surface.height().into())?;
        js_sys::Reflect::set(&result, &"pixels".into(), &pixels)?;
        Ok(result.into())
    }

    /// PNG bytes of the current graphic.
    #[wasm_bindgen]
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        Ok(self.inner.export().map_err(js_err)?.png)
    }

    #[wasm_bindgen]
    pub fn export_file_name(&self) -> String {
        let params = self.inner.params();
        crate::export_file_name(params.direction, params.alignment)
    }

    /// Current geometry as JSON, or null without a photo.
    #[wasm_bindgen]
    pub fn layout_json(&self) -> Result<Option<String>, JsValue> {
        self.inner
            .layout()
            .map(|layout| serde_json::to_string(&layout).map_err(js_err))
            .transpose()
    }
}

impl Default for WasmGenerator {
    fn default() -> Self {
        Self::new()
    }
}
