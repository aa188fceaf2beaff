//! Compounding graphics: three scaled, cropped copies of one photo side by side on a 3:2 canvas.

pub mod crop;
pub mod export;
pub mod interaction;
pub mod layout;
pub mod params;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crop::compute_crop_rect;
pub use export::{export_file_name, Export};
pub use interaction::DragState;
pub use layout::{compute_layout, CanvasSize, ImageInfo, Layout, Rect, TileDescriptor};
pub use params::{Alignment, Color, Direction, Params};

use image::{DynamicImage, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompoundingError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No image loaded")]
    NoImage,
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, CompoundingError>;

/// Owns the current photo, parameters and drag state, and turns them into graphics.
///
/// Every change replaces the parameter record; each preview or export
/// recomputes the layout from scratch.
#[derive(Debug, Default)]
pub struct Generator {
    params: Params,
    image: Option<RgbaImage>,
    drag: DragState,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.set_params(params);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.set_direction(direction);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.set_alignment(alignment);
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.set_background(background);
        self
    }

    pub fn with_photo_size(mut self, photo_size: u32) -> Self {
        self.set_photo_size(photo_size);
        self
    }

    pub fn with_crop(mut self, crop_x: f64, crop_y: f64) -> Self {
        self.set_crop(crop_x, crop_y);
        self
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Replace all parameters, clamping percentages into range.
    pub fn set_params(&mut self, params: Params) {
        self.params = Params {
            photo_size: params.photo_size.min(100),
            crop_x: clamp_percent(params.crop_x),
            crop_y: clamp_percent(params.crop_y),
            ..params
        };
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.set_params(Params { direction, ..self.params });
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.set_params(Params { alignment, ..self.params });
    }

    pub fn set_background(&mut self, background: Color) {
        self.set_params(Params { background, ..self.params });
    }

    pub fn set_photo_size(&mut self, photo_size: u32) {
        self.set_params(Params { photo_size, ..self.params });
    }

    pub fn set_crop(&mut self, crop_x: f64, crop_y: f64) {
        self.set_params(Params { crop_x, crop_y, ..self.params });
    }

    /// Decode and adopt a new photo. On failure the previous photo stays active.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<ImageInfo> {
        match image::load_from_memory(bytes) {
            Ok(decoded) => Ok(self.set_image(decoded)),
            Err(err) => {
                log::warn!("Failed to decode image ({} bytes): {err}", bytes.len());
                Err(err.into())
            }
        }
    }

    pub fn set_image(&mut self, image: DynamicImage) -> ImageInfo {
        let rgba = image.into_rgba8();
        let info = ImageInfo::from(&rgba);
        log::info!("Image loaded: {}x{}", info.width, info.height);
        self.image = Some(rgba);
        info
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn image_info(&self) -> Option<ImageInfo> {
        self.image.as_ref().map(ImageInfo::from)
    }

    /// Geometry for the current photo and parameters, `None` before a photo is loaded.
    pub fn layout(&self) -> Option<Layout> {
        self.image_info().map(|info| compute_layout(info, &self.params))
    }

    /// Draw the preview onto `surface`. Returns `false` (surface untouched) without a photo.
    pub fn preview(&self, surface: &mut RgbaImage) -> Result<bool> {
        let Some(image) = &self.image else {
            return Ok(false);
        };
        self.draw(surface, image)?;
        if self.drag.is_dragging() {
            render::draw_drag_outline(surface);
        }
        Ok(true)
    }

    /// Render a fresh surface and encode it as PNG.
    pub fn export(&self) -> Result<Export> {
        let image = self.image.as_ref().ok_or(CompoundingError::NoImage)?;
        let mut surface = RgbaImage::new(0, 0);
        self.draw(&mut surface, image)?;

        let png = export::encode_png(&surface)?;
        let file_name = export_file_name(self.params.direction, self.params.alignment);
        log::info!("Exported {file_name} ({} bytes)", png.len());
        Ok(Export { file_name, png })
    }

    fn draw(&self, surface: &mut RgbaImage, image: &RgbaImage) -> Result<()> {
        let layout = compute_layout(ImageInfo::from(image), &self.params);
        render::render(surface, layout.canvas, self.params.background, &layout.tiles, image)
    }

    /// Start a crop drag. Ignored without a photo.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if self.has_image() {
            self.drag.begin(x, y);
        }
    }

    /// Pan the crop anchor. Returns `true` when the preview needs redrawing.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.has_image() {
            return false;
        }
        match self.drag.update(x, y, (self.params.crop_x, self.params.crop_y)) {
            Some((crop_x, crop_y)) => {
                self.set_crop(crop_x, crop_y);
                true
            }
            None => false,
        }
    }

    /// End the drag (pointer up or pointer leaving the preview).
    pub fn pointer_up(&mut self) {
        self.drag.end();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 50.0;
    }
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_reference_defaults() {
        let generator = Generator::new();
        assert_eq!(*generator.params(), Params::default());
        assert_eq!(generator.params().background.to_string(), "#33ff00");
        assert!(!generator.has_image());
        assert!(generator.layout().is_none());
    }

    #[test]
    fn setters_clamp_percentages() {
        let generator = Generator::new().with_photo_size(250).with_crop(-3.0, 140.0);
        assert_eq!(generator.params().photo_size, 100);
        assert_eq!(generator.params().crop_x, 0.0);
        assert_eq!(generator.params().crop_y, 100.0);
    }

    #[test]
    fn without_image_nothing_is_drawn() {
        let mut generator = Generator::new();
        let mut surface = RgbaImage::new(3, 3);
        assert!(!generator.preview(&mut surface).unwrap());
        assert_eq!(surface.dimensions(), (3, 3));
        assert!(matches!(generator.export(), Err(CompoundingError::NoImage)));

        generator.pointer_down(0.0, 0.0);
        assert!(!generator.is_dragging());
        assert!(!generator.pointer_move(10.0, 0.0));
    }

    #[test]
    fn pointer_drag_pans_crop() {
        let mut generator = Generator::new();
        generator.set_image(DynamicImage::new_rgba8(8, 8));
        generator.pointer_down(10.0, 10.0);
        assert!(generator.pointer_move(50.0, 10.0));
        assert_eq!(generator.params().crop_x, 48.0);
        generator.pointer_up();
        assert!(!generator.pointer_move(90.0, 10.0));
        assert_eq!(generator.params().crop_x, 48.0);
    }
}
