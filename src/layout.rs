//! Layout engine: places three scaled copies of one photo on a 3:2 canvas.
//!
//! Pure geometry, no pixel access. Identical inputs give bit-identical output.

use crate::crop::compute_crop_rect;
use crate::params::{Alignment, Direction, Params};
use serde::Serialize;

/// Canvas height in logical units; width follows from the 3:2 ratio.
pub const CANVAS_HEIGHT: f64 = 400.0;

/// Width/height multipliers of the three tiers, dominant first.
pub const SCALES: [f64; 3] = [1.0, 0.7, 0.4];

/// Axis-aligned rectangle. Canvas units for destinations, image pixels for crops.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Intrinsic size of the decoded source photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<&image::RgbaImage> for ImageInfo {
    fn from(image: &image::RgbaImage) -> Self {
        Self::new(image.width(), image.height())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// The one canvas every layout uses.
    pub fn fixed() -> Self {
        Self { width: CANVAS_HEIGHT * 3.0 / 2.0, height: CANVAS_HEIGHT }
    }

    /// Surface size in whole pixels, one pixel per logical unit.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }
}

/// One photo instance: where it goes on the canvas and which part of the image it shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileDescriptor {
    pub scale: f64,
    pub dest: Rect,
    pub source: Rect,
}

impl TileDescriptor {
    /// The full-height tile.
    pub fn is_dominant(&self) -> bool {
        self.scale == SCALES[0]
    }
}

/// Result of one layout pass. Tiles are in left-to-right drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub canvas: CanvasSize,
    pub tiles: [TileDescriptor; 3],
}

impl Layout {
    pub fn dominant(&self) -> &TileDescriptor {
        // SCALES always contains the dominant tier, so one tile matches
        self.tiles.iter().find(|t| t.is_dominant()).unwrap_or(&self.tiles[0])
    }

    /// Left edge of the tile group; negative when the group overflows the canvas.
    pub fn start_x(&self) -> f64 {
        self.tiles[0].dest.x
    }

    pub fn total_width(&self) -> f64 {
        self.tiles.iter().map(|t| t.dest.width).sum()
    }
}

/// Compute canvas size and the three tile descriptors for `image` under `params`.
///
/// The crop anchor is read once from `params` and shared by all tiles.
/// Nothing is clamped: a large `photo_size` lets the group overflow the
/// canvas edges, and a zero `photo_size` yields zero-width tiles.
pub fn compute_layout(image: ImageInfo, params: &Params) -> Layout {
    let canvas = CanvasSize::fixed();
    let (crop_x, crop_y) = (params.crop_x, params.crop_y);

    let dominant_height = canvas.height;
    let dominant_width = (dominant_height * params.photo_size as f64) / 100.0;

    let mut scales = SCALES;
    if params.direction == Direction::Shrinking {
        scales.reverse();
    }

    let sizes = scales.map(|scale| (scale, dominant_width * scale, dominant_height * scale));
    let total_width: f64 = sizes.iter().map(|&(_, width, _)| width).sum();
    let start_x = (canvas.width - total_width) / 2.0;

    let mut x = start_x;
    let tiles = sizes.map(|(scale, width, height)| {
        let y = if scale == SCALES[0] {
            0.0
        } else {
            match params.alignment {
                Alignment::Top => 0.0,
                Alignment::Bottom => canvas.height - height,
                Alignment::Center => (canvas.height - height) / 2.0,
            }
        };
        let dest = Rect::new(x, y, width, height);
        x += width;

        TileDescriptor { scale, dest, source: compute_crop_rect(dest, image, crop_x, crop_y) }
    });

    log::debug!(
        "layout {}x{} photo_size={} {}/{} start_x={start_x}",
        image.width,
        image.height,
        params.photo_size,
        params.direction,
        params.alignment,
    );

    Layout { canvas, tiles }
}
