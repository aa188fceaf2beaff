//! Renderer - paints background and tiles onto an RGBA surface.
//!
//! The same routine backs the live preview and the export, so both are
//! pixel-identical apart from the preview-only drag outline.

use crate::layout::{CanvasSize, Rect, TileDescriptor};
use crate::params::Color;
use crate::{CompoundingError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, Rgba32FImage, RgbaImage};
use std::ops::Range;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

const OUTLINE: Rgba<u8> = Rgba([0x66, 0x7e, 0xea, 255]);
const OUTLINE_WIDTH: u32 = 3;
const OUTLINE_INSET: u32 = 2;
const OUTLINE_DASH: u32 = 5;

/// Size `surface` to `canvas`, fill it with `background`, then draw each tile in order.
pub fn render(
    surface: &mut RgbaImage,
    canvas: CanvasSize,
    background: Color,
    tiles: &[TileDescriptor],
    image: &RgbaImage,
) -> Result<()> {
    let (width, height) = surface_size(canvas)?;
    if surface.dimensions() != (width, height) {
        *surface = RgbaImage::new(width, height);
    }

    // a zero-sized source has nothing to sample
    let prepared: Vec<PreparedTile> = if image.width() == 0 || image.height() == 0 {
        Vec::new()
    } else {
        tiles.iter().filter_map(|tile| PreparedTile::new(tile, image)).collect()
    };

    let fill = background.to_rgba();
    let stride = width as usize * 4;
    let paint_row = |(row, line): (usize, &mut [u8])| {
        for px in line.chunks_exact_mut(4) {
            px.copy_from_slice(&fill.0);
        }
        for tile in &prepared {
            tile.paint_row(line, row as u32);
        }
    };

    let pixels: &mut [u8] = surface;
    #[cfg(not(target_arch = "wasm32"))]
    pixels.par_chunks_mut(stride).enumerate().for_each(paint_row);
    #[cfg(target_arch = "wasm32")]
    pixels.chunks_mut(stride).enumerate().for_each(paint_row);

    Ok(())
}

fn surface_size(canvas: CanvasSize) -> Result<(u32, u32)> {
    let representable = |v: f64| v.is_finite() && v >= 1.0 && v <= u32::MAX as f64;
    if !representable(canvas.width) || !representable(canvas.height) {
        return Err(CompoundingError::Surface(format!(
            "cannot allocate {}x{} surface",
            canvas.width, canvas.height
        )));
    }
    Ok(canvas.pixel_size())
}

/// Pixels in `0..limit` that overlap `[start, start + len)`.
fn span(start: f64, len: f64, limit: u32) -> Range<u32> {
    let first = start.floor().max(0.0);
    let end = (start + len).ceil().min(limit as f64);
    if !(len > 0.0) || end <= first {
        return 0..0;
    }
    first as u32..end as u32
}

/// Covered fraction of pixel `index` within `[start, end)`, and the midpoint of the covered part.
fn overlap(index: u32, start: f64, end: f64) -> (f64, f64) {
    let lo = (index as f64).max(start);
    let hi = (index as f64 + 1.0).min(end);
    ((hi - lo).clamp(0.0, 1.0), (lo + hi) / 2.0)
}

/// A tile's source window, pre-scaled to about destination resolution.
/// The patch holds premultiplied RGBA in 0..1.
struct PreparedTile {
    dest: Rect,
    patch: Rgba32FImage,
    /// Canvas position of the patch's top-left corner.
    origin: (f64, f64),
    /// Patch pixels per canvas unit.
    step: (f64, f64),
}

impl PreparedTile {
    fn new(tile: &TileDescriptor, image: &RgbaImage) -> Option<Self> {
        let (dest, source) = (tile.dest, tile.source);
        let positive = |v: f64| v > 0.0 && v.is_finite();
        if !(positive(dest.width) && positive(dest.height) && positive(source.width) && positive(source.height)) {
            return None;
        }

        // whole source pixels touched by the crop rect
        let (iw, ih) = image.dimensions();
        let x0 = (source.x.floor().max(0.0) as u32).min(iw - 1);
        let y0 = (source.y.floor().max(0.0) as u32).min(ih - 1);
        let x1 = (source.right().ceil() as u32).clamp(x0 + 1, iw);
        let y1 = (source.bottom().ceil() as u32).clamp(y0 + 1, ih);

        let kx = dest.width / source.width;
        let ky = dest.height / source.height;
        let span_w = (x1 - x0) as f64 * kx;
        let span_h = (y1 - y0) as f64 * ky;
        let tw = span_w.round().max(1.0) as u32;
        let th = span_h.round().max(1.0) as u32;

        let window = imageops::crop_imm(image, x0, y0, x1 - x0, y1 - y0).to_image();
        let patch = if window.pixels().all(|p| p[3] == 255) {
            DynamicImage::ImageRgba8(imageops::resize(&window, tw, th, FilterType::Triangle)).to_rgba32f()
        } else {
            // interpolate premultiplied so transparent neighbours don't darken edges
            let mut straight = DynamicImage::ImageRgba8(window).to_rgba32f();
            premultiply(&mut straight);
            imageops::resize(&straight, tw, th, FilterType::Triangle)
        };

        Some(Self {
            dest,
            patch,
            origin: (dest.x + (x0 as f64 - source.x) * kx, dest.y + (y0 as f64 - source.y) * ky),
            step: (tw as f64 / span_w, th as f64 / span_h),
        })
    }

    fn paint_row(&self, line: &mut [u8], row: u32) {
        let Rect { x, y, width, height } = self.dest;
        if !span(y, height, u32::MAX).contains(&row) {
            return;
        }
        let (cover_y, cy) = overlap(row, y, y + height);
        let py = (cy - self.origin.1) * self.step.1 - 0.5;

        let canvas_width = (line.len() / 4) as u32;
        for col in span(x, width, canvas_width) {
            let (cover_x, cx) = overlap(col, x, x + width);
            let px = (cx - self.origin.0) * self.step.0 - 0.5;
            let fg = sample_bilinear(&self.patch, px, py);

            let i = col as usize * 4;
            let bg = [line[i], line[i + 1], line[i + 2], line[i + 3]];
            line[i..i + 4].copy_from_slice(&blend(bg, fg, (cover_x * cover_y) as f32));
        }
    }
}

fn premultiply(image: &mut Rgba32FImage) {
    for p in image.pixels_mut() {
        let a = p[3];
        p[0] *= a;
        p[1] *= a;
        p[2] *= a;
    }
}

/// Bilinear sample at pixel-centre coordinates, clamping at the patch edges.
fn sample_bilinear(patch: &Rgba32FImage, sx: f64, sy: f64) -> [f32; 4] {
    let (w, h) = patch.dimensions();
    let sx = sx.min((w - 1) as f64).max(0.0);
    let sy = sy.min((h - 1) as f64).max(0.0);

    let (x0, y0) = (sx.floor() as u32, sy.floor() as u32);
    let (x1, y1) = ((x0 + 1).min(w - 1), (y0 + 1).min(h - 1));
    let (fx, fy) = ((sx - x0 as f64) as f32, (sy - y0 as f64) as f32);

    let p00 = patch.get_pixel(x0, y0).0;
    let p10 = patch.get_pixel(x1, y0).0;
    let p01 = patch.get_pixel(x0, y1).0;
    let p11 = patch.get_pixel(x1, y1).0;

    let mut out = [0.0; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        out[c] = top * (1.0 - fy) + bottom * fy;
    }
    out
}

/// Source-over composite of premultiplied `fg` (0..1), scaled by pixel `coverage`, onto `bg`.
fn blend(bg: [u8; 4], fg: [f32; 4], coverage: f32) -> [u8; 4] {
    let inv = 1.0 - fg[3] * coverage;
    let channel = |c: usize| (fg[c] * coverage * 255.0 + bg[c] as f32 * inv).round().clamp(0.0, 255.0) as u8;
    [channel(0), channel(1), channel(2), channel(3)]
}

/// Dashed inset outline shown on the preview while a crop drag is in progress.
///
/// One dash pattern runs clockwise around the rectangle from its top-left corner.
pub fn draw_drag_outline(surface: &mut RgbaImage) {
    let (w, h) = surface.dimensions();
    if w <= 2 * OUTLINE_INSET || h <= 2 * OUTLINE_INSET {
        return;
    }
    let (left, top) = (OUTLINE_INSET, OUTLINE_INSET);
    let (right, bottom) = (w - OUTLINE_INSET, h - OUTLINE_INSET);
    let half = OUTLINE_WIDTH / 2;

    let mut stroke = |cx: u32, cy: u32| {
        for dy in 0..OUTLINE_WIDTH {
            for dx in 0..OUTLINE_WIDTH {
                let (px, py) = ((cx + dx).saturating_sub(half), (cy + dy).saturating_sub(half));
                if px < w && py < h {
                    surface.put_pixel(px, py, OUTLINE);
                }
            }
        }
    };

    let corners = [(left, top), (right, top), (right, bottom), (left, bottom), (left, top)];
    let mut offset = 0;
    for edge in corners.windows(2) {
        let ((ax, ay), (bx, by)) = (edge[0], edge[1]);
        let length = ax.abs_diff(bx) + ay.abs_diff(by);
        for t in 0..length {
            let toward = |a: u32, b: u32| if b > a { a + t } else if b < a { a - t } else { a };
            if (offset / OUTLINE_DASH) % 2 == 0 {
                stroke(toward(ax, bx), toward(ay, by));
            }
            offset += 1;
        }
    }
}
