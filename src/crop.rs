//! Aspect-preserving crop window selection.

use crate::layout::{ImageInfo, Rect};

/// Pick the region of `image` that fills `dest` without distortion or letterboxing.
///
/// Exactly one axis is cropped. When the image is wider than the destination,
/// the full height is used and `crop_x` (percent) slides the window
/// horizontally; otherwise the full width is used and `crop_y` slides it
/// vertically. The origin is clamped into the image.
pub fn compute_crop_rect(dest: Rect, image: ImageInfo, crop_x: f64, crop_y: f64) -> Rect {
    let (image_w, image_h) = (image.width as f64, image.height as f64);
    let display_aspect = dest.width / dest.height;
    let image_aspect = image_w / image_h;

    let mut source = if image_aspect > display_aspect {
        let width = image_h * display_aspect;
        Rect::new((image_w - width) * (crop_x / 100.0), 0.0, width, image_h)
    } else {
        let height = image_w / display_aspect;
        Rect::new(0.0, (image_h - height) * (crop_y / 100.0), image_w, height)
    };

    // min before max: a rounding-negative bound collapses to 0 instead of panicking like clamp()
    source.x = source.x.min(image_w - source.width).max(0.0);
    source.y = source.y.min(image_h - source.height).max(0.0);
    source
}
