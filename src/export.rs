//! PNG export of a rendered surface.

use crate::params::{Alignment, Direction};
use crate::Result;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// An encoded graphic ready to be written to disk or offered as a download.
#[derive(Debug, Clone)]
pub struct Export {
    pub file_name: String,
    pub png: Vec<u8>,
}

/// Download name for a graphic, e.g. `compounding-graphic-growing-top.png`.
pub fn export_file_name(direction: Direction, alignment: Alignment) -> String {
    format!("compounding-graphic-{direction}-{alignment}.png")
}

pub fn encode_png(surface: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    surface.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_follows_direction_and_alignment() {
        assert_eq!(
            export_file_name(Direction::Growing, Alignment::Top),
            "compounding-graphic-growing-top.png"
        );
        assert_eq!(
            export_file_name(Direction::Shrinking, Alignment::Center),
            "compounding-graphic-shrinking-center.png"
        );
    }

    #[test]
    fn encoded_png_decodes_to_same_pixels() {
        let surface = RgbaImage::from_fn(6, 4, |x, y| image::Rgba([x as u8 * 40, y as u8 * 60, 7, 255]));
        let png = encode_png(&surface).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap().to_rgba8();
        assert_eq!(decoded, surface);
    }
}
