use compounding::{Alignment, Color, CompoundingError, Direction, Generator};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

fn split_photo() -> Vec<u8> {
    png_bytes(&RgbaImage::from_fn(1200, 800, |x, _| if x < 600 { RED } else { BLUE }))
}

#[test]
fn export_matches_preview() {
    let mut generator = Generator::new();
    let info = generator.load_image(&split_photo()).unwrap();
    assert_eq!((info.width, info.height), (1200, 800));

    let export = generator.export().unwrap();
    assert_eq!(export.file_name, "compounding-graphic-growing-top.png");

    let exported = image::load_from_memory(&export.png).unwrap().to_rgba8();
    let mut preview = RgbaImage::new(1, 1);
    assert!(generator.preview(&mut preview).unwrap());
    assert_eq!(exported.dimensions(), (600, 400));
    assert_eq!(exported, preview);

    assert_eq!(*exported.get_pixel(0, 200), RED);
    assert_eq!(*exported.get_pixel(200, 200), BLUE);
    // under the 0.7 tile, top aligned
    assert_eq!(*exported.get_pixel(400, 350), Color::default().to_rgba());
}

#[test]
fn shrinking_bottom_layout() {
    let mut generator = Generator::new()
        .with_direction(Direction::Shrinking)
        .with_alignment(Alignment::Bottom)
        .with_background("#000".parse().unwrap());
    generator.load_image(&png_bytes(&RgbaImage::from_pixel(50, 50, BLUE))).unwrap();

    let layout = generator.layout().unwrap();
    let scales: Vec<f64> = layout.tiles.iter().map(|t| t.scale).collect();
    assert_eq!(scales, vec![0.4, 0.7, 1.0]);
    assert_eq!(layout.tiles[0].dest.y, 240.0);
    assert_eq!(layout.tiles[2].dest.y, 0.0);
    assert_eq!(layout.tiles[2].dest.height, 400.0);

    let export = generator.export().unwrap();
    assert_eq!(export.file_name, "compounding-graphic-shrinking-bottom.png");
    let graphic = image::load_from_memory(&export.png).unwrap().to_rgba8();
    // 0.4 tile occupies x -120..40, y 240..400
    assert_eq!(*graphic.get_pixel(20, 100), Rgba([0, 0, 0, 255]));
    assert_eq!(*graphic.get_pixel(20, 300), BLUE);
}

#[test]
fn failed_decode_keeps_previous_photo() {
    let mut generator = Generator::new();
    generator.load_image(&split_photo()).unwrap();

    let err = generator.load_image(b"definitely not an image");
    assert!(matches!(err, Err(CompoundingError::Image(_))));
    assert_eq!(generator.image_info().map(|i| (i.width, i.height)), Some((1200, 800)));
}

#[test]
fn drag_outline_only_on_preview() {
    let mut generator = Generator::new();
    generator.load_image(&split_photo()).unwrap();
    generator.pointer_down(300.0, 200.0);

    let mut preview = RgbaImage::new(1, 1);
    generator.preview(&mut preview).unwrap();
    assert_eq!(*preview.get_pixel(2, 24), Rgba([0x66, 0x7e, 0xea, 255]));

    let exported = image::load_from_memory(&generator.export().unwrap().png).unwrap().to_rgba8();
    assert_eq!(*exported.get_pixel(2, 24), RED);

    generator.pointer_up();
    generator.preview(&mut preview).unwrap();
    assert_eq!(*preview.get_pixel(2, 24), RED);
}

#[test]
fn dragging_pans_the_visible_window() {
    let mut generator = Generator::new();
    generator.load_image(&split_photo()).unwrap();

    // drag left by 1000 px: crop_x 50 -> 100, window moves to the right edge
    generator.pointer_down(1000.0, 0.0);
    assert!(generator.pointer_move(0.0, 0.0));
    generator.pointer_up();
    assert_eq!(generator.params().crop_x, 100.0);

    let mut preview = RgbaImage::new(1, 1);
    generator.preview(&mut preview).unwrap();
    assert_eq!(*preview.get_pixel(0, 200), BLUE);
}
