use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| image::Rgb([x as u8, y as u8, 9]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decodes_png_from_memory() {
    let photo = decode_photo_bytes(&png_bytes(5, 3)).unwrap();
    assert_eq!((photo.frame.width, photo.frame.height), (5, 3));
    assert_eq!(photo.stored.width, 5);
    assert_eq!(photo.orientation, Orientation::NoTransforms);
    assert_eq!(photo.frame.pixel(4, 2), [4, 2, 9]);
}

#[test]
fn garbage_bytes_fail() {
    assert!(decode_photo_bytes(b"definitely not an image").is_err());
}

#[test]
fn save_then_load_from_disk() {
    let dir = std::env::temp_dir().join(format!("reelcraft_decode_{}", std::process::id()));
    let path = dir.join("nested").join("frame.png");
    let frame = FrameRgb::solid(4, 6, [10, 20, 30]);
    save_frame(&frame, &path).unwrap();
    let back = load_photo(&path).unwrap();
    assert_eq!(back.frame, frame);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_fails() {
    assert!(load_photo(Path::new("/definitely/not/here.png")).is_err());
}
