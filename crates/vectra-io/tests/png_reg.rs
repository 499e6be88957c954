//! PNG I/O regression tests
//!
//! Lossless write/read round-trips through memory and files, encoding from
//! arbitrary `PixelSource` implementations, and malformed-input rejection.

use std::io::Cursor;
use vectra_core::{Pixel, PixelSink, PixelSource, Raster};
use vectra_io::{read_png, read_png_file, write_png, write_png_file};

fn gradient_raster(width: usize, height: usize) -> Raster {
    let mut raster = Raster::new(width, height);
    for y in 0..height {
        for x in 0..width {
            raster.set(
                x,
                y,
                Pixel::new((x * 7 % 256) as u8, (y * 11 % 256) as u8, ((x + y) % 256) as u8),
            );
        }
    }
    raster
}

#[test]
fn memory_roundtrip_is_lossless() {
    for (width, height) in [(1, 1), (7, 3), (3, 7), (16, 16)] {
        let raster = gradient_raster(width, height);

        let mut buf = Vec::new();
        write_png(&mut buf, &raster).unwrap();
        let restored = read_png(Cursor::new(&buf)).unwrap();

        assert_eq!(restored.width(), width, "{width}x{height}");
        assert_eq!(restored.height(), height, "{width}x{height}");
        assert_eq!(restored.pixels(), raster.pixels(), "{width}x{height}");
    }
}

#[test]
fn file_roundtrip_is_lossless() {
    let raster = gradient_raster(9, 5);

    let dir = std::env::temp_dir().join("vectra_reg_png");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("roundtrip.png");

    write_png_file(&path, &raster).unwrap();
    let restored = read_png_file(&path).unwrap();
    assert_eq!(restored.pixels(), raster.pixels());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn encodes_any_pixel_source() {
    // The encoder is generic over the source trait, not tied to Raster.
    struct Checkerboard;

    impl PixelSource for Checkerboard {
        fn width(&self) -> usize {
            4
        }

        fn height(&self) -> usize {
            4
        }

        fn get(&self, x: usize, y: usize) -> Pixel {
            if (x + y) % 2 == 0 {
                Pixel::new(255, 255, 255)
            } else {
                Pixel::new(0, 0, 0)
            }
        }
    }

    let mut buf = Vec::new();
    write_png(&mut buf, &Checkerboard).unwrap();
    let restored = read_png(Cursor::new(&buf)).unwrap();

    assert_eq!(restored.get(0, 0), Pixel::new(255, 255, 255));
    assert_eq!(restored.get(1, 0), Pixel::new(0, 0, 0));
    assert_eq!(restored.get(3, 3), Pixel::new(255, 255, 255));
}

#[test]
fn rejects_garbage_and_truncated_input() {
    assert!(read_png(Cursor::new(&b"definitely not a png"[..])).is_err());

    let mut buf = Vec::new();
    write_png(&mut buf, &gradient_raster(8, 8)).unwrap();
    buf.truncate(buf.len() / 3);
    assert!(read_png(Cursor::new(&buf)).is_err());
}

#[test]
fn rejects_empty_source() {
    let mut buf = Vec::new();
    assert!(write_png(&mut buf, &Raster::new(0, 0)).is_err());
    assert!(write_png(&mut buf, &Raster::new(5, 0)).is_err());
}

#[test]
fn missing_file_is_an_error() {
    assert!(read_png_file("/nonexistent/vectra/input.png").is_err());
}
