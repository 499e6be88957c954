//! PNG image format support
//!
//! Adapts the `png` crate to the core pixel traits: decoding produces a
//! [`Raster`] (alpha is dropped, grayscale is expanded to RGB), encoding
//! writes any [`PixelSource`] as an 8-bit RGB PNG.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, BufWriter, Seek, Write};
use std::path::Path;
use vectra_core::{Pixel, PixelSink, PixelSource, Raster};

/// Read a PNG image into a raster.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width as usize;
    let height = info.height as usize;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG bit depth: {:?}",
            output_info.bit_depth
        )));
    }

    let samples = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG color type: {:?}",
                other
            )));
        }
    };

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut raster = Raster::new(width, height);
    for y in 0..height {
        let row_start = y * bytes_per_row;
        for x in 0..width {
            let idx = row_start + x * samples;
            let pixel = match output_info.color_type {
                ColorType::Grayscale | ColorType::GrayscaleAlpha => {
                    Pixel::new(data[idx], data[idx], data[idx])
                }
                _ => Pixel::new(data[idx], data[idx + 1], data[idx + 2]),
            };
            raster.set(x, y, pixel);
        }
    }

    Ok(raster)
}

/// Read a PNG file into a raster.
pub fn read_png_file(path: impl AsRef<Path>) -> IoResult<Raster> {
    let file = std::fs::File::open(path.as_ref())?;
    read_png(std::io::BufReader::new(file))
}

/// Write a pixel source as an 8-bit RGB PNG.
pub fn write_png<W: Write>(writer: W, pixels: &impl PixelSource) -> IoResult<()> {
    let (width, height) = (pixels.width(), pixels.height());
    if width == 0 || height == 0 {
        return Err(IoError::EncodeError(format!(
            "cannot encode an empty {width}x{height} image"
        )));
    }

    let mut encoder = Encoder::new(writer, width as u32, height as u32);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = vec![0u8; width * height * 3];
    for y in 0..height {
        let row_start = y * width * 3;
        for x in 0..width {
            let pixel = pixels.get(x, y);
            let idx = row_start + x * 3;
            data[idx] = pixel.r;
            data[idx + 1] = pixel.g;
            data[idx + 2] = pixel.b;
        }
    }

    png_writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG data error: {}", e)))?;

    Ok(())
}

/// Write a pixel source to a PNG file.
pub fn write_png_file(path: impl AsRef<Path>, pixels: &impl PixelSource) -> IoResult<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_png(BufWriter::new(file), pixels)
}
