//! Scan serialization
//!
//! Text-based, whitespace-separated on-disk format for a whole scan.
//!
//! # Scan format (`v1`)
//!
//! ```text
//! v1
//! <has_borders: 0|1>
//! <image_w> <image_h>
//! <shape_count>
//! <shapes...>
//! <image_count>
//! <R G B> x image_count
//! <shape_index> x image_count
//! ```
//!
//! # Shape format (`v1.1`)
//!
//! ```text
//! v1.1
//! <R> <G> <B>
//! <bounds.min.x> <bounds.min.y> <bounds.max.x> <bounds.max.y>
//! <chunks_size.x> <chunks_size.y>
//! <chunks_offset.x> <chunks_offset.y>
//! <chunk_count>
//! <chunks.len>
//! <bit> x chunks.len
//! <outer_edge.len>
//! <x y> x outer_edge.len
//! <outer_edge_points.len>
//! <x y> x outer_edge_points.len
//! ```
//!
//! Colors are floats in [0, 1], written with Rust's shortest round-trip
//! `Display`, so serialize → deserialize → serialize is byte-identical.
//! Unknown version tags are refused.

use crate::error::{ScanError, ScanResult};
use crate::scan::PixelScan;
use crate::shape::Shape;
use log::info;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::SplitAsciiWhitespace;
use vectra_core::{Bounds2I, PixelF, Vector2, Vector2I};

/// Version tag for the scan layout.
const SCAN_VERSION: &str = "v1";
/// Version tag for the embedded shape layout.
const SHAPE_VERSION: &str = "v1.1";

/// Maximum input size in bytes to prevent unbounded memory growth.
const MAX_INPUT_SIZE: usize = 100_000_000;

impl PixelScan {
    /// Read a scan from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> ScanResult<Self> {
        let mut buf = String::new();
        reader
            .take(MAX_INPUT_SIZE as u64)
            .read_to_string(&mut buf)?;
        Self::read_from_bytes(buf.as_bytes())
    }

    /// Read a scan from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> ScanResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        Self::read_from_reader(&mut reader)
    }

    /// Read a scan from bytes.
    pub fn read_from_bytes(data: &[u8]) -> ScanResult<Self> {
        info!("deserializing scan data");
        let text = std::str::from_utf8(data)
            .map_err(|e| ScanError::InvalidFormat(format!("invalid UTF-8: {e}")))?;
        let mut tokens = Tokens::new(text);
        parse_scan(&mut tokens)
    }

    /// Write the scan to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> ScanResult<()> {
        info!("serializing scan data");
        writeln!(writer, "{SCAN_VERSION}")?;
        writeln!(writer, "{}", self.has_borders as u8)?;
        writeln!(writer, "{} {}", self.image_size.x, self.image_size.y)?;
        writeln!(writer, "{}", self.shapes.len())?;
        for shape in &self.shapes {
            write_shape(writer, shape)?;
        }
        writeln!(writer, "{}", self.image.len())?;
        for color in &self.image {
            write!(writer, "{} {} {} ", color.r, color.g, color.b)?;
        }
        writeln!(writer)?;
        for index in &self.image_shapes {
            write!(writer, "{index} ")?;
        }
        Ok(())
    }

    /// Write the scan to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> ScanResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the scan to bytes.
    pub fn write_to_bytes(&self) -> ScanResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

// --- Internal parsing/writing helpers ---

fn write_shape(writer: &mut impl Write, shape: &Shape) -> ScanResult<()> {
    writeln!(writer, "{SHAPE_VERSION}")?;
    writeln!(writer, "{} {} {}", shape.color.r, shape.color.g, shape.color.b)?;
    writeln!(
        writer,
        "{} {} {} {}",
        shape.bounds.min.x, shape.bounds.min.y, shape.bounds.max.x, shape.bounds.max.y
    )?;
    writeln!(writer, "{} {}", shape.chunks_size.x, shape.chunks_size.y)?;
    writeln!(writer, "{} {}", shape.chunks_offset.x, shape.chunks_offset.y)?;
    writeln!(writer, "{}", shape.chunk_count)?;

    writeln!(writer, "{}", shape.chunks.len())?;
    for chunk in &shape.chunks {
        write!(writer, "{} ", *chunk as u8)?;
    }
    writeln!(writer)?;

    writeln!(writer, "{}", shape.outer_edge.len())?;
    for edge in &shape.outer_edge {
        write!(writer, "{} {} ", edge.x, edge.y)?;
    }
    writeln!(writer)?;

    writeln!(writer, "{}", shape.outer_edge_points.len())?;
    for point in &shape.outer_edge_points {
        write!(writer, "{} {} ", point.x, point.y)?;
    }
    writeln!(writer)?;

    Ok(())
}

/// Whitespace-token cursor over the serialized text.
struct Tokens<'a> {
    iter: SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            iter: text.split_ascii_whitespace(),
        }
    }

    fn next(&mut self, what: &str) -> ScanResult<&'a str> {
        self.iter
            .next()
            .ok_or_else(|| ScanError::InvalidFormat(format!("unexpected end of stream at {what}")))
    }

    fn next_i32(&mut self, what: &str) -> ScanResult<i32> {
        let token = self.next(what)?;
        token
            .parse()
            .map_err(|e| ScanError::InvalidFormat(format!("bad integer for {what}: {e}")))
    }

    fn next_usize(&mut self, what: &str) -> ScanResult<usize> {
        let token = self.next(what)?;
        token
            .parse()
            .map_err(|e| ScanError::InvalidFormat(format!("bad count for {what}: {e}")))
    }

    fn next_f32(&mut self, what: &str) -> ScanResult<f32> {
        let token = self.next(what)?;
        token
            .parse()
            .map_err(|e| ScanError::InvalidFormat(format!("bad float for {what}: {e}")))
    }

    fn next_bit(&mut self, what: &str) -> ScanResult<bool> {
        match self.next(what)? {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(ScanError::InvalidFormat(format!(
                "expected 0 or 1 for {what}, got '{other}'"
            ))),
        }
    }
}

fn parse_scan(tokens: &mut Tokens) -> ScanResult<PixelScan> {
    let version = tokens.next("scan version")?;
    if version != SCAN_VERSION {
        return Err(ScanError::InvalidFormat(format!(
            "unsupported scan version tag '{version}'"
        )));
    }

    let has_borders = tokens.next_bit("has_borders")?;
    let width = tokens.next_i32("image width")?;
    let height = tokens.next_i32("image height")?;
    if width < 1 || height < 1 {
        return Err(ScanError::InvalidFormat(format!(
            "invalid image size {width}x{height}"
        )));
    }

    let image_size = Vector2I::new(width, height);
    let shape_count = tokens.next_usize("shape count")?;
    let mut shapes = Vec::with_capacity(shape_count.min(1 << 20));
    for i in 0..shape_count {
        shapes.push(parse_shape(tokens, i, image_size)?);
    }

    let image_count = tokens.next_usize("image count")?;
    if image_count != (width as usize) * (height as usize) {
        return Err(ScanError::InvalidFormat(format!(
            "image count {image_count} does not match {width}x{height}"
        )));
    }

    let mut image = Vec::with_capacity(image_count);
    for _ in 0..image_count {
        let r = tokens.next_f32("pixel red")?;
        let g = tokens.next_f32("pixel green")?;
        let b = tokens.next_f32("pixel blue")?;
        image.push(PixelF::new(r, g, b));
    }

    let mut image_shapes = Vec::with_capacity(image_count);
    for _ in 0..image_count {
        let index = tokens.next_i32("shape index")?;
        if index < -1 || index >= shape_count as i32 {
            return Err(ScanError::InvalidFormat(format!(
                "shape index {index} out of range for {shape_count} shapes"
            )));
        }
        image_shapes.push(index);
    }

    Ok(PixelScan {
        image_size,
        image,
        image_shapes,
        shapes,
        has_borders,
    })
}

fn parse_shape(tokens: &mut Tokens, index: usize, image_size: Vector2I) -> ScanResult<Shape> {
    let version = tokens.next("shape version")?;
    if version != SHAPE_VERSION {
        return Err(ScanError::InvalidFormat(format!(
            "unsupported shape version tag '{version}' for shape {index}"
        )));
    }

    let r = tokens.next_f32("shape red")?;
    let g = tokens.next_f32("shape green")?;
    let b = tokens.next_f32("shape blue")?;

    let min_x = tokens.next_i32("bounds min x")?;
    let min_y = tokens.next_i32("bounds min y")?;
    let max_x = tokens.next_i32("bounds max x")?;
    let max_y = tokens.next_i32("bounds max y")?;

    let size_x = tokens.next_i32("chunks size x")?;
    let size_y = tokens.next_i32("chunks size y")?;
    if size_x < 1 || size_y < 1 {
        return Err(ScanError::InvalidFormat(format!(
            "invalid chunks size {size_x}x{size_y} for shape {index}"
        )));
    }

    let offset_x = tokens.next_i32("chunks offset x")?;
    let offset_y = tokens.next_i32("chunks offset y")?;

    let chunk_count = tokens.next_usize("chunk count")?;
    if chunk_count < 1 {
        return Err(ScanError::InvalidFormat(format!(
            "shape {index} has no chunks"
        )));
    }

    let chunks_len = tokens.next_usize("chunks length")?;
    if chunks_len != (size_x as usize) * (size_y as usize) {
        return Err(ScanError::InvalidFormat(format!(
            "chunks length {chunks_len} does not match {size_x}x{size_y}"
        )));
    }

    let mut chunks = Vec::with_capacity(chunks_len);
    for _ in 0..chunks_len {
        chunks.push(tokens.next_bit("chunk bit")?);
    }

    let edge_len = tokens.next_usize("outer edge length")?;
    let mut outer_edge = Vec::with_capacity(edge_len.min(1 << 24));
    for _ in 0..edge_len {
        let x = tokens.next_f32("edge x")?;
        let y = tokens.next_f32("edge y")?;
        outer_edge.push(Vector2::new(x, y));
    }

    let point_len = tokens.next_usize("outer edge point length")?;
    let mut outer_edge_points = Vec::with_capacity(point_len.min(1 << 24));
    for _ in 0..point_len {
        let x = tokens.next_i32("edge point x")?;
        let y = tokens.next_i32("edge point y")?;
        outer_edge_points.push(Vector2I::new(x, y));
    }

    let chunks_size = Vector2I::new(size_x, size_y);
    let chunks_offset = Vector2I::new(offset_x, offset_y);
    // The layout carries no explicit flag: an uncompressed bitmap spans the
    // image with a zero offset, anything else is bounding-box-sized.
    let compressed = chunks_size != image_size || chunks_offset != Vector2I::new(0, 0);
    Ok(Shape {
        color: PixelF::new(r, g, b),
        bounds: Bounds2I::new(
            Vector2I::new(min_x, min_y),
            Vector2I::new(max_x, max_y),
        ),
        chunks_size,
        chunks_offset,
        chunks,
        chunk_count,
        outer_edge,
        outer_edge_points,
        compressed,
    })
}
