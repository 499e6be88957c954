//! Vectra - raster image to SVG vectorizer
//!
//! Converts raster images into vector graphics by segmenting the pixel
//! grid into regions of similar color, tracing each region's outline, and
//! emitting one filled SVG path per region.
//!
//! # Overview
//!
//! - [`PixelScan`] — region segmentation, outline tracing, serialization
//!   and SVG emission
//! - [`Reducer`] — optional neighborhood smoothing pre-pass
//! - [`read_png`] / [`write_png`] — raster file I/O
//!
//! # Example
//!
//! ```
//! use vectra::{Pixel, PixelScan, PixelSink, Raster};
//!
//! let mut raster = Raster::new(2, 2);
//! raster.set(0, 0, Pixel::new(255, 0, 0));
//!
//! let mut scan = PixelScan::from_source(&raster).unwrap();
//! scan.scan_for_shapes(10.0).unwrap();
//!
//! let mut svg = Vec::new();
//! scan.to_svg(&mut svg).unwrap();
//! ```

// Re-export core types
pub use vectra_core::*;

pub use vectra_io::{read_png, read_png_file, write_png, write_png_file, IoError, IoResult};
pub use vectra_reduce::{ReduceError, ReduceResult, Reducer, DEFAULT_SIMILARITY};
pub use vectra_scan::{PixelScan, ScanError, ScanResult, Shape, MAX_SCAN_RESTARTS};
