//! vectra-scan - Region segmentation and outline tracing
//!
//! The pixel-scan pipeline: ingest a pixel grid, partition it into shapes
//! of transitively-similar color, trace each shape's outline on the dual
//! grid, then render rasters, emit SVG, or serialize the whole scan to the
//! text `.sdat` layout and back.
//!
//! ```
//! use vectra_core::{Pixel, PixelSink, Raster};
//! use vectra_scan::PixelScan;
//!
//! let mut raster = Raster::new(2, 2);
//! raster.set(0, 0, Pixel::new(255, 0, 0));
//! let mut scan = PixelScan::from_source(&raster).unwrap();
//! scan.scan_for_shapes(10.0).unwrap();
//! scan.calculate_borders();
//!
//! let mut svg = Vec::new();
//! scan.to_svg(&mut svg).unwrap();
//! ```

mod border;
mod error;
mod render;
mod scan;
mod serial;
mod shape;
mod svg;

pub use error::{ScanError, ScanResult};
pub use scan::{PixelScan, MAX_SCAN_RESTARTS};
pub use shape::Shape;
