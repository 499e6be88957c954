//! vectra-core - Pixel and geometry primitives for the vectra vectorizer
//!
//! This crate holds the types everything else is built on: the three RGB
//! pixel representations with their similarity metric, integer/float
//! 2-vectors, inclusive bounds, row-major grid indexing, compass directions
//! with quarter-turn algebra, and the `PixelSource`/`PixelSink` traits with
//! the in-memory [`Raster`].

mod compass;
mod error;
mod geometry;
mod pixel;
mod raster;

pub use compass::Compass;
pub use error::{Error, Result};
pub use geometry::{Bounds2I, GridIndexer, Vector2, Vector2I};
pub use pixel::{Pixel, PixelD, PixelF};
pub use raster::{PixelSink, PixelSource, Raster};
