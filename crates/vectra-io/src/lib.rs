//! vectra-io - Raster file I/O
//!
//! PNG decoding and encoding against the core pixel traits.

mod error;
mod png;

pub use error::{IoError, IoResult};
pub use self::png::{read_png, read_png_file, write_png, write_png_file};
