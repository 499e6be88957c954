//! vectra-reduce - Neighborhood reduction pre-pass
//!
//! An optional smoothing stage run before scanning: each pixel is replaced
//! by the original pixel at its most popular window neighbor, collapsing
//! speckle and gradients into flatter regions that segment cleanly.

mod error;
mod reduce;

pub use error::{ReduceError, ReduceResult};
pub use reduce::{Reducer, DEFAULT_SIMILARITY};
