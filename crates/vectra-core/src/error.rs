//! Error types for vectra-core
//!
//! Provides a unified error type for the core primitives. Downstream crates
//! wrap this in their own error enums via `#[from]`.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: usize, height: usize },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
