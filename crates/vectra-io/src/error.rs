//! Error types for vectra-io

use thiserror::Error;

/// Errors that can occur while reading or writing raster files
#[derive(Debug, Error)]
pub enum IoError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Image encode error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported image format
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
