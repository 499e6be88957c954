//! Error types for vectra-scan

use thiserror::Error;

/// Errors that can occur while scanning, serializing or rendering
#[derive(Debug, Error)]
pub enum ScanError {
    /// Core primitive error
    #[error("core error: {0}")]
    Core(#[from] vectra_core::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or unrecognized serialized data
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Operation not legal in the current state
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;
