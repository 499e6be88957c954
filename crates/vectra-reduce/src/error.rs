//! Error types for vectra-reduce

use thiserror::Error;

/// Errors that can occur while configuring or running the reducer
#[derive(Debug, Error)]
pub enum ReduceError {
    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for reducer operations
pub type ReduceResult<T> = Result<T, ReduceError>;
