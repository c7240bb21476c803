//! Error types for aire

use thiserror::Error;

/// Main error type for aire operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {name} ({reason})")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown pollutant code: {0}")]
    UnknownPollutant(String),

    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for aire operations
pub type Result<T> = std::result::Result<T, Error>;
