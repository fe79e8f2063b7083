//! Error types for pixkit-core
//!
//! Provides a unified error type for format lookup and image view
//! construction. Each variant captures enough context for diagnostics
//! without exposing internal implementation details.

use thiserror::Error;

/// pixkit-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Row pitch shorter than the logical width
    #[error("invalid pitch: {pitch} pixels for width {width}")]
    InvalidPitch { pitch: u32, width: u32 },

    /// Buffer cannot hold the described frame
    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Raw format tag with no known format
    #[error("unknown pixel format tag: {0}")]
    UnknownFormat(u32),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for pixkit-core operations
pub type Result<T> = std::result::Result<T, Error>;
