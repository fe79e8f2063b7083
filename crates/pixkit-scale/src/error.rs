//! Error types for pixkit-scale
//!
//! Every error maps to a stable negative status code for the C entry point;
//! [`error_string`] is the matching message lookup.

use pixkit_core::PixelFormat;
use std::ffi::CStr;
use thiserror::Error;

/// Status code for success
pub const OK: i32 = 0;
/// Source or destination buffer is absent
pub const ERR_NULL_ARGUMENT: i32 = -1;
/// Pixel format has no resampling implementation
pub const ERR_UNSUPPORTED_FORMAT: i32 = -2;
/// Source and destination formats differ
pub const ERR_FORMAT_MISMATCH: i32 = -3;
/// Geometry cannot produce a valid accumulator step
pub const ERR_FRAME_OUT_OF_RANGE: i32 = -4;
/// Hardware backend reported a driver error
pub const ERR_BACKEND: i32 = -5;
/// Buffer or pitch does not describe a valid frame
pub const ERR_INVALID_FRAME: i32 = -6;

const MESSAGES: [(i32, &CStr); 7] = [
    (OK, c"success"),
    (ERR_NULL_ARGUMENT, c"null argument"),
    (ERR_UNSUPPORTED_FORMAT, c"unsupported pixel format"),
    (ERR_FORMAT_MISMATCH, c"source and destination formats differ"),
    (ERR_FRAME_OUT_OF_RANGE, c"frame out of range"),
    (ERR_BACKEND, c"backend failure"),
    (ERR_INVALID_FRAME, c"invalid frame buffer"),
];

const UNKNOWN: &CStr = c"unknown error";

/// Errors that can occur while resizing
#[derive(Debug, Error)]
pub enum ScaleError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixkit_core::Error),

    /// Source or destination buffer is absent
    #[error("null argument: {0}")]
    NullArgument(&'static str),

    /// Pixel format has no resampling implementation
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(PixelFormat),

    /// Source and destination formats differ
    #[error("format mismatch: source {source_format}, destination {destination_format}")]
    FormatMismatch {
        source_format: PixelFormat,
        destination_format: PixelFormat,
    },

    /// Geometry cannot be resampled
    #[error("frame out of range: {0}")]
    FrameOutOfRange(String),

    /// Hardware backend failure, with the driver's own code
    #[error("backend '{backend}' failed with driver code {code}")]
    Backend { backend: &'static str, code: i32 },
}

impl ScaleError {
    /// Stable status code of this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::Core(pixkit_core::Error::UnknownFormat(_)) => ERR_UNSUPPORTED_FORMAT,
            Self::Core(_) => ERR_INVALID_FRAME,
            Self::NullArgument(_) => ERR_NULL_ARGUMENT,
            Self::UnsupportedFormat(_) => ERR_UNSUPPORTED_FORMAT,
            Self::FormatMismatch { .. } => ERR_FORMAT_MISMATCH,
            Self::FrameOutOfRange(_) => ERR_FRAME_OUT_OF_RANGE,
            Self::Backend { .. } => ERR_BACKEND,
        }
    }

    /// Driver code preserved from a backend failure.
    pub fn driver_code(&self) -> Option<i32> {
        match self {
            Self::Backend { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type for resize operations
pub type ScaleResult<T> = Result<T, ScaleError>;

/// Message for a status code as a C string.
///
/// Unknown codes yield `"unknown error"`.
pub fn error_cstr(code: i32) -> &'static CStr {
    MESSAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(UNKNOWN, |&(_, msg)| msg)
}

/// Message for a status code.
pub fn error_string(code: i32) -> &'static str {
    error_cstr(code).to_str().unwrap_or("unknown error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_and_described() {
        for (i, (code, _)) in MESSAGES.iter().enumerate() {
            assert!(MESSAGES[i + 1..].iter().all(|(c, _)| c != code));
            assert_ne!(error_string(*code), "unknown error");
        }
        assert_eq!(error_string(42), "unknown error");
        assert_eq!(error_string(OK), "success");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ScaleError::NullArgument("source").code(), ERR_NULL_ARGUMENT);
        assert_eq!(
            ScaleError::UnsupportedFormat(PixelFormat::Nv12).code(),
            ERR_UNSUPPORTED_FORMAT
        );
        assert_eq!(
            ScaleError::Core(pixkit_core::Error::UnknownFormat(99)).code(),
            ERR_UNSUPPORTED_FORMAT
        );
        assert_eq!(
            ScaleError::Core(pixkit_core::Error::InvalidPitch { pitch: 1, width: 2 }).code(),
            ERR_INVALID_FRAME
        );
        let err = ScaleError::Backend {
            backend: "accelerator",
            code: -110,
        };
        assert_eq!(err.code(), ERR_BACKEND);
        assert_eq!(err.driver_code(), Some(-110));
        assert!(err.to_string().contains("-110"));
    }
}
