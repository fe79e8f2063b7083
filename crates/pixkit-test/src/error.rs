//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression inputs
#[derive(Debug, Error)]
pub enum TestError {
    /// Frame could not be described
    #[error("core error: {0}")]
    Core(#[from] pixkit_core::Error),

    /// Pattern generator cannot produce this format
    #[error("no pattern for format '{format}': {message}")]
    Pattern { format: String, message: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
