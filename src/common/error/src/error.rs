//! Core error types for filtersplit.

use thiserror::Error;

/// Result type alias using `SplitError`.
pub type SplitResult<T> = std::result::Result<T, SplitError>;

/// Error type for filtersplit operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SplitError {
    /// Input document does not have the shape of a filter tree.
    #[error("ShapeError: {0}")]
    ShapeError(String),

    /// JSON deserialization error.
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl SplitError {
    /// Create a new `ShapeError`.
    pub fn shape<S: Into<String>>(msg: S) -> Self {
        Self::ShapeError(msg.into())
    }
}

/// Return early with a `ShapeError`.
#[macro_export]
macro_rules! shape_err {
    ($($arg:tt)*) => {
        return Err($crate::SplitError::ShapeError(format!($($arg)*)))
    };
}
