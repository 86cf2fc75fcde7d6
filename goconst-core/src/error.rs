//! Error types for goconst-core.

use thiserror::Error;

/// Errors raised while validating domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The requested type name is not a Go identifier.
    #[error("invalid type name '{0}': expected a Go identifier")]
    InvalidTypeName(String),
}
