//! Error types for goconst-extract.

use thiserror::Error;

/// Fatal extraction failures. Malformed specs are skipped, never reported here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// [`DocPolicy::Required`](crate::DocPolicy::Required) and the constant
    /// has no leading comment.
    #[error("documentation comment required for enumerated constant {name}")]
    MissingDoc { name: String },
}
