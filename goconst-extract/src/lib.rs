//! # goconst-extract
//!
//! Finds the constants declared with a requested type and turns them into
//! [`Symbol`](goconst_core::Symbol)s.
//!
//! Extraction is a pure function of an immutable [`ExtractRequest`] and a
//! syntax tree: every call returns a fresh symbol list, so nothing has to be
//! reset between type names and runs may happen in parallel.

pub mod doc;
pub mod error;
pub mod extract;
pub mod unquote;

pub use error::ExtractError;
pub use extract::{extract_file, extract_package, DocPolicy, ExtractRequest, ValuePolicy};
