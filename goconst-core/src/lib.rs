//! goconst core library: domain types, Go syntax model, errors.
//!
//! Public API surface:
//! - [`types`]: newtypes and the package/file/symbol structs
//! - [`ast`]: the declaration-level Go syntax model produced by the loader
//! - [`error`]: [`CoreError`]

pub mod ast;
pub mod error;
pub mod types;

pub use error::CoreError;
pub use types::{GoFile, Package, Symbol, TypeName};
