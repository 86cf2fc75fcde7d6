//! # goconst-loader
//!
//! Resolves source patterns into [`Package`]s and parses each file into the
//! declaration-level syntax model from [`goconst_core::ast`].
//!
//! Supported patterns:
//!
//! | Pattern          | Meaning                                            |
//! |------------------|----------------------------------------------------|
//! | `./pkg`          | the package in that directory                      |
//! | `./...`, `d/...` | every package below the directory                  |
//! | `a.go b.go`      | the named files, loaded as a single package        |

pub mod error;
pub mod lexer;
pub mod module;
pub mod packages;
pub mod parser;

pub use error::{LoadError, ParseError};
pub use goconst_core::Package;
pub use packages::{load_packages, load_packages_at};
pub use parser::parse_file;
