//! # goconst-gen
//!
//! Generation pipeline and output writing.
//!
//! Call [`generate`] to load packages, extract every requested type and write
//! one rendered union per (package, type) unit.

pub mod error;
pub mod output;
pub mod pipeline;

pub use error::GenerateError;
pub use output::{write_output, Destination, OutputTarget, WriteResult};
pub use pipeline::{generate, generate_at, GenerateRequest, UnitResult};
