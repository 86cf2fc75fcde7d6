//! # goconst-renderer
//!
//! Tera-based renderer that turns extracted constants into a TypeScript union
//! declaration.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use goconst_core::{Symbol, TypeName};
//! use goconst_renderer::{Data, Renderer};
//!
//! fn print_union(type_name: &TypeName, symbols: &[Symbol]) {
//!     if let Ok(renderer) = Renderer::new() {
//!         let data = Data::new(type_name, None, symbols);
//!         if let Ok(text) = renderer.render_to_string(&data) {
//!             print!("{text}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{Data, Field};
pub use engine::{split_lines, Renderer, TemplateEngine, UNION_TEMPLATE};
pub use error::RenderError;
