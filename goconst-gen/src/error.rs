//! Error types for goconst-gen.

use std::path::PathBuf;

use thiserror::Error;

use goconst_extract::ExtractError;
use goconst_loader::LoadError;
use goconst_renderer::RenderError;

/// All errors that can arise from a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Packages could not be resolved or parsed.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Extraction hit a fatal condition.
    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`GenerateError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.into(),
        source,
    }
}
