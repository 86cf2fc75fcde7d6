//! Error types for goconst-loader.

use std::path::PathBuf;

use thiserror::Error;

/// A tokenizer or parser failure inside one file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

/// All errors that can arise while resolving and loading packages.
#[derive(Debug, Error)]
pub enum LoadError {
    /// I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be tokenized.
    #[error("failed to parse {path}: {source}")]
    Syntax {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A pattern names neither a directory, a `.go` file nor a `/...` walk.
    #[error("pattern '{pattern}' does not match any directory or .go file")]
    PatternNotFound { pattern: String },

    /// Every pattern resolved, but none yielded a package.
    #[error("no packages matching {}", .patterns.join(" "))]
    NoPackages { patterns: Vec<String> },
}

/// Convenience constructor for [`LoadError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.into(),
        source,
    }
}
