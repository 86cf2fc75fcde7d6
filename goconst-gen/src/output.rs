//! Output targets and the change-gated file writer.
//!
//! ## `write_output` for files
//!
//! 1. Content is already rendered by the caller.
//! 2. If the file exists with identical content, leave it alone.
//! 3. Create parent directories.
//! 4. Write to `<path>.goconst.tmp`.
//! 5. Rename to the final path (atomic on POSIX); remove the tmp on failure.

use std::convert::Infallible;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use goconst_core::{Package, TypeName};

use crate::error::{io_err, GenerateError};

/// The `--out` value meaning standard output.
pub const STDOUT: &str = "stdout";

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// Where generated units go, as configured by the user.
///
/// A file target is a path template: `{type}` is replaced with the requested
/// type name and `{package}` with the package name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(String),
}

impl FromStr for OutputTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == STDOUT {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(s.to_string())
        })
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str(STDOUT),
            OutputTarget::File(template) => f.write_str(template),
        }
    }
}

impl OutputTarget {
    /// Concrete destination for one unit; relative paths resolve against `base`.
    pub fn resolve(&self, base: &Path, type_name: &TypeName, package: &Package) -> Destination {
        match self {
            OutputTarget::Stdout => Destination::Stdout,
            OutputTarget::File(template) => {
                let path = template
                    .replace("{type}", type_name.as_str())
                    .replace("{package}", &package.name);
                Destination::File(base.join(path))
            }
        }
    }
}

/// A resolved sink for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str("<stdout>"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of writing one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// Content went to standard output.
    Stdout,
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File already held exactly this content.
    Unchanged { path: PathBuf },
}

// ---------------------------------------------------------------------------
// write_output
// ---------------------------------------------------------------------------

/// Write rendered `content` to `dest`.
///
/// The sink is opened here and closed before returning, on success and on
/// failure alike.
pub fn write_output(dest: &Destination, content: &str) -> Result<WriteResult, GenerateError> {
    match dest {
        Destination::Stdout => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(content.as_bytes())
                .and_then(|()| lock.flush())
                .map_err(|e| io_err("<stdout>", e))?;
            Ok(WriteResult::Stdout)
        }
        Destination::File(path) => {
            let tmp = PathBuf::from(format!("{}.goconst.tmp", path.display()));
            write_file_with_tmp(path, content, &tmp)
        }
    }
}

fn write_file_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<WriteResult, GenerateError> {
    if let Ok(existing) = std::fs::read_to_string(path) {
        if existing == content {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
