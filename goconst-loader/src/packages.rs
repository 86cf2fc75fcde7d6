//! Pattern resolution and package loading.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use goconst_core::{GoFile, Package};

use crate::error::{io_err, LoadError};
use crate::module;
use crate::parser::parse_file;

/// Load every package matched by `patterns`, resolved against the current
/// working directory.
pub fn load_packages(patterns: &[String]) -> Result<Vec<Package>, LoadError> {
    let cwd = std::env::current_dir().map_err(|e| io_err(".", e))?;
    load_packages_at(&cwd, patterns)
}

/// Load every package matched by `patterns`, resolved against `base`.
///
/// Packages come back in pattern order; a directory matched twice is loaded
/// once. Fails with [`LoadError::NoPackages`] when nothing matched.
pub fn load_packages_at(base: &Path, patterns: &[String]) -> Result<Vec<Package>, LoadError> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut loose: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        if let Some(root) = recursive_root(pattern) {
            let root = base.join(root);
            if !root.is_dir() {
                return Err(LoadError::PatternNotFound {
                    pattern: pattern.clone(),
                });
            }
            dirs.extend(walk_package_dirs(&root)?);
            continue;
        }

        let path = base.join(pattern);
        if path.is_dir() {
            dirs.push(path);
        } else if path.is_file() && is_go_file(&path) {
            loose.push(path);
        } else {
            return Err(LoadError::PatternNotFound {
                pattern: pattern.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    let mut packages = Vec::new();
    for dir in dirs {
        let dir = canonical(&dir)?;
        if !seen.insert(dir.clone()) {
            continue;
        }
        let files = package_files(&dir)?;
        if files.is_empty() {
            tracing::debug!(dir = %dir.display(), "no Go files");
            continue;
        }
        let import_path = module::import_path(&dir)?;
        packages.extend(build_package(dir, import_path, &files)?);
    }

    if !loose.is_empty() {
        let dir = match loose[0].parent() {
            Some(parent) => canonical(parent)?,
            None => base.to_path_buf(),
        };
        packages.extend(build_package(dir, None, &loose)?);
    }

    if packages.is_empty() {
        return Err(LoadError::NoPackages {
            patterns: patterns.to_vec(),
        });
    }
    Ok(packages)
}

fn recursive_root(pattern: &str) -> Option<&str> {
    if pattern == "..." {
        return Some(".");
    }
    pattern.strip_suffix("/...")
}

fn canonical(path: &Path) -> Result<PathBuf, LoadError> {
    path.canonicalize().map_err(|e| io_err(path, e))
}

fn is_go_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("go")
}

/// Directories named `testdata` or `vendor`, or starting with `.` or `_`, are
/// never walked into.
fn skipped_dir(name: &str) -> bool {
    name == "testdata" || name == "vendor" || name.starts_with('.') || name.starts_with('_')
}

fn skipped_file(name: &str) -> bool {
    name.ends_with("_test.go") || name.starts_with('.') || name.starts_with('_')
}

fn walk_package_dirs(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut dirs = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !e.file_type().is_dir() || !skipped_dir(&e.file_name().to_string_lossy())
        });
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            io_err(path, e.into())
        })?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Non-test `.go` files of `dir`, sorted by file name. Names starting with
/// `.` or `_` are ignored, as the go tool does.
fn package_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if !path.is_file() || !is_go_file(&path) || skipped_file(&name) {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Parse `paths` into a package. `None` when every file is excluded by a
/// build constraint.
fn build_package(
    dir: PathBuf,
    import_path: Option<String>,
    paths: &[PathBuf],
) -> Result<Option<Package>, LoadError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let src = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        if build_ignored(&src) {
            tracing::debug!(file = %path.display(), "skipping file excluded by build constraint");
            continue;
        }
        let syntax = parse_file(&src).map_err(|source| LoadError::Syntax {
            path: path.clone(),
            source,
        })?;
        files.push(GoFile {
            path: path.clone(),
            syntax,
        });
    }

    let Some(name) = files.first().map(|f| f.syntax.package.clone()) else {
        tracing::debug!(dir = %dir.display(), "every Go file is build-ignored");
        return Ok(None);
    };
    for file in &files {
        if file.syntax.package != name {
            tracing::warn!(
                file = %file.path.display(),
                expected = %name,
                found = %file.syntax.package,
                "package clause does not match the rest of the package"
            );
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        package = %name,
        files = files.len(),
        "loaded package"
    );
    Ok(Some(Package {
        name,
        import_path,
        dir,
        files,
    }))
}

/// Whether a `//go:build ignore` (or legacy `// +build ignore`) line appears
/// before the package clause.
fn build_ignored(src: &str) -> bool {
    for line in src.lines() {
        let line = line.trim();
        if line.starts_with("package ") {
            return false;
        }
        if let Some(expr) = line.strip_prefix("//go:build ") {
            if expr.split_whitespace().any(|tag| tag == "ignore") {
                return true;
            }
        }
        if let Some(expr) = line.strip_prefix("// +build ") {
            if expr.split_whitespace().any(|tag| tag == "ignore") {
                return true;
            }
        }
    }
    false
}
