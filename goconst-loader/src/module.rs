//! `go.mod` lookup for import paths.

use std::path::{Component, Path};

use crate::error::{io_err, LoadError};

/// Import path of the package in `dir`: the `module` directive of the nearest
/// enclosing `go.mod` joined with the directory's path relative to it.
///
/// `dir` should be absolute. Returns `Ok(None)` when no `go.mod` is found.
pub fn import_path(dir: &Path) -> Result<Option<String>, LoadError> {
    for root in dir.ancestors() {
        let go_mod = root.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }
        let contents = std::fs::read_to_string(&go_mod).map_err(|e| io_err(&go_mod, e))?;
        let Some(module) = module_directive(&contents) else {
            return Ok(None);
        };

        let mut path = module.to_string();
        if let Ok(rel) = dir.strip_prefix(root) {
            for component in rel.components() {
                if let Component::Normal(part) = component {
                    path.push('/');
                    path.push_str(&part.to_string_lossy());
                }
            }
        }
        return Ok(Some(path));
    }
    Ok(None)
}

/// Extract the module path from `go.mod` contents.
pub fn module_directive(contents: &str) -> Option<&str> {
    contents.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.trim().trim_matches('"');
        (!module.is_empty()).then_some(module)
    })
}
