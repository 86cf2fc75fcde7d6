//! Generation pipeline shared by the CLI and tests.
//!
//! One run loads the requested packages, then emits one unit per
//! (package, type) pair in load order and request order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use goconst_core::TypeName;
use goconst_extract::{extract_package, DocPolicy, ExtractRequest, ValuePolicy};
use goconst_loader::load_packages_at;
use goconst_renderer::{Data, Renderer};

use crate::error::{io_err, GenerateError};
use crate::output::{write_output, Destination, OutputTarget, WriteResult};

/// Everything one generation run needs.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Package patterns, resolved against the run's base directory.
    pub patterns: Vec<String>,
    /// Requested type names, in order.
    pub type_names: Vec<TypeName>,
    pub out: OutputTarget,
    pub values: ValuePolicy,
    pub docs: DocPolicy,
    /// User template replacing the built-in union template.
    pub template: Option<PathBuf>,
}

impl GenerateRequest {
    pub fn new(patterns: Vec<String>, type_names: Vec<TypeName>) -> Self {
        Self {
            patterns,
            type_names,
            out: OutputTarget::Stdout,
            values: ValuePolicy::default(),
            docs: DocPolicy::default(),
            template: None,
        }
    }
}

/// Summary of one emitted unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitResult {
    /// Display path of the package the unit came from.
    pub package: String,
    pub type_name: TypeName,
    /// Number of fields in the union.
    pub symbols: usize,
    pub write: WriteResult,
}

/// Run the pipeline relative to the current working directory.
pub fn generate(req: &GenerateRequest) -> Result<Vec<UnitResult>, GenerateError> {
    let cwd = std::env::current_dir().map_err(|e| io_err(".", e))?;
    generate_at(&cwd, req)
}

/// Run the pipeline with patterns and output paths resolved against `base`.
///
/// The first fatal error stops the run; units emitted before it stay
/// written.
pub fn generate_at(base: &Path, req: &GenerateRequest) -> Result<Vec<UnitResult>, GenerateError> {
    let renderer = match &req.template {
        Some(path) => Renderer::with_template(&base.join(path))?,
        None => Renderer::new()?,
    };

    let packages = load_packages_at(base, &req.patterns)?;
    tracing::debug!(
        "loaded {} package(s) for {} type(s), writing to {}",
        packages.len(),
        req.type_names.len(),
        req.out
    );

    let mut results = Vec::with_capacity(packages.len() * req.type_names.len());
    let mut seen: HashSet<Destination> = HashSet::new();

    for pkg in &packages {
        for type_name in &req.type_names {
            let extract = ExtractRequest::new(type_name.clone())
                .with_values(req.values)
                .with_docs(req.docs);
            let symbols = extract_package(&extract, pkg)?;

            let data = Data::new(type_name, Some(pkg.display_path()), &symbols);
            let content = renderer.render_to_string(&data)?;

            let dest = req.out.resolve(base, type_name, pkg);
            if matches!(dest, Destination::File(_)) && !seen.insert(dest.clone()) {
                tracing::warn!(
                    "{dest} is written more than once; only the last unit ({} in {}) is kept",
                    type_name,
                    pkg.display_path()
                );
            }

            let write = write_output(&dest, &content)?;
            results.push(UnitResult {
                package: pkg.display_path().to_string(),
                type_name: type_name.clone(),
                symbols: symbols.len(),
                write,
            });
        }
    }

    Ok(results)
}
