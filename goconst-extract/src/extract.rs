//! The symbol walk.

use goconst_core::ast::{ConstDecl, ConstSpec, Decl, Expr, File, TypeExpr};
use goconst_core::{Package, Symbol, TypeName};

use crate::doc::doc_text;
use crate::error::ExtractError;
use crate::unquote::unquote;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Whether a constant's initializer is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValuePolicy {
    /// Read the single literal initializer; specs whose initializer is not
    /// exactly one string or rune literal are skipped.
    #[default]
    Literal,
    /// Do not read initializers; every spec of the requested type is kept.
    Ignore,
}

/// What to do with a constant that has no leading comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocPolicy {
    /// Use an empty doc string.
    #[default]
    Optional,
    /// Fail with [`ExtractError::MissingDoc`].
    Required,
}

/// One extraction pass: which type to look for and how strict to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRequest {
    pub type_name: TypeName,
    pub values: ValuePolicy,
    pub docs: DocPolicy,
}

impl ExtractRequest {
    pub fn new(type_name: TypeName) -> Self {
        ExtractRequest {
            type_name,
            values: ValuePolicy::default(),
            docs: DocPolicy::default(),
        }
    }

    pub fn with_values(mut self, values: ValuePolicy) -> Self {
        self.values = values;
        self
    }

    pub fn with_docs(mut self, docs: DocPolicy) -> Self {
        self.docs = docs;
        self
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Symbols of `file` declared with the requested type, in declaration order.
pub fn extract_file(req: &ExtractRequest, file: &File) -> Result<Vec<Symbol>, ExtractError> {
    let mut out = Vec::new();
    walk(req, &file.decls, &mut out)?;
    Ok(out)
}

/// Symbols of every file of `pkg`, concatenated in file order.
///
/// Duplicate names across files are kept.
pub fn extract_package(req: &ExtractRequest, pkg: &Package) -> Result<Vec<Symbol>, ExtractError> {
    let mut out = Vec::new();
    for file in &pkg.files {
        walk(req, &file.syntax.decls, &mut out)?;
    }
    tracing::debug!(
        package = %pkg.display_path(),
        type_name = %req.type_name,
        symbols = out.len(),
        "extracted constants"
    );
    Ok(out)
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

fn walk(req: &ExtractRequest, decls: &[Decl], out: &mut Vec<Symbol>) -> Result<(), ExtractError> {
    for decl in decls {
        match decl {
            Decl::Const(group) => const_group(req, group, out)?,
            Decl::Func(func) => walk(req, &func.body, out)?,
            Decl::Other(other) => walk(req, &other.nested, out)?,
        }
    }
    Ok(())
}

fn const_group(
    req: &ExtractRequest,
    group: &ConstDecl,
    out: &mut Vec<Symbol>,
) -> Result<(), ExtractError> {
    for spec in &group.specs {
        let declared = spec.ty.as_ref().and_then(TypeExpr::as_name);
        if declared != Some(req.type_name.as_str()) {
            continue;
        }

        // Only the first name of `A, B T = ...` is supported.
        let Some(name) = spec.names.first() else {
            tracing::debug!(line = spec.line, "skipping constant spec without names");
            continue;
        };

        let value = match req.values {
            ValuePolicy::Ignore => None,
            ValuePolicy::Literal => match literal_value(spec) {
                Ok(value) => Some(value),
                Err(reason) => {
                    tracing::debug!(constant = %name, line = spec.line, %reason, "skipping constant");
                    continue;
                }
            },
        };

        // Only the spec's own comment counts; an ungrouped declaration keeps
        // its comment on the declaration.
        let doc = match (&spec.doc, req.docs) {
            (Some(g), _) => doc_text(g),
            (None, DocPolicy::Optional) => String::new(),
            (None, DocPolicy::Required) => {
                return Err(ExtractError::MissingDoc { name: name.clone() })
            }
        };

        out.push(Symbol {
            name: name.clone(),
            doc,
            value,
        });
    }
    Ok(())
}

fn literal_value(spec: &ConstSpec) -> Result<String, String> {
    match spec.values.as_slice() {
        [Expr::Lit(lit)] => unquote(&lit.raw).map_err(|e| e.to_string()),
        [_] => Err("initializer is not a literal".to_string()),
        values => Err(format!("expected one initializer, found {}", values.len())),
    }
}
