//! Tera rendering engine: [`TemplateEngine`] and [`Renderer`].

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tera::{Tera, Value};

use crate::context::Data;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded template: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

/// Name the union template is registered under.
pub const UNION_TEMPLATE: &str = "union.ts.tera";

const UNION_TEMPLATE_SRC: &str = include_str!("templates/union.ts.tera");

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split doc text into comment lines.
///
/// Blank or whitespace-only text has no lines; otherwise the trimmed text is
/// split on `\n` and nothing is re-flowed.
pub fn split_lines(doc: &str) -> Vec<&str> {
    let doc = doc.trim();
    if doc.is_empty() {
        return Vec::new();
    }
    doc.split('\n').collect()
}

/// `split_lines` as a tera filter.
fn split_lines_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let doc = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("split_lines filter expects a string"))?;
    Ok(Value::Array(
        split_lines(doc).into_iter().map(Value::from).collect(),
    ))
}

fn build_tera(template_override: Option<&Path>) -> Result<Tera, RenderError> {
    let source = match template_override {
        Some(path) => std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: PathBuf::from(path),
            source,
        })?,
        None => UNION_TEMPLATE_SRC.to_string(),
    };

    let mut tera = Tera::default();
    tera.register_filter("split_lines", split_lines_filter);
    tera.add_raw_template(UNION_TEMPLATE, &source)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera engine holding the compiled union template.
///
/// The template is parsed once, in [`TemplateEngine::new`]; a parse failure
/// there means the embedded template (or the user's override) is broken.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Compile the embedded template, or the file at `template_override`.
    pub fn new(template_override: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(template_override)?;
        Ok(TemplateEngine { tera })
    }

    /// Render `data` to text. Line endings are normalised to LF and the output
    /// always ends with a newline.
    pub fn render(&self, data: &Data) -> Result<String, RenderError> {
        let ctx = data.to_tera_context()?;
        let mut content = self.tera.render(UNION_TEMPLATE, &ctx)?.replace("\r\n", "\n");
        if !content.ends_with('\n') {
            content.push('\n');
        }
        Ok(content)
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders union declarations. Create once and reuse for every unit.
pub struct Renderer {
    engine: TemplateEngine,
}

impl Renderer {
    /// Construct a [`Renderer`] with the embedded template.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer {
            engine: TemplateEngine::new(None)?,
        })
    }

    /// Construct a [`Renderer`] from a user template file.
    pub fn with_template(path: &Path) -> Result<Self, RenderError> {
        Ok(Renderer {
            engine: TemplateEngine::new(Some(path))?,
        })
    }

    /// Render `data` to a string.
    pub fn render_to_string(&self, data: &Data) -> Result<String, RenderError> {
        self.engine.render(data)
    }

    /// Render `data` and write it to `out`. Nothing is written unless rendering
    /// succeeds.
    pub fn render<W: Write>(&self, data: &Data, out: &mut W) -> Result<(), RenderError> {
        let content = self.render_to_string(data)?;
        out.write_all(content.as_bytes()).map_err(RenderError::Write)?;
        out.flush().map_err(RenderError::Write)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
