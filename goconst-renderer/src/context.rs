//! Template context: the serializable rendering payload built from symbols.

use serde::{Deserialize, Serialize};

use goconst_core::{Symbol, TypeName};

use crate::error::RenderError;

/// Everything the union template can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data {
    /// Import path (or name) of the source package. Not used by the
    /// embedded template; available to user templates.
    pub package: Option<String>,
    /// Name of the `const` array, e.g. `eventTypes`.
    pub union_name: String,
    /// Name of the exported type alias, e.g. `EventType`.
    pub type_name: String,
    pub fields: Vec<Field>,
}

/// One tag of the union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub doc: String,
}

impl From<&Symbol> for Field {
    fn from(symbol: &Symbol) -> Self {
        Field {
            name: symbol.name.clone(),
            doc: symbol.doc.clone(),
        }
    }
}

impl Data {
    /// Project extracted symbols into the template's view. Values are dropped;
    /// one field per symbol, same order.
    pub fn new(type_name: &TypeName, package: Option<&str>, symbols: &[Symbol]) -> Self {
        Data {
            package: package.map(str::to_string),
            union_name: type_name.union_name(),
            type_name: type_name.exported_name(),
            fields: symbols.iter().map(Field::from).collect(),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        let value = serde_json::to_value(self)?;
        Ok(tera::Context::from_value(value)?)
    }
}
