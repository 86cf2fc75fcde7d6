//! Domain types for goconst.
//!
//! All path fields use `PathBuf`. Packages and files are produced once by the
//! loader and are read-only afterwards; symbols are created fresh for every
//! (package, type) extraction.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ast;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// The name of a Go type whose constants are turned into a union.
///
/// Always a valid Go identifier, so the derived names are valid TypeScript
/// identifiers too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName(String);

impl TypeName {
    /// Validate and wrap `name`.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        let name = name.trim();
        if is_identifier(name) {
            Ok(Self(name.to_owned()))
        } else {
            Err(CoreError::InvalidTypeName(name.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the generated `const` array: `eventType` → `eventTypes`.
    pub fn union_name(&self) -> String {
        format!("{}s", self.0)
    }

    /// Name of the exported type alias: `eventType` → `EventType`.
    ///
    /// Only the first character changes, to its single-character title case.
    pub fn exported_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => std::iter::once(title_case(first)).chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Title case of one character. Digraphs have dedicated title forms; any
/// character whose uppercase needs several characters is left as is.
fn title_case(c: char) -> char {
    match c {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        _ => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TypeName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// One constant pulled out of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Identifier of the constant, never empty.
    pub name: String,
    /// Leading comment lines, markers stripped, joined with `\n`.
    pub doc: String,
    /// Unquoted string literal; only present when values are tracked.
    pub value: Option<String>,
}

/// A parsed Go source file belonging to one [`Package`].
#[derive(Debug, Clone, PartialEq)]
pub struct GoFile {
    pub path: PathBuf,
    pub syntax: ast::File,
}

/// A Go package: one directory (or one set of explicitly named files).
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    /// Name from the `package` clause.
    pub name: String,
    /// Fully-qualified import path, when a `go.mod` could be found.
    pub import_path: Option<String>,
    /// Directory holding the package's files.
    pub dir: PathBuf,
    /// Files in loader order (sorted by file name).
    pub files: Vec<GoFile>,
}

impl Package {
    /// The import path when known, the bare package name otherwise.
    pub fn display_path(&self) -> &str {
        self.import_path.as_deref().unwrap_or(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
