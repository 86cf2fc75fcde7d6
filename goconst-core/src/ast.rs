//! Declaration-level syntax model for Go source files.
//!
//! Only the shapes the extractor needs are modelled precisely: constant
//! declarations and their specifications. Everything else is kept as an
//! opaque declaration that may still contain nested constant declarations
//! (e.g. `const` blocks inside function bodies).

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct File {
    /// Name from the `package` clause; empty when the clause is missing.
    pub package: String,
    pub decls: Vec<Decl>,
}

/// A declaration node.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// `const X T = v` or `const ( ... )`.
    Const(ConstDecl),
    /// A function or method, with any declarations found in its body.
    Func(FuncDecl),
    /// `import`, `type` or `var`, with any declarations nested inside.
    Other(OtherDecl),
}

/// A constant group.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    /// Comment group directly above the `const` keyword.
    pub doc: Option<CommentGroup>,
    /// Whether the specs were written inside parentheses.
    pub grouped: bool,
    pub specs: Vec<ConstSpec>,
}

/// One entry of a constant group.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstSpec {
    /// Comment group directly above the spec. Only set for grouped specs;
    /// an ungrouped spec's doc lives on its [`ConstDecl`].
    pub doc: Option<CommentGroup>,
    pub names: Vec<String>,
    pub ty: Option<TypeExpr>,
    pub values: Vec<Expr>,
    /// 1-based line of the first token.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    /// `None` for function literals.
    pub name: Option<String>,
    pub body: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OtherDecl {
    pub keyword: DeclKeyword,
    pub nested: Vec<Decl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKeyword {
    Import,
    Type,
    Var,
}

/// The declared type of a spec.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A bare identifier, e.g. `eventType`.
    Name(String),
    /// `pkg.Name`.
    Qualified { package: String, name: String },
    /// Anything else (`[]byte`, `map[string]int`, ...), as source text.
    Compound(String),
}

impl TypeExpr {
    /// The identifier when the type is a bare, unqualified name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// An initializer expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Lit(BasicLit),
    Ident(String),
    /// Anything built from more than one token, as source text.
    Compound(String),
}

/// A literal token, kept exactly as written.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicLit {
    pub kind: LitKind,
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    String,
    RawString,
    Char,
    Number,
}

/// Consecutive comments attached to a node, raw text including markers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentGroup {
    pub list: Vec<String>,
}

impl CommentGroup {
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
