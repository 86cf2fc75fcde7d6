//! Declaration-level Go parser.
//!
//! Recovers the `package` clause, constant declarations (at any depth) and the
//! outline of every other declaration. Expressions and types are not parsed
//! beyond what classifying a constant spec requires; unknown constructs are
//! skipped with balanced-bracket scanning rather than rejected.

use goconst_core::ast::{
    BasicLit, CommentGroup, ConstDecl, ConstSpec, Decl, DeclKeyword, Expr, File, FuncDecl,
    LitKind, OtherDecl, TypeExpr,
};

use crate::error::ParseError;
use crate::lexer::{tokenize, Token, TokenKind};

/// Parse one Go source file. A leading byte order mark is ignored.
pub fn parse_file(src: &str) -> Result<File, ParseError> {
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);
    let tokens = tokenize(src)?;
    let mut parser = Parser::new(src, tokens);
    Ok(parser.file())
}

// ---------------------------------------------------------------------------
// Comment attachment
// ---------------------------------------------------------------------------

struct OpenGroup {
    list: Vec<String>,
    end_line: usize,
    trailing: bool,
}

/// Split comments from significant tokens and compute, for every significant
/// token, the comment group that leads it.
///
/// A group leads a token when it ends on the line directly above it. A comment
/// that shares a line with the previous token is a trailing comment and never
/// leads anything.
fn attach_comments(src: &str, tokens: Vec<Token>) -> (Vec<Token>, Vec<Option<CommentGroup>>) {
    let mut significant = Vec::with_capacity(tokens.len());
    let mut leads = Vec::with_capacity(tokens.len());
    let mut prev_line: Option<usize> = None;
    let mut open: Option<OpenGroup> = None;
    let mut last_closed: Option<OpenGroup> = None;

    for tok in tokens {
        if tok.kind.is_comment() {
            let text = tok.text(src).to_string();
            match open.as_mut() {
                Some(group) if adjacent(group, tok.line) => {
                    group.list.push(text);
                    group.end_line = tok.end_line;
                }
                _ => {
                    let trailing = open.is_none()
                        && last_closed.is_none()
                        && prev_line == Some(tok.line);
                    if let Some(done) = open.take() {
                        last_closed = Some(done);
                    }
                    open = Some(OpenGroup {
                        list: vec![text],
                        end_line: tok.end_line,
                        trailing,
                    });
                }
            }
            continue;
        }

        let last = open.take().or(last_closed.take());
        let lead = last
            .filter(|g| !g.trailing && g.end_line + 1 == tok.line)
            .map(|g| CommentGroup { list: g.list });
        last_closed = None;
        prev_line = Some(tok.end_line);
        significant.push(tok);
        leads.push(lead);
    }

    (significant, leads)
}

fn adjacent(group: &OpenGroup, line: usize) -> bool {
    if group.trailing {
        line <= group.end_line
    } else {
        line <= group.end_line + 1
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Token>,
    leads: Vec<Option<CommentGroup>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, tokens: Vec<Token>) -> Self {
        let (tokens, leads) = attach_comments(src, tokens);
        Parser {
            src,
            tokens,
            leads,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).copied();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn lead(&self) -> Option<CommentGroup> {
        self.leads.get(self.pos).cloned().flatten()
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn text(&self, tok: Token) -> String {
        tok.text(self.src).to_string()
    }

    fn span_text(&self, toks: &[Token]) -> String {
        match (toks.first(), toks.last()) {
            (Some(first), Some(last)) => self.src[first.start..last.end].to_string(),
            _ => String::new(),
        }
    }

    // --- top level ---

    fn file(&mut self) -> File {
        let mut file = File::default();
        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::Package => {
                    self.bump();
                    if self.peek() == Some(TokenKind::Ident) {
                        if let Some(tok) = self.bump() {
                            file.package = self.text(tok);
                        }
                    }
                }
                TokenKind::Const => file.decls.push(Decl::Const(self.const_decl())),
                TokenKind::Func => file.decls.push(Decl::Func(self.func_decl(false))),
                TokenKind::Import => file.decls.push(Decl::Other(self.other_decl(DeclKeyword::Import))),
                TokenKind::Type => file.decls.push(Decl::Other(self.other_decl(DeclKeyword::Type))),
                TokenKind::Var => file.decls.push(Decl::Other(self.other_decl(DeclKeyword::Var))),
                _ => {
                    self.bump();
                }
            }
        }
        file
    }

    // --- const ---

    fn const_decl(&mut self) -> ConstDecl {
        let doc = self.lead();
        self.bump();

        let mut specs = Vec::new();
        if !self.eat(TokenKind::LParen) {
            specs.push(self.const_spec(None));
            return ConstDecl {
                doc,
                grouped: false,
                specs,
            };
        }

        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::RParen => {
                    self.bump();
                    break;
                }
                TokenKind::Semicolon => {
                    self.bump();
                }
                _ => {
                    let spec_doc = self.lead();
                    specs.push(self.const_spec(spec_doc));
                }
            }
        }
        ConstDecl {
            doc,
            grouped: true,
            specs,
        }
    }

    /// Parse `IdentifierList [ [Type] "=" ExpressionList ]`, stopping before the
    /// terminating `;` or `)`.
    fn const_spec(&mut self, doc: Option<CommentGroup>) -> ConstSpec {
        let start = self.pos;
        let line = self.line();

        let mut names = Vec::new();
        while self.peek() == Some(TokenKind::Ident) {
            if let Some(tok) = self.bump() {
                names.push(self.text(tok));
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        let type_toks = self.scan_until(|k| k == TokenKind::Assign);
        let ty = self.classify_type(&type_toks);

        let mut values = Vec::new();
        if self.eat(TokenKind::Assign) {
            loop {
                let expr = self.scan_until(|k| k == TokenKind::Comma);
                values.push(self.classify_expr(&expr));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        if self.pos == start {
            // Malformed spec: make progress so the group loop terminates.
            self.bump();
        }

        ConstSpec {
            doc,
            names,
            ty,
            values,
            line,
        }
    }

    /// Collect tokens until `stop` matches at nesting depth zero, or a `;` or
    /// unbalanced closer is reached. The stopping token is not consumed.
    fn scan_until(&mut self, stop: impl Fn(TokenKind) -> bool) -> Vec<Token> {
        let mut depth = 0usize;
        let mut out = Vec::new();
        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenKind::Semicolon if depth == 0 => break,
                k if depth == 0 && stop(k) => break,
                _ => {}
            }
            if let Some(tok) = self.bump() {
                out.push(tok);
            }
        }
        out
    }

    fn classify_type(&self, toks: &[Token]) -> Option<TypeExpr> {
        use TokenKind::{Dot, Ident};
        let kinds: Vec<TokenKind> = toks.iter().map(|t| t.kind).collect();
        match kinds.as_slice() {
            [] => None,
            [Ident] => Some(TypeExpr::Name(self.text(toks[0]))),
            [Ident, Dot, Ident] => Some(TypeExpr::Qualified {
                package: self.text(toks[0]),
                name: self.text(toks[2]),
            }),
            _ => Some(TypeExpr::Compound(self.span_text(toks))),
        }
    }

    fn classify_expr(&self, toks: &[Token]) -> Expr {
        match toks {
            [tok] if tok.kind.is_literal() => Expr::Lit(BasicLit {
                kind: match tok.kind {
                    TokenKind::String => LitKind::String,
                    TokenKind::RawString => LitKind::RawString,
                    TokenKind::Char => LitKind::Char,
                    _ => LitKind::Number,
                },
                raw: self.text(*tok),
            }),
            [tok] if tok.kind == TokenKind::Ident => Expr::Ident(self.text(*tok)),
            _ => Expr::Compound(self.span_text(toks)),
        }
    }

    // --- func ---

    /// Parse a function declaration (or literal) and the declarations in its
    /// body. Stops without consuming a `;` or unbalanced closer when the
    /// function has no body.
    fn func_decl(&mut self, literal: bool) -> FuncDecl {
        self.bump();
        let mut name = None;
        if !literal {
            if self.peek() == Some(TokenKind::LParen) {
                self.skip_balanced();
            }
            if self.peek() == Some(TokenKind::Ident) {
                name = self.bump().map(|tok| self.text(tok));
            }
        }

        let mut depth = 0usize;
        let mut prev: Option<TokenKind> = None;
        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::LBrace if depth == 0 => {
                    if matches!(prev, Some(TokenKind::Struct | TokenKind::Interface)) {
                        self.skip_balanced();
                        prev = Some(TokenKind::RBrace);
                        continue;
                    }
                    let body = self.block();
                    return FuncDecl { name, body };
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenKind::Semicolon if depth == 0 => break,
                _ => {}
            }
            prev = Some(kind);
            self.bump();
        }
        FuncDecl {
            name,
            body: Vec::new(),
        }
    }

    /// Walk a `{ ... }` block, collecting nested declarations.
    fn block(&mut self) -> Vec<Decl> {
        let mut decls = Vec::new();
        let mut depth = 0usize;
        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::Const => {
                    decls.push(Decl::Const(self.const_decl()));
                    continue;
                }
                TokenKind::Func => {
                    decls.push(Decl::Func(self.func_decl(true)));
                    continue;
                }
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }
        decls
    }

    // --- import / type / var ---

    fn other_decl(&mut self, keyword: DeclKeyword) -> OtherDecl {
        self.bump();
        let mut nested = Vec::new();
        let mut depth = 0usize;
        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::Func => {
                    nested.push(Decl::Func(self.func_decl(true)));
                    continue;
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::Semicolon if depth == 0 => {
                    self.bump();
                    break;
                }
                _ => {}
            }
            self.bump();
        }
        OtherDecl { keyword, nested }
    }

    /// Skip a bracketed region starting at the current opener.
    fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        while let Some(kind) = self.peek() {
            self.bump();
            match kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ if depth == 0 => return,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consts(file: &File) -> Vec<&ConstDecl> {
        file.decls
            .iter()
            .filter_map(|d| match d {
                Decl::Const(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn package_clause() {
        let file = parse_file("package testpackage\n").unwrap();
        assert_eq!(file.package, "testpackage");
        assert!(file.decls.is_empty());
    }

    #[test]
    fn grouped_specs_with_docs() {
        let src = r#"package p

const (
	// User has been added to the system
	// Indicates that somthing foo
	USER_INVITED eventType = "user_invited"
	// New task has been created on a project
	TASK_CREATED eventType = "task_created"
)
"#;
        let file = parse_file(src).unwrap();
        let decls = consts(&file);
        assert_eq!(decls.len(), 1);
        let decl = decls[0];
        assert!(decl.grouped);
        assert_eq!(decl.specs.len(), 2);

        let first = &decl.specs[0];
        assert_eq!(first.names, vec!["USER_INVITED"]);
        assert_eq!(first.ty, Some(TypeExpr::Name("eventType".into())));
        assert_eq!(
            first.values,
            vec![Expr::Lit(BasicLit {
                kind: LitKind::String,
                raw: "\"user_invited\"".into()
            })]
        );
        assert_eq!(
            first.doc.as_ref().unwrap().list,
            vec![
                "// User has been added to the system",
                "// Indicates that somthing foo"
            ]
        );
        assert_eq!(first.line, 6);
        assert_eq!(decl.specs[1].doc.as_ref().unwrap().list.len(), 1);
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let file = parse_file("\u{feff}package p\n\nconst A role = \"a\"\n").unwrap();
        assert_eq!(file.package, "p");
        assert_eq!(consts(&file)[0].specs[0].names, vec!["A"]);
    }

    #[test]
    fn block_comments_lead_specs() {
        let src = "/*\n Copyright\n*/\npackage p\n\nconst (\n\t/* doc */\n\tA role = \"a\"\n)\n";
        let file = parse_file(src).unwrap();
        assert_eq!(file.package, "p");
        assert_eq!(
            consts(&file)[0].specs[0].doc.as_ref().unwrap().list,
            vec!["/* doc */"]
        );
    }

    #[test]
    fn blank_line_detaches_comment() {
        let src = "package p\nconst (\n\t// floating\n\n\tA role = \"a\"\n)\n";
        let file = parse_file(src).unwrap();
        assert!(consts(&file)[0].specs[0].doc.is_none());
    }

    #[test]
    fn trailing_comment_is_not_a_lead() {
        let src = "package p\nconst (\n\tA role = \"a\" // about A\n\tB role = \"b\"\n)\n";
        let file = parse_file(src).unwrap();
        let specs = &consts(&file)[0].specs;
        assert!(specs[0].doc.is_none());
        assert!(specs[1].doc.is_none());
    }

    #[test]
    fn ungrouped_const_keeps_doc_on_decl() {
        let src = "package p\n\n// Admin role\nconst ADMIN role = \"admin\"\n";
        let file = parse_file(src).unwrap();
        let decl = consts(&file)[0];
        assert!(!decl.grouped);
        assert_eq!(decl.doc.as_ref().unwrap().list, vec!["// Admin role"]);
        assert!(decl.specs[0].doc.is_none());
        assert_eq!(decl.specs[0].names, vec!["ADMIN"]);
    }

    #[test]
    fn type_shapes() {
        let src = r#"package p
const (
	A = 1
	B pkg.Kind = "b"
	C []byte = nil
	D, E role = "d", "e"
)
"#;
        let file = parse_file(src).unwrap();
        let specs = &consts(&file)[0].specs;
        assert_eq!(specs[0].ty, None);
        assert_eq!(
            specs[1].ty,
            Some(TypeExpr::Qualified {
                package: "pkg".into(),
                name: "Kind".into()
            })
        );
        assert_eq!(specs[2].ty, Some(TypeExpr::Compound("[]byte".into())));
        assert_eq!(specs[3].names, vec!["D", "E"]);
        assert_eq!(specs[3].values.len(), 2);
    }

    #[test]
    fn expression_shapes() {
        let src = "package p\nconst (\n\tA role = iota\n\tB role = prefix + \"b\"\n\tC role = 'c'\n\tD role = `d`\n)\n";
        let file = parse_file(src).unwrap();
        let specs = &consts(&file)[0].specs;
        assert_eq!(specs[0].values, vec![Expr::Ident("iota".into())]);
        assert_eq!(specs[1].values, vec![Expr::Compound("prefix + \"b\"".into())]);
        assert!(matches!(&specs[2].values[0], Expr::Lit(l) if l.kind == LitKind::Char));
        assert!(matches!(&specs[3].values[0], Expr::Lit(l) if l.kind == LitKind::RawString));
    }

    #[test]
    fn consts_inside_function_bodies() {
        let src = r#"package p

func (s *Server) Handle() interface{} {
	const (
		// local
		LOCAL role = "local"
	)
	run(func() {
		const INNER role = "inner"
	})
	return nil
}

const AFTER role = "after"
"#;
        let file = parse_file(src).unwrap();
        assert_eq!(file.decls.len(), 2);
        let Decl::Func(func) = &file.decls[0] else {
            panic!("expected func, got {:?}", file.decls[0]);
        };
        assert_eq!(func.name.as_deref(), Some("Handle"));
        assert_eq!(func.body.len(), 2);
        assert!(matches!(&file.decls[1], Decl::Const(c) if c.specs[0].names == ["AFTER"]));
    }

    #[test]
    fn other_declarations_are_skipped_whole() {
        let src = r#"package p

import (
	"fmt"
	"strings"
)

type role string

type server struct {
	name string
	port int
}

var handler = func() {
	const NESTED role = "nested"
}

const X role = "x"
"#;
        let file = parse_file(src).unwrap();
        let kinds: Vec<_> = file
            .decls
            .iter()
            .map(|d| match d {
                Decl::Const(_) => "const",
                Decl::Func(_) => "func",
                Decl::Other(o) => match o.keyword {
                    DeclKeyword::Import => "import",
                    DeclKeyword::Type => "type",
                    DeclKeyword::Var => "var",
                },
            })
            .collect();
        assert_eq!(kinds, vec!["import", "type", "type", "var", "const"]);
        let Decl::Other(var) = &file.decls[3] else { unreachable!() };
        assert_eq!(var.nested.len(), 1);
    }

    #[test]
    fn go_generate_directive_is_part_of_doc() {
        let src = "package p\n\n//go:generate goconst --type role\ntype role string\n\nconst (\n\t//go:noinline\n\tA role = \"a\"\n)\n";
        let file = parse_file(src).unwrap();
        let decl = consts(&file)[0];
        assert_eq!(decl.specs[0].doc.as_ref().unwrap().list, vec!["//go:noinline"]);
    }
}
