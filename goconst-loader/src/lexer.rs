//! Go tokenizer built on logos.
//!
//! Produces every token including comments, and performs Go's automatic
//! semicolon insertion so the parser can treat line ends as statement ends.

use logos::{Lexer, Logos};

use crate::error::ParseError;

/// Token kinds. Keywords the parser never looks at are lexed as [`TokenKind::Ident`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // === Trivia ===
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // === Keywords ===
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("const")]
    Const,
    #[token("var")]
    Var,
    #[token("type")]
    Type,
    #[token("func")]
    Func,
    #[token("struct")]
    Struct,
    #[token("interface")]
    Interface,
    /// `break`, `continue`, `fallthrough`, `return`.
    #[token("break")]
    #[token("continue")]
    #[token("fallthrough")]
    #[token("return")]
    Terminator,

    // === Identifiers and literals ===
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Ident,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"`[^`]*`")]
    RawString,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    Char,

    #[regex(r"[0-9]([0-9a-zA-Z_.]|[eEpP][+-])*")]
    #[regex(r"\.[0-9]([0-9a-zA-Z_]|[eEpP][+-])*")]
    Number,

    // === Punctuation ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("=")]
    Assign,
    #[token("++")]
    #[token("--")]
    IncDec,
    /// Any other operator. `/` only appears alone or as `/=` so it never
    /// swallows the start of a comment.
    #[regex(r"[+\-*%&|^<>!:~=]+", priority = 1)]
    #[regex(r"/=?", priority = 1)]
    Operator,
}

/// Consume the rest of a `/* ... */` comment; unterminated comments are errors.
fn block_comment(lex: &mut Lexer<TokenKind>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::RawString | TokenKind::Char | TokenKind::Number
        )
    }

    /// A newline after one of these ends the statement.
    fn ends_statement(self) -> bool {
        self.is_literal()
            || matches!(
                self,
                TokenKind::Ident
                    | TokenKind::Terminator
                    | TokenKind::IncDec
                    | TokenKind::RParen
                    | TokenKind::RBracket
                    | TokenKind::RBrace
            )
    }
}

/// A token with its byte span and 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub end_line: usize,
}

impl Token {
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }
}

/// Byte offset → line lookup.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(src: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(src.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex { starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset)
    }
}

/// Tokenize `src`, inserting implicit semicolons at line ends.
pub fn tokenize(src: &str) -> Result<Vec<Token>, ParseError> {
    let lines = LineIndex::new(src);
    let mut out = Vec::new();
    let mut pending_semi: Option<(usize, usize)> = None;

    let mut lex = TokenKind::lexer(src);
    while let Some(result) = lex.next() {
        let span = lex.span();
        let line = lines.line_of(span.start);
        let kind = result.map_err(|()| ParseError {
            line,
            message: format!("unexpected input {:?}", lex.slice()),
        })?;
        let end_line = lines.line_of(span.end.saturating_sub(1).max(span.start));

        if let Some((at, semi_line)) = pending_semi {
            if line > semi_line {
                out.push(semicolon(at, semi_line));
                pending_semi = None;
            }
        }

        if !kind.is_comment() {
            pending_semi = kind.ends_statement().then_some((span.end, end_line));
        }
        out.push(Token {
            kind,
            start: span.start,
            end: span.end,
            line,
            end_line,
        });
    }

    if let Some((at, semi_line)) = pending_semi {
        out.push(semicolon(at, semi_line));
    }
    Ok(out)
}

fn semicolon(at: usize, line: usize) -> Token {
    Token {
        kind: TokenKind::Semicolon,
        start: at,
        end: at,
        line,
        end_line: line,
    }
}
