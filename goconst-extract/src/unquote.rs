//! Go literal unquoting (interpreted strings, raw strings, rune literals).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnquoteError {
    #[error("literal is not quoted")]
    NotQuoted,
    #[error("invalid escape sequence {0}")]
    InvalidEscape(String),
    #[error("unescaped {0:?} inside literal")]
    Unescaped(char),
    #[error("rune literal must hold exactly one character")]
    NotOneRune,
    #[error("literal is not valid UTF-8")]
    InvalidUtf8,
}

/// Interpret the source text of a Go string or rune literal.
///
/// Numeric literals are not quoted and fail with [`UnquoteError::NotQuoted`].
pub fn unquote(raw: &str) -> Result<String, UnquoteError> {
    let mut chars = raw.chars();
    let (Some(open), Some(close)) = (chars.next(), chars.next_back()) else {
        return Err(UnquoteError::NotQuoted);
    };
    if open != close || raw.len() < 2 {
        return Err(UnquoteError::NotQuoted);
    }
    let body = chars.as_str();

    match open {
        '`' => {
            if body.contains('`') {
                return Err(UnquoteError::Unescaped('`'));
            }
            Ok(body.replace('\r', ""))
        }
        '"' => interpret(body, '"'),
        '\'' => {
            let value = interpret(body, '\'')?;
            if value.chars().count() != 1 {
                return Err(UnquoteError::NotOneRune);
            }
            Ok(value)
        }
        _ => Err(UnquoteError::NotQuoted),
    }
}

fn interpret(body: &str, quote: char) -> Result<String, UnquoteError> {
    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c == quote || c == '\n' {
            return Err(UnquoteError::Unescaped(c));
        }
        if c != '\\' {
            push_char(&mut out, c);
            continue;
        }

        let esc = chars
            .next()
            .ok_or_else(|| UnquoteError::InvalidEscape("\\".to_string()))?;
        match esc {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '\\' => out.push(b'\\'),
            '\'' | '"' if esc == quote => push_char(&mut out, esc),
            'x' => {
                let digits = take(&mut chars, 2, esc)?;
                out.push(parse_radix(&digits, 16, esc)? as u8);
            }
            '0'..='7' => {
                let mut digits = esc.to_string();
                digits.push_str(&take(&mut chars, 2, esc)?);
                let value = parse_radix(&digits, 8, esc)?;
                if value > 0xff {
                    return Err(UnquoteError::InvalidEscape(format!("\\{digits}")));
                }
                out.push(value as u8);
            }
            'u' | 'U' => {
                let width = if esc == 'u' { 4 } else { 8 };
                let digits = take(&mut chars, width, esc)?;
                let code = parse_radix(&digits, 16, esc)?;
                let c = char::from_u32(code)
                    .ok_or_else(|| UnquoteError::InvalidEscape(format!("\\{esc}{digits}")))?;
                push_char(&mut out, c);
            }
            other => return Err(UnquoteError::InvalidEscape(format!("\\{other}"))),
        }
    }

    String::from_utf8(out).map_err(|_| UnquoteError::InvalidUtf8)
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn take(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    n: usize,
    esc: char,
) -> Result<String, UnquoteError> {
    let digits: String = chars.by_ref().take(n).collect();
    if digits.chars().count() != n {
        return Err(UnquoteError::InvalidEscape(format!("\\{esc}{digits}")));
    }
    Ok(digits)
}

fn parse_radix(digits: &str, radix: u32, esc: char) -> Result<u32, UnquoteError> {
    u32::from_str_radix(digits, radix)
        .map_err(|_| UnquoteError::InvalidEscape(format!("\\{esc}{digits}")))
}
