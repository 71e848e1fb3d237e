//! Literal token text to runtime string value.
//!
//! Only tokens that denote a fixed string produce a value. Templates with
//! substitutions and interpolating server strings yield `None`.

use crate::core::tokenizer::{Heredoc, Token, TokenKind};

enum Escape {
    Char(char),
    /// A single raw byte (PHP `\xHH` and octal escapes).
    Byte(u8),
    /// Escape sequence produces nothing (line continuation).
    Drop,
    /// Not an escape: the backslash is kept as written.
    Literal,
}

/// Text of a client family literal token.
pub fn js_literal(token: &Token) -> Option<String> {
    match token.kind {
        TokenKind::StringLiteral => Some(unescape(strip_delimiters(&token.lexeme)?, js_escape)),
        TokenKind::TemplateLiteral => {
            let body = strip_delimiters(&token.lexeme)?;
            if has_substitution(body) {
                return None;
            }
            let body = body.replace("\r\n", "\n").replace('\r', "\n");
            Some(unescape(&body, js_escape))
        }
        _ => None,
    }
}

/// Text of a server family literal token.
pub fn php_literal(token: &Token) -> Option<String> {
    if token.kind != TokenKind::StringLiteral {
        return None;
    }
    let lexeme = token.lexeme.as_str();

    if lexeme.starts_with("<<<") {
        let heredoc = Heredoc::parse(lexeme)?;
        return Some(if heredoc.nowdoc {
            heredoc.body
        } else {
            unescape(&heredoc.body, |s| php_escape(s, true))
        });
    }

    let body = strip_delimiters(lexeme)?;
    if lexeme.starts_with('\'') {
        Some(unescape(body, php_single_escape))
    } else {
        Some(unescape(body, |s| php_escape(s, false)))
    }
}

fn strip_delimiters(lexeme: &str) -> Option<&str> {
    if lexeme.len() < 2 {
        return None;
    }
    lexeme.get(1..lexeme.len() - 1)
}

fn has_substitution(body: &str) -> bool {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'$' if bytes.get(i + 1) == Some(&b'{') => return true,
            _ => i += 1,
        }
    }
    false
}

/// Raw byte escapes may combine into multi-byte UTF-8 sequences, so the
/// value is assembled as bytes and decoded once at the end.
fn unescape(body: &str, escape: impl Fn(&str) -> (Escape, usize)) -> String {
    let mut out = Vec::with_capacity(body.len());
    let mut rest = body;
    while let Some(pos) = rest.find('\\') {
        out.extend_from_slice(rest[..pos].as_bytes());
        let after = &rest[pos + 1..];
        let (escaped, consumed) = escape(after);
        match escaped {
            Escape::Char(c) => out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
            Escape::Byte(b) => out.push(b),
            Escape::Drop => {}
            Escape::Literal => out.push(b'\\'),
        }
        rest = &after[consumed..];
    }
    out.extend_from_slice(rest.as_bytes());
    match String::from_utf8(out) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// `after` is the text following a backslash.
fn js_escape(after: &str) -> (Escape, usize) {
    let Some(e) = after.chars().next() else {
        return (Escape::Literal, 0);
    };
    let tail = &after[e.len_utf8()..];

    let simple = match e {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{C}',
        'v' => '\u{B}',
        '0' if !tail.starts_with(|c: char| c.is_ascii_digit()) => '\0',
        '\r' => {
            let len = if tail.starts_with('\n') { 2 } else { 1 };
            return (Escape::Drop, len);
        }
        '\n' | '\u{2028}' | '\u{2029}' => return (Escape::Drop, e.len_utf8()),
        'x' => {
            return match hex_prefix(tail, 2, 2).and_then(|(v, len)| Some((char::from_u32(v)?, len))) {
                Some((c, len)) => (Escape::Char(c), 1 + len),
                None => (Escape::Char('x'), 1),
            };
        }
        'u' => {
            return match unicode_escape(tail) {
                Some((c, len)) => (Escape::Char(c), 1 + len),
                None => (Escape::Char('u'), 1),
            };
        }
        other => other,
    };
    (Escape::Char(simple), e.len_utf8())
}

/// `\uXXXX` (joining surrogate pairs) or `\u{X...}`; `s` follows the `u`.
fn unicode_escape(s: &str) -> Option<(char, usize)> {
    if let Some(inner) = s.strip_prefix('{') {
        let (value, len) = hex_prefix(inner, 1, 6)?;
        if !inner[len..].starts_with('}') {
            return None;
        }
        return Some((
            char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER),
            len + 2,
        ));
    }

    let (high, _) = hex_prefix(s, 4, 4)?;
    if (0xD800..0xDC00).contains(&high)
        && let Some(low_src) = s[4..].strip_prefix("\\u")
        && let Some((low, _)) = hex_prefix(low_src, 4, 4)
        && (0xDC00..0xE000).contains(&low)
    {
        let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        return Some((char::from_u32(combined)?, 10));
    }
    Some((
        char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER),
        4,
    ))
}

fn php_single_escape(after: &str) -> (Escape, usize) {
    match after.chars().next() {
        Some('\\') => (Escape::Char('\\'), 1),
        Some('\'') => (Escape::Char('\''), 1),
        _ => (Escape::Literal, 0),
    }
}

/// Double-quoted and heredoc escapes. Heredocs keep `\"` as written.
fn php_escape(after: &str, heredoc: bool) -> (Escape, usize) {
    let Some(e) = after.chars().next() else {
        return (Escape::Literal, 0);
    };
    let tail = &after[e.len_utf8()..];

    let simple = match e {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'v' => '\u{B}',
        'e' => '\u{1B}',
        'f' => '\u{C}',
        '\\' => '\\',
        '$' => '$',
        '"' if !heredoc => '"',
        '0'..='7' => {
            let len = after
                .bytes()
                .take(3)
                .take_while(|b| (b'0'..=b'7').contains(b))
                .count();
            return match u32::from_str_radix(&after[..len], 8) {
                Ok(value) => (Escape::Byte((value & 0xFF) as u8), len),
                Err(_) => (Escape::Literal, 0),
            };
        }
        'x' => {
            return match hex_prefix(tail, 1, 2) {
                Some((value, len)) => (Escape::Byte(value as u8), 1 + len),
                None => (Escape::Literal, 0),
            };
        }
        'u' => {
            return match tail.strip_prefix('{').and_then(|inner| {
                let (value, len) = hex_prefix(inner, 1, 6)?;
                inner[len..].starts_with('}').then_some((value, len))
            }) {
                Some((value, len)) => (
                    Escape::Char(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)),
                    len + 3,
                ),
                None => (Escape::Literal, 0),
            };
        }
        _ => return (Escape::Literal, 0),
    };
    (Escape::Char(simple), 1)
}

/// Value and length of between `min` and `max` leading hex digits.
fn hex_prefix(s: &str, min: usize, max: usize) -> Option<(u32, usize)> {
    let len = s
        .bytes()
        .take(max)
        .take_while(u8::is_ascii_hexdigit)
        .count();
    if len < min {
        return None;
    }
    u32::from_str_radix(&s[..len], 16)
        .ok()
        .map(|value| (value, len))
}
