//! Supported source language families.
//!
//! Each family pairs a tokenizer with the rules for reading literal text and
//! recognizing call sites. Dispatch goes through `enum_dispatch` so the tree
//! walker can hold a plain `Language` value per file.

use std::{fmt, path::Path};

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::extract::unescape;
use super::tokenizer::{JsTokenizer, PhpTokenizer, Token, TokenKind, Tokenized, TokenizerOptions};

/// Where a string was found: server side code or client side code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Server,
    Client,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Server => write!(f, "server"),
            Family::Client => write!(f, "client"),
        }
    }
}

#[enum_dispatch]
pub trait SourceLanguage {
    fn family(&self) -> Family;

    /// File extensions (lowercase, without dot) handled by this language.
    fn extensions(&self) -> &'static [&'static str];

    fn tokenize(&self, src: &str, options: TokenizerOptions) -> Tokenized;

    /// Runtime value of a literal token, `None` for anything that is not a
    /// fixed string.
    fn literal_text(&self, token: &Token) -> Option<String>;

    /// Whether `previous` turns a following marker name into something other
    /// than a plain function call (member access, declaration).
    fn blocks_call(&self, previous: &Token) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaScript;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Php;

impl SourceLanguage for JavaScript {
    fn family(&self) -> Family {
        Family::Client
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["js"]
    }

    fn tokenize(&self, src: &str, options: TokenizerOptions) -> Tokenized {
        JsTokenizer::new(src, options).tokenize()
    }

    fn literal_text(&self, token: &Token) -> Option<String> {
        unescape::js_literal(token)
    }

    fn blocks_call(&self, previous: &Token) -> bool {
        match previous.kind {
            TokenKind::Punctuator => matches!(previous.lexeme.as_str(), "." | "?."),
            TokenKind::Keyword => previous.is_keyword("function") || previous.is_keyword("new"),
            _ => false,
        }
    }
}

impl SourceLanguage for Php {
    fn family(&self) -> Family {
        Family::Server
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["php"]
    }

    fn tokenize(&self, src: &str, options: TokenizerOptions) -> Tokenized {
        PhpTokenizer::new(src, options).tokenize()
    }

    fn literal_text(&self, token: &Token) -> Option<String> {
        unescape::php_literal(token)
    }

    fn blocks_call(&self, previous: &Token) -> bool {
        match previous.kind {
            TokenKind::Punctuator => matches!(previous.lexeme.as_str(), "->" | "?->" | "::"),
            TokenKind::Keyword => previous.is_keyword("function") || previous.is_keyword("new"),
            _ => false,
        }
    }
}

#[enum_dispatch(SourceLanguage)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript(JavaScript),
    Php(Php),
}

impl Language {
    pub const ALL: [Language; 2] = [Language::JavaScript(JavaScript), Language::Php(Php)];

    /// Language handling files with this extension (case-insensitive).
    pub fn for_extension(extension: &str) -> Option<Language> {
        Self::ALL.into_iter().find(|language| {
            language
                .extensions()
                .iter()
                .any(|ext| ext.eq_ignore_ascii_case(extension))
        })
    }

    pub fn for_path(path: &Path) -> Option<Language> {
        Self::for_extension(path.extension()?.to_str()?)
    }
}
