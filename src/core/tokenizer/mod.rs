//! Lexical tokenizers for the supported source language families.
//!
//! The tokenizers do not build a syntax tree. They only split a buffer into
//! tokens well enough to tell string literals apart from comments, pattern
//! literals and code, which is all the call-site extractor needs.
//!
//! ## Module Structure
//!
//! - `classes`: character classes for unicode / ASCII mode
//! - `javascript`: client-side tokenizer (with the division / pattern literal hack)
//! - `php`: server-side tokenizer (markup, code, heredocs)

pub mod classes;
mod javascript;
mod php;

use std::fmt;

pub use classes::CharClasses;
pub use javascript::JsTokenizer;
pub use php::{Heredoc, PhpTokenizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    StringLiteral,
    /// Template / interpolated string. Only a literal when it has no substitutions.
    TemplateLiteral,
    NumericLiteral,
    Punctuator,
    Comment,
    Whitespace,
    LineTerminator,
    /// Regular expression literal (`/ab+c/gi`).
    Pattern,
    /// Server family `$variable`.
    Variable,
    /// Server family inline markup and open / close tags.
    Markup,
    /// Input that matched no rule, or the remainder of an unterminated construct.
    Garbage,
}

impl TokenKind {
    /// Tokens that carry no meaning for call-site detection.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::LineTerminator
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character, counted in characters.
    pub column: usize,
}

impl Token {
    pub fn is_punct(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.lexeme == punct
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme.eq_ignore_ascii_case(word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    pub emit_whitespace: bool,
    pub emit_comments: bool,
    pub unicode: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            emit_whitespace: false,
            emit_comments: false,
            unicode: true,
        }
    }
}

impl TokenizerOptions {
    /// Emit every token, trivia included.
    pub fn verbose() -> Self {
        Self {
            emit_whitespace: true,
            emit_comments: true,
            unicode: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalProblem {
    UnterminatedString,
    UnterminatedComment,
    BadPattern,
    UnrecognizedCharacter,
}

impl fmt::Display for LexicalProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexicalProblem::UnterminatedString => write!(f, "unterminated string constant"),
            LexicalProblem::UnterminatedComment => write!(f, "unterminated comment"),
            LexicalProblem::BadPattern => write!(f, "bad regular expression literal"),
            LexicalProblem::UnrecognizedCharacter => write!(f, "unrecognized character"),
        }
    }
}

/// A recoverable lexical problem. Tokenization continues after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalDiagnostic {
    pub problem: LexicalProblem,
    pub line: usize,
    pub column: usize,
    /// Short excerpt of the offending input.
    pub excerpt: String,
}

impl fmt::Display for LexicalDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on line {}, column {}: {}",
            self.problem, self.line, self.column, self.excerpt
        )
    }
}

/// Full output of one tokenizer run.
#[derive(Debug, Default)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<LexicalDiagnostic>,
}

/// Maximum number of characters of input quoted in a diagnostic.
const EXCERPT_CHARS: usize = 24;

/// Position-tracking view over the input shared by both tokenizers.
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    classes: &'static CharClasses,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str, classes: &'static CharClasses) -> Self {
        // A leading byte-order mark is not part of the source text.
        let src = src.strip_prefix('\u{FEFF}').unwrap_or(src);
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
            classes,
        }
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub(crate) fn classes(&self) -> &'static CharClasses {
        self.classes
    }

    /// Consumes `len` bytes and returns the lexeme with its start line and column.
    ///
    /// `len` must land on a character boundary and be greater than zero.
    pub(crate) fn bump(&mut self, len: usize) -> (&'a str, usize, usize) {
        debug_assert!(len > 0, "tokenizer must always make progress");
        let lexeme = &self.rest()[..len];
        let start = (self.line, self.column);
        self.pos += len;

        match self.classes.last_break(lexeme) {
            Some((count, end)) => {
                self.line += count;
                self.column = lexeme[end..].chars().count() + 1;
            }
            None => self.column += lexeme.chars().count(),
        }

        (lexeme, start.0, start.1)
    }

    pub(crate) fn diagnostic(&self, problem: LexicalProblem) -> LexicalDiagnostic {
        LexicalDiagnostic {
            problem,
            line: self.line,
            column: self.column,
            excerpt: self.rest().chars().take(EXCERPT_CHARS).collect(),
        }
    }
}

/// Byte length of the first character of `s` (zero for an empty string).
pub(crate) fn first_char_len(s: &str) -> usize {
    s.chars().next().map_or(0, char::len_utf8)
}

/// Longest entry of `table` that `rest` starts with. Tables are sorted longest first.
pub(crate) fn match_punctuator(rest: &str, table: &[&'static str]) -> Option<&'static str> {
    table.iter().copied().find(|p| rest.starts_with(p))
}
