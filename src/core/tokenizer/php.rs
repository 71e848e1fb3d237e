//! Server family tokenizer (PHP).
//!
//! Starts in markup mode: everything outside `<?php ... ?>`, `<?= ... ?>` and
//! `<? ... ?>` is emitted as markup. There is no pattern literal ambiguity in
//! this family.

use std::sync::LazyLock;

use regex::Regex;

use super::{
    CharClasses, Cursor, LexicalDiagnostic, LexicalProblem, Token, TokenKind, Tokenized,
    TokenizerOptions, first_char_len, match_punctuator,
};

/// Matched case-insensitively.
const KEYWORDS: &[&str] = &[
    "abstract", "and", "array", "as", "break", "callable", "case", "catch", "class", "clone",
    "const", "continue", "declare", "default", "die", "do", "echo", "else", "elseif", "empty",
    "enddeclare", "endfor", "endforeach", "endif", "endswitch", "endwhile", "eval", "exit",
    "extends", "final", "finally", "fn", "for", "foreach", "function", "global", "goto", "if",
    "implements", "include", "include_once", "instanceof", "insteadof", "interface", "isset",
    "list", "match", "namespace", "new", "or", "print", "private", "protected", "public",
    "readonly", "require", "require_once", "return", "static", "switch", "throw", "trait", "try",
    "unset", "use", "var", "while", "xor", "yield",
];

/// Longest first.
const PUNCTUATORS: &[&str] = &[
    "<=>", "**=", "...", "<<=", ">>=", "===", "!==", "??=", "?->", "->", "=>", "::", "==", "!=",
    "<>", "<=", ">=", "&&", "||", "??", "++", "--", "+=", "-=", "*=", "/=", ".=", "%=", "&=", "|=",
    "^=", "<<", ">>", "**", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-", "*", "/",
    "%", "&", "|", "^", "!", "~", "?", ":", "=", ".", "@", "\\", "$",
];

static OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^<\?(?:php|=)?").unwrap());

static HEREDOC_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<<<[ \t]*(["']?)([A-Za-z_][A-Za-z0-9_]*)(["']?)\r?\n"#).unwrap()
});

struct PhpRules {
    single_quote: Regex,
    double_quote: Regex,
    backtick: Regex,
    number: Regex,
    block_comment: Regex,
}

impl PhpRules {
    fn build(classes: &CharClasses) -> Self {
        Self {
            single_quote: classes.rule(r#"(?s)^'(?:\\.|[^'\\])*'"#),
            double_quote: classes.rule(r#"(?s)^"(?:\\.|[^"\\])*""#),
            backtick: classes.rule(r#"(?s)^`(?:\\.|[^`\\])*`"#),
            number: classes.rule(
                r"(?i)^(?:0x[0-9a-f_]+|0b[01_]+|0o?[0-7_]+|(?:\d[\d_]*(?:\.[\d_]*)?|\.\d[\d_]*)(?:e[+-]?\d+)?)",
            ),
            block_comment: classes.rule(r"(?s)^/\*.*?\*/"),
        }
    }

    fn get(unicode: bool) -> &'static PhpRules {
        static UNICODE: LazyLock<PhpRules> =
            LazyLock::new(|| PhpRules::build(CharClasses::get(true)));
        static ASCII: LazyLock<PhpRules> =
            LazyLock::new(|| PhpRules::build(CharClasses::get(false)));
        if unicode { &UNICODE } else { &ASCII }
    }
}

/// Tokenizer over one PHP buffer. Consumed by iteration.
pub struct PhpTokenizer<'a> {
    cursor: Cursor<'a>,
    options: TokenizerOptions,
    rules: &'static PhpRules,
    in_code: bool,
    diagnostics: Vec<LexicalDiagnostic>,
}

impl<'a> PhpTokenizer<'a> {
    pub fn new(src: &'a str, options: TokenizerOptions) -> Self {
        Self {
            cursor: Cursor::new(src, CharClasses::get(options.unicode)),
            options,
            rules: PhpRules::get(options.unicode),
            in_code: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[LexicalDiagnostic] {
        &self.diagnostics
    }

    pub fn tokenize(mut self) -> Tokenized {
        let tokens = self.by_ref().collect();
        Tokenized {
            tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn lex_markup(&mut self, rest: &'a str) -> Token {
        if let Some(m) = OPEN_TAG.find(rest) {
            self.in_code = true;
            return self.emit(TokenKind::Markup, m.end());
        }
        let len = rest.find("<?").unwrap_or(rest.len());
        self.emit(TokenKind::Markup, len)
    }

    fn lex_code(&mut self, rest: &'a str) -> Option<Token> {
        let first = rest.chars().next()?;
        let rules = self.rules;
        let classes = self.cursor.classes();

        if rest.starts_with("?>") {
            self.in_code = false;
            // The close tag swallows a single directly following newline.
            let len = if rest[2..].starts_with("\r\n") {
                4
            } else if rest[2..].starts_with('\n') {
                3
            } else {
                2
            };
            return Some(self.emit(TokenKind::Markup, len));
        }

        if rest.starts_with("#[") {
            return Some(self.emit(TokenKind::Punctuator, 2));
        }

        if first == '#' || rest.starts_with("//") {
            let len = line_comment_len(rest, classes);
            return self.trivia(TokenKind::Comment, len, self.options.emit_comments);
        }

        if rest.starts_with("/*") {
            let len = match rules.block_comment.find(rest) {
                Some(m) => m.end(),
                None => {
                    self.report(LexicalProblem::UnterminatedComment);
                    rest.len()
                }
            };
            return self.comment(len);
        }

        match first {
            '\'' => {
                return Some(match rules.single_quote.find(rest) {
                    Some(m) => self.emit(TokenKind::StringLiteral, m.end()),
                    None => self.unterminated(),
                });
            }
            '"' => {
                return Some(match rules.double_quote.find(rest) {
                    Some(m) => {
                        let body = &rest[1..m.end() - 1];
                        self.emit(string_kind(body), m.end())
                    }
                    None => self.unterminated(),
                });
            }
            '`' => {
                return Some(match rules.backtick.find(rest) {
                    Some(m) => self.emit(TokenKind::TemplateLiteral, m.end()),
                    None => self.unterminated(),
                });
            }
            _ => {}
        }

        if rest.starts_with("<<<")
            && let Some(token) = self.lex_heredoc(rest)
        {
            return Some(token);
        }

        if let Some(m) = classes.line_break_run.find(rest) {
            return Some(self.emit(TokenKind::LineTerminator, m.end()));
        }

        if let Some(m) = classes.whitespace.find(rest) {
            return self.trivia(TokenKind::Whitespace, m.end(), self.options.emit_whitespace);
        }

        if first == '$' {
            let sigils = rest.len() - rest.trim_start_matches('$').len();
            return Some(match classes.identifier.find(&rest[sigils..]) {
                Some(m) => self.emit(TokenKind::Variable, sigils + m.end()),
                None => self.emit(TokenKind::Punctuator, 1),
            });
        }

        if (first.is_ascii_digit()
            || (first == '.' && rest[1..].starts_with(|c: char| c.is_ascii_digit())))
            && let Some(m) = rules.number.find(rest)
        {
            return Some(self.emit(TokenKind::NumericLiteral, m.end()));
        }

        if let Some(m) = classes.identifier.find(rest) {
            let word = m.as_str();
            let kind = if KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word)) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            return Some(self.emit(kind, m.end()));
        }

        if let Some(punct) = match_punctuator(rest, PUNCTUATORS) {
            return Some(self.emit(TokenKind::Punctuator, punct.len()));
        }

        self.report(LexicalProblem::UnrecognizedCharacter);
        Some(self.emit(TokenKind::Garbage, first_char_len(rest)))
    }

    fn lex_heredoc(&mut self, rest: &'a str) -> Option<Token> {
        let header = HEREDOC_HEADER.captures(rest)?;
        let (open, label, close) = (&header[1], &header[2], &header[3]);
        if open != close {
            return None;
        }
        let body_start = header.get(0).map_or(0, |m| m.end());

        let Some((close_line, end)) = find_closing_label(rest, body_start, label) else {
            return Some(self.unterminated());
        };

        let kind = if open == "'" {
            TokenKind::StringLiteral
        } else {
            string_kind(&rest[body_start..close_line])
        };
        Some(self.emit(kind, end))
    }

    fn emit(&mut self, kind: TokenKind, len: usize) -> Token {
        let (lexeme, line, column) = self.cursor.bump(len);
        Token {
            kind,
            lexeme: lexeme.to_string(),
            line,
            column,
        }
    }

    fn trivia(&mut self, kind: TokenKind, len: usize, keep: bool) -> Option<Token> {
        if keep {
            Some(self.emit(kind, len))
        } else {
            self.cursor.bump(len);
            None
        }
    }

    fn comment(&mut self, len: usize) -> Option<Token> {
        if self.options.emit_comments {
            return Some(self.emit(TokenKind::Comment, len));
        }
        let spans_lines = self
            .cursor
            .classes()
            .last_break(&self.cursor.rest()[..len])
            .is_some();
        self.trivia(TokenKind::LineTerminator, len, spans_lines)
    }

    fn unterminated(&mut self) -> Token {
        self.report(LexicalProblem::UnterminatedString);
        let len = self.cursor.rest().len();
        self.emit(TokenKind::Garbage, len)
    }

    fn report(&mut self, problem: LexicalProblem) {
        let diagnostic = self.cursor.diagnostic(problem);
        tracing::trace!(%diagnostic, "lexical problem");
        self.diagnostics.push(diagnostic);
    }
}

impl Iterator for PhpTokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while !self.cursor.is_eof() {
            let rest = self.cursor.rest();
            if !self.in_code {
                return Some(self.lex_markup(rest));
            }
            if let Some(token) = self.lex_code(rest) {
                return Some(token);
            }
        }
        None
    }
}

/// `#` and `//` comments end at a line break or right before a close tag.
fn line_comment_len(rest: &str, classes: &CharClasses) -> usize {
    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if classes.is_line_break(c) {
            return i;
        }
        if c == '?' && matches!(chars.peek(), Some((_, '>'))) {
            return i;
        }
    }
    rest.len()
}

/// Interpolating strings are templates, everything else a plain literal.
fn string_kind(body: &str) -> TokenKind {
    if has_interpolation(body) {
        TokenKind::TemplateLiteral
    } else {
        TokenKind::StringLiteral
    }
}

/// True when a double-quoted or heredoc body contains `$name`, `${` or `{$`.
pub(crate) fn has_interpolation(body: &str) -> bool {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'$' => match bytes.get(i + 1) {
                Some(&b) if b == b'{' || b == b'_' || b.is_ascii_alphabetic() || b >= 0x80 => {
                    return true;
                }
                _ => i += 1,
            },
            b'{' if bytes.get(i + 1) == Some(&b'$') => return true,
            _ => i += 1,
        }
    }
    false
}

/// Start of the closing label line and the byte offset right after the label.
fn find_closing_label(src: &str, body_start: usize, label: &str) -> Option<(usize, usize)> {
    let mut line_start = body_start;
    loop {
        let line = &src[line_start..];
        let trimmed = line.trim_start_matches([' ', '\t']);
        if let Some(after) = trimmed.strip_prefix(label)
            && !after.starts_with(|c: char| c.is_alphanumeric() || c == '_')
        {
            return Some((line_start, src.len() - after.len()));
        }
        line_start += line.find('\n')? + 1;
    }
}

/// A heredoc or nowdoc token split into its parts.
#[derive(Debug, PartialEq, Eq)]
pub struct Heredoc {
    pub nowdoc: bool,
    /// Body with the closing label's indentation removed from every line.
    pub body: String,
}

impl Heredoc {
    pub fn parse(lexeme: &str) -> Option<Heredoc> {
        let header = HEREDOC_HEADER.captures(lexeme)?;
        let nowdoc = &header[1] == "'";
        let label = header.get(2)?.as_str();
        let body_start = header.get(0)?.end();
        let (close_line, _) = find_closing_label(lexeme, body_start, label)?;

        let indent_len = lexeme[close_line..].len()
            - lexeme[close_line..].trim_start_matches([' ', '\t']).len();
        let indent = &lexeme[close_line..close_line + indent_len];

        let raw = &lexeme[body_start..close_line];
        let raw = raw
            .strip_suffix("\r\n")
            .or_else(|| raw.strip_suffix('\n'))
            .unwrap_or(raw);

        let body = raw
            .split('\n')
            .map(|line| line.strip_prefix(indent).unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n");

        Some(Heredoc { nowdoc, body })
    }
}
