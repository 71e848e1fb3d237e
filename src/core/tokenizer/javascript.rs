//! Client family tokenizer (JavaScript).
//!
//! `/` is ambiguous between division and the start of a pattern literal. The
//! tokenizer keeps a `div_mode` flag that is set after anything producing a
//! value (identifiers, literals, closing `)` / `]`) and cleared after
//! operators, opening punctuators, keywords and line terminators.

use std::sync::LazyLock;

use regex::Regex;

use super::{
    CharClasses, Cursor, LexicalDiagnostic, LexicalProblem, Token, TokenKind, Tokenized,
    TokenizerOptions, first_char_len, match_punctuator,
};

const KEYWORDS: &[&str] = &[
    "abstract", "await", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "debugger", "default", "delete", "do", "double", "else", "enum", "export",
    "extends", "false", "final", "finally", "float", "for", "function", "goto", "if",
    "implements", "import", "in", "instanceof", "int", "interface", "let", "long", "native",
    "new", "null", "package", "private", "protected", "public", "return", "short", "static",
    "super", "switch", "synchronized", "this", "throw", "throws", "transient", "true", "try",
    "typeof", "var", "void", "volatile", "while", "with", "yield",
];

/// Longest first. `/` and `/=` are handled by the pattern literal logic.
const PUNCTUATORS: &[&str] = &[
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "%=", "&=", "|=",
    "^=", "<<", ">>", "**", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-", "*", "%",
    "&", "|", "^", "!", "~", "?", ":", "=", ".", "@", "#",
];

struct JsRules {
    double_quote: Regex,
    single_quote: Regex,
    pattern: Regex,
    number: Regex,
    line_comment: Regex,
    block_comment: Regex,
}

impl JsRules {
    fn build(classes: &CharClasses) -> Self {
        Self {
            double_quote: classes.rule(r#"(?s)^"(?:\\(?:\r\n|.)|[^"\\{BREAKS}])*""#),
            single_quote: classes.rule(r#"(?s)^'(?:\\(?:\r\n|.)|[^'\\{BREAKS}])*'"#),
            pattern: classes.rule(
                r"^/(?:\\[^{BREAKS}]|\[(?:\\[^{BREAKS}]|[^\]\\{BREAKS}])*\]|[^/\\\[{BREAKS}])+/[A-Za-z]*",
            ),
            number: classes.rule(
                r"(?i)^(?:0x[0-9a-f_]+|0b[01_]+|0o[0-7_]+|(?:\d[\d_]*(?:\.[\d_]*)?|\.\d[\d_]*)(?:e[+-]?\d+)?)n?",
            ),
            line_comment: classes.rule(r"^//[^{BREAKS}]*"),
            block_comment: classes.rule(r"(?s)^/\*.*?\*/"),
        }
    }

    fn get(unicode: bool) -> &'static JsRules {
        static UNICODE: LazyLock<JsRules> = LazyLock::new(|| JsRules::build(CharClasses::get(true)));
        static ASCII: LazyLock<JsRules> = LazyLock::new(|| JsRules::build(CharClasses::get(false)));
        if unicode { &UNICODE } else { &ASCII }
    }
}

/// Tokenizer over one JavaScript buffer. Consumed by iteration.
pub struct JsTokenizer<'a> {
    cursor: Cursor<'a>,
    options: TokenizerOptions,
    rules: &'static JsRules,
    div_mode: bool,
    diagnostics: Vec<LexicalDiagnostic>,
}

impl<'a> JsTokenizer<'a> {
    pub fn new(src: &'a str, options: TokenizerOptions) -> Self {
        Self {
            cursor: Cursor::new(src, CharClasses::get(options.unicode)),
            options,
            rules: JsRules::get(options.unicode),
            div_mode: false,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics collected so far.
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

    fn lex_one(&mut self) -> Option<Token> {
        let rest = self.cursor.rest();
        let first = rest.chars().next()?;
        let rules = self.rules;

        match first {
            '"' | '\'' => {
                let rule = if first == '"' {
                    &rules.double_quote
                } else {
                    &rules.single_quote
                };
                self.div_mode = true;
                match rule.find(rest) {
                    Some(m) => Some(self.emit(TokenKind::StringLiteral, m.end())),
                    None => Some(self.unterminated(LexicalProblem::UnterminatedString)),
                }
            }
            '`' => {
                self.div_mode = true;
                match scan_template(rest) {
                    Some(len) => Some(self.emit(TokenKind::TemplateLiteral, len)),
                    None => Some(self.unterminated(LexicalProblem::UnterminatedString)),
                }
            }
            '/' => self.lex_slash(rest),
            _ => self.lex_other(rest, first),
        }
    }

    fn lex_slash(&mut self, rest: &'a str) -> Option<Token> {
        let rules = self.rules;

        if rest.starts_with("//") {
            let len = rules.line_comment.find(rest).map_or(rest.len(), |m| m.end());
            return self.comment(len);
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

        if !self.div_mode {
            if let Some(m) = rules.pattern.find(rest) {
                self.div_mode = true;
                return Some(self.emit(TokenKind::Pattern, m.end()));
            }
            self.report(LexicalProblem::BadPattern);
            return Some(self.emit(TokenKind::Punctuator, 1));
        }

        self.div_mode = false;
        let len = if rest.starts_with("/=") { 2 } else { 1 };
        Some(self.emit(TokenKind::Punctuator, len))
    }

    fn lex_other(&mut self, rest: &'a str, first: char) -> Option<Token> {
        let classes = self.cursor.classes();

        if let Some(m) = classes.line_break_run.find(rest) {
            self.div_mode = false;
            return Some(self.emit(TokenKind::LineTerminator, m.end()));
        }

        if let Some(m) = classes.whitespace.find(rest) {
            return self.trivia(TokenKind::Whitespace, m.end(), self.options.emit_whitespace);
        }

        if starts_number(rest, first)
            && let Some(m) = self.rules.number.find(rest)
        {
            self.div_mode = true;
            return Some(self.emit(TokenKind::NumericLiteral, m.end()));
        }

        if let Some(m) = classes.identifier.find(rest) {
            let kind = if KEYWORDS.contains(&m.as_str()) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            self.div_mode = kind == TokenKind::Identifier;
            return Some(self.emit(kind, m.end()));
        }

        if let Some(punct) = match_punctuator(rest, PUNCTUATORS) {
            // `a?.5:1` is a conditional, not optional chaining
            let len = if punct == "?." && rest[2..].starts_with(|c: char| c.is_ascii_digit()) {
                1
            } else {
                punct.len()
            };
            self.div_mode = matches!(punct, ")" | "]");
            return Some(self.emit(TokenKind::Punctuator, len));
        }

        self.report(LexicalProblem::UnrecognizedCharacter);
        Some(self.emit(TokenKind::Garbage, first_char_len(rest)))
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

    /// Comments are dropped unless requested, but a dropped comment spanning
    /// lines still yields a line terminator.
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

    fn unterminated(&mut self, problem: LexicalProblem) -> Token {
        self.report(problem);
        let len = self.cursor.rest().len();
        self.emit(TokenKind::Garbage, len)
    }

    fn report(&mut self, problem: LexicalProblem) {
        let diagnostic = self.cursor.diagnostic(problem);
        tracing::trace!(%diagnostic, "lexical problem");
        self.diagnostics.push(diagnostic);
    }
}

impl Iterator for JsTokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while !self.cursor.is_eof() {
            if let Some(token) = self.lex_one() {
                return Some(token);
            }
        }
        None
    }
}

fn starts_number(rest: &str, first: char) -> bool {
    first.is_ascii_digit()
        || (first == '.' && rest[1..].starts_with(|c: char| c.is_ascii_digit()))
}

/// Byte length of the template literal at the start of `src`, including any
/// `${...}` substitutions. `None` when the template is not closed.
fn scan_template(src: &str) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return Some(i + 1),
            b'$' if bytes.get(i + 1) == Some(&b'{') => i = scan_substitution(src, i + 2)?,
            _ => i += 1,
        }
    }
    None
}

/// Index right after the `}` closing a substitution that starts at `i`.
fn scan_substitution(src: &str, mut i: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut depth = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some(i + 1),
            b'}' => depth -= 1,
            b'`' => {
                i += scan_template(&src[i..])?;
                continue;
            }
            quote @ (b'"' | b'\'') => {
                i = skip_quoted(bytes, i, quote)?;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> Option<usize> {
    i += 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}
