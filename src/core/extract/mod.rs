//! Call-site extraction.
//!
//! Walks a token stream looking for the translation markers and captures the
//! first argument when it is a single literal string:
//!
//! - `t("text")`, `pt("text")`: translate / echo-and-translate
//! - `td("text")`, `ptd("text")`: dynamic variants
//!
//! Non-literal arguments (`t(name)`, `t("a" + b)`, interpolated strings) are
//! skipped without a diagnostic: they are not translatable at scan time.

pub mod unescape;

use super::language::{Family, Language, SourceLanguage};
use super::tokenizer::{LexicalDiagnostic, Token, TokenKind, TokenizerOptions};

/// Function names whose first literal argument is a translatable string.
pub const MARKERS: [&str; 4] = ["t", "pt", "td", "ptd"];

/// A literal string argument found at one call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscoveredString {
    pub text: String,
    /// Path relative to the scan root, `/`-separated.
    pub file: String,
    /// Line of the marker name.
    pub line: usize,
    pub family: Family,
}

/// Everything extracted from one file.
#[derive(Debug, Default)]
pub struct FileExtraction {
    pub strings: Vec<DiscoveredString>,
    pub diagnostics: Vec<LexicalDiagnostic>,
}

/// Tokenizes `src` and extracts its call sites.
pub fn extract_source(language: Language, src: &str, file: &str, unicode: bool) -> FileExtraction {
    let options = TokenizerOptions {
        unicode,
        ..TokenizerOptions::default()
    };
    let tokenized = language.tokenize(src, options);
    FileExtraction {
        strings: extract_calls(language, &tokenized.tokens, file),
        diagnostics: tokenized.diagnostics,
    }
}

/// Extracts call sites from an already tokenized buffer. Trivia tokens are
/// ignored, so calls may span lines and contain comments.
pub fn extract_calls(language: Language, tokens: &[Token], file: &str) -> Vec<DiscoveredString> {
    let significant: Vec<&Token> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
    let mut found = Vec::new();

    for (i, token) in significant.iter().enumerate() {
        if token.kind != TokenKind::Identifier || !MARKERS.contains(&token.lexeme.as_str()) {
            continue;
        }
        if i > 0 && language.blocks_call(significant[i - 1]) {
            continue;
        }
        let Some([open, literal, close]) = significant.get(i + 1..i + 4) else {
            continue;
        };
        if !open.is_punct("(") || !(close.is_punct(",") || close.is_punct(")")) {
            continue;
        }
        let Some(text) = language.literal_text(literal) else {
            continue;
        };
        if text.is_empty() {
            continue;
        }

        found.push(DiscoveredString {
            text,
            file: file.to_string(),
            line: token.line,
            family: language.family(),
        });
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::language::{JavaScript, Php};
    use pretty_assertions::assert_eq;

    fn texts(language: Language, src: &str) -> Vec<(String, usize)> {
        extract_source(language, src, "file", true)
            .strings
            .into_iter()
            .map(|s| (s.text, s.line))
            .collect()
    }

    fn js(src: &str) -> Vec<(String, usize)> {
        texts(Language::JavaScript(JavaScript), src)
    }

    fn php(src: &str) -> Vec<(String, usize)> {
        texts(Language::Php(Php), src)
    }

    #[test]
    fn test_all_markers_are_recognized() {
        let found = js("t('a'); pt('b'); td('c', x); ptd(\"d\");");
        let texts: Vec<_> = found.into_iter().map(|(text, _)| text).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_php_byte_escapes_decode_as_utf8() {
        let found = php("<?php t(\"caf\\xC3\\xA9\"); t(\"\\303\\251\");");
        let texts: Vec<_> = found.into_iter().map(|(text, _)| text).collect();
        assert_eq!(texts, vec!["café", "é"]);
    }

    #[test]
    fn test_non_literal_arguments_are_skipped() {
        let found = js("t(name); t('a' + b); t(`x ${y}`); t(); tt('no'); t('');");
        assert!(found.is_empty());
    }

    #[test]
    fn test_member_and_declaration_contexts_are_skipped() {
        let found = js("obj.t('a'); obj?.t('b'); function t(x) {} new t('c'); t('d');");
        assert_eq!(found, vec![("d".to_string(), 1)]);
    }

    #[test]
    fn test_call_spanning_lines_reports_marker_line() {
        let found = js("var x = 1;\nt(\n  // hint\n  'Hello'\n);");
        assert_eq!(found, vec![("Hello".to_string(), 2)]);
    }

    #[test]
    fn test_strings_in_comments_and_patterns_are_ignored() {
        let found = js("// t('no')\n/* t('no') */ var r = /t('no')/; t('yes');");
        assert_eq!(found, vec![("yes".to_string(), 2)]);
    }

    #[test]
    fn test_php_call_sites() {
        let src = "<h1><?php pt('Title'); ?></h1>\n<?php\n$this->t('no');\nself::t('no');\necho t(\"Hi \\\"you\\\"\", $x);\nt(\"Hi $name\");\n";
        assert_eq!(
            php(src),
            vec![("Title".to_string(), 1), ("Hi \"you\"".to_string(), 5)]
        );
    }

    #[test]
    fn test_php_markup_is_not_code() {
        assert!(php("<p>t('not code')</p>").is_empty());
    }

    #[test]
    fn test_family_follows_language() {
        let client = extract_source(Language::JavaScript(JavaScript), "t('a')", "a.js", true);
        let server = extract_source(Language::Php(Php), "<?php t('a');", "a.php", true);
        assert_eq!(client.strings[0].family, Family::Client);
        assert_eq!(server.strings[0].family, Family::Server);
        assert_eq!(server.strings[0].file, "a.php");
    }
}
