//! Character classes shared by the tokenizers.
//!
//! Unicode mode widens identifier, whitespace and line-break classes to their
//! unicode categories; ASCII mode keeps them to the 7-bit range (plus the
//! non-breaking space). Both variants are built from the same templates so
//! the tokenizers never branch on the mode themselves.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder substituted with the line-break characters of the active mode.
const BREAKS: &str = "{BREAKS}";

pub struct CharClasses {
    pub unicode: bool,
    /// Identifier (JS `IdentifierName`, also used for PHP labels).
    pub identifier: Regex,
    /// A run of non-breaking whitespace.
    pub whitespace: Regex,
    /// A run of line-break characters.
    pub line_break_run: Regex,
    /// Single line-break sequences, unanchored, used for position tracking.
    line_breaks: Regex,
    /// Line-break characters, ready to be placed inside a character class.
    break_chars: &'static str,
}

static UNICODE: LazyLock<CharClasses> = LazyLock::new(|| CharClasses::build(true));
static ASCII: LazyLock<CharClasses> = LazyLock::new(|| CharClasses::build(false));

impl CharClasses {
    pub fn get(unicode: bool) -> &'static CharClasses {
        if unicode { &UNICODE } else { &ASCII }
    }

    fn build(unicode: bool) -> Self {
        let (identifier, whitespace, break_chars, line_breaks) = if unicode {
            (
                r"^(?:\\u[0-9A-Fa-f]{4}|[$_\p{L}\p{Nl}])(?:\\u[0-9A-Fa-f]{4}|[$_\p{L}\p{N}\p{Mn}\p{Mc}\p{Pc}\x{200C}\x{200D}])*",
                r"^[\x20\t\x0B\x0C\xA0\x{FEFF}\p{Zs}]+",
                r"\r\n\p{Zl}\p{Zp}",
                r"\r\n|[\r\n\p{Zl}\p{Zp}]",
            )
        } else {
            (
                r"^[$_A-Za-z][$_A-Za-z0-9]*",
                r"^[\x20\t\x0B\x0C\xA0]+",
                r"\r\n",
                r"\r\n|\r|\n",
            )
        };

        Self {
            unicode,
            identifier: compile(identifier),
            whitespace: compile(whitespace),
            line_break_run: compile(&format!("^[{}]+", break_chars)),
            line_breaks: compile(line_breaks),
            break_chars,
        }
    }

    /// Compiles a language rule, replacing `{BREAKS}` with this mode's
    /// line-break characters (for use inside `[...]` / `[^...]`).
    pub fn rule(&self, template: &str) -> Regex {
        compile(&template.replace(BREAKS, self.break_chars))
    }

    /// Number of line-break sequences in `text` and the byte offset right
    /// after the last one.
    pub fn last_break(&self, text: &str) -> Option<(usize, usize)> {
        let mut count = 0;
        let mut end = 0;
        for m in self.line_breaks.find_iter(text) {
            count += 1;
            end = m.end();
        }
        (count > 0).then_some((count, end))
    }

    pub fn is_line_break(&self, c: char) -> bool {
        matches!(c, '\r' | '\n') || (self.unicode && matches!(c, '\u{2028}' | '\u{2029}'))
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid tokenizer rule {pattern:?}: {e}"))
}
