//! Flat translation file format.
//!
//! ```text
//! ; -------------------------------------------------------
//! ; SERVER TRANSLATION FILE FOR GERMAN
//! ; -------------------------------------------------------
//! ;
//! ; ...
//!
//! 8b1a9953c4611296a827abf8c47804d7= "Hallo"
//! ```
//!
//! Values are double-quoted with `\`, `"`, line feeds and carriage returns
//! backslash-escaped. Files are UTF-8 without a byte-order mark.

use std::{cmp::Ordering, fmt};

use crate::utils::natural_cmp_ci;

const RULE: &str = "; -------------------------------------------------------";

/// Which of the two per-locale files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Main editable table with every translation of the source.
    Server,
    /// Derived, non-editable subset for strings used in client files.
    Client,
}

impl FileKind {
    pub fn file_name(self, locale: &str) -> String {
        format!("{}-{}.ini", locale, self)
    }

    pub fn is_editable(self) -> bool {
        self == FileKind::Server
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Server => write!(f, "server"),
            FileKind::Client => write!(f, "client"),
        }
    }
}

/// A line that is neither a comment nor a `HASH= "TEXT"` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line: usize,
    pub content: String,
}

/// Serialization order: translated text in case-insensitive natural order,
/// ties broken by hash.
pub fn compare_entries(a: (&str, &str), b: (&str, &str)) -> Ordering {
    natural_cmp_ci(a.1, b.1).then_with(|| a.0.cmp(b.0))
}

/// Renders a complete file. `entries` are `(hash, text)` pairs in any order.
pub fn render(kind: FileKind, locale_label: &str, entries: &[(&str, &str)]) -> String {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| compare_entries(*a, *b));

    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "; {} TRANSLATION FILE FOR {}\n",
        kind.to_string().to_uppercase(),
        locale_label.to_uppercase()
    ));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(";\n");

    if kind.is_editable() {
        out.push_str("; You may edit text directly in this file under the following conditions:\n");
        out.push_str(";\n");
        out.push_str("; 1) Do not to modify the keys (left hand side of the = sign)\n");
        out.push_str("; 2) Save the file as UTF-8 without BOM\n");
    } else {
        out.push_str("; Do NOT edit this file directly! It depends on the main translation file\n");
        out.push_str("; and any changes will be lost. Edit the main file instead.\n");
    }
    out.push('\n');

    for (hash, text) in sorted {
        out.push_str(hash);
        out.push_str("= \"");
        out.push_str(&escape_value(text));
        out.push_str("\"\n");
    }

    out
}

/// Parses file content into `(hash, text)` pairs. Comment and blank lines are
/// ignored; anything else that does not parse is returned as malformed.
pub fn parse(content: &str) -> (Vec<(String, String)>, Vec<MalformedLine>) {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    let mut pairs = Vec::new();
    let mut malformed = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        match parse_pair(line) {
            Some(pair) => pairs.push(pair),
            None => malformed.push(MalformedLine {
                line: index + 1,
                content: raw.to_string(),
            }),
        }
    }

    (pairs, malformed)
}

fn parse_pair(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let value = value.trim();
    let quoted = value.strip_prefix('"')?.strip_suffix('"')?;
    Some((key.to_string(), unescape_value(quoted)?))
}

pub fn escape_value(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Reverses [`escape_value`]. An unescaped quote means the line is malformed.
fn unescape_value(value: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            '"' => return None,
            other => out.push(other),
        }
    }
    Some(out)
}
