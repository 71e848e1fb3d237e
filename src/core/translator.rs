//! Runtime lookup of translated strings.

use std::{collections::HashMap, fmt::Display, sync::LazyLock};

use regex::{Captures, Regex};

use super::error::Result;
use super::locale::Locale;
use super::source::Source;
use crate::utils::hash_text;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(?:([1-9][0-9]*)\$)?([sd%])").unwrap());

/// Translations of one locale across all sources.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    strings: HashMap<String, String>,
}

impl Translator {
    /// Collects the tables of `locale` from every source. The native locale
    /// needs no tables.
    pub fn load(locale: Locale, sources: &mut [Source]) -> Result<Self> {
        let mut strings = HashMap::new();
        if !locale.is_native() {
            for source in sources.iter_mut() {
                for (hash, text) in source.table(locale.name())?.iter() {
                    strings
                        .entry(hash.to_string())
                        .or_insert_with(|| text.to_string());
                }
            }
        }
        Ok(Self { locale, strings })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translated text of `text`, or `text` itself when untranslated.
    pub fn lookup<'a>(&'a self, text: &'a str) -> &'a str {
        if self.locale.is_native() {
            return text;
        }
        self.strings
            .get(&hash_text(text))
            .map(String::as_str)
            .unwrap_or(text)
    }

    /// Looks up `text` and fills its placeholders with `args`.
    pub fn translate(&self, text: &str, args: &[&dyn Display]) -> String {
        sprintf(self.lookup(text), args)
    }
}

/// Replaces `%s`, `%d`, `%N$s`, `%N$d` and `%%`. Placeholders without a
/// matching argument are left as they are. `%d` renders the integer part of
/// a numeric argument and `0` for anything else.
pub fn sprintf(format: &str, args: &[&dyn Display]) -> String {
    let mut next = 0;
    PLACEHOLDER
        .replace_all(format, |caps: &Captures| {
            let kind = &caps[2];
            if kind == "%" {
                return "%".to_string();
            }

            let index = match caps.get(1) {
                Some(position) => position.as_str().parse::<usize>().unwrap_or(1) - 1,
                None => {
                    next += 1;
                    next - 1
                }
            };
            let Some(arg) = args.get(index) else {
                return caps[0].to_string();
            };

            let value = arg.to_string();
            if kind == "d" {
                integer_part(&value)
            } else {
                value
            }
        })
        .into_owned()
}

fn integer_part(value: &str) -> String {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => format!("{}", number.trunc() as i64),
        _ => "0".to_string(),
    }
}
