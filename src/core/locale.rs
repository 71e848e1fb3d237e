//! Supported locales and their formatting records.
//!
//! Locales, countries and currencies are static data. A locale links one
//! country (number separators) which links one currency (symbol and its
//! position). Unknown names are rejected with `UnsupportedLocale`.

use std::{fmt, str::FromStr};

use serde::Serialize;

use super::error::{LocalizationError, Result};

/// Name of the locale the source texts are written in.
pub const NATIVE_LOCALE: &str = "en_UK";

/// The two independent locale selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Language of the user interface.
    Application,
    /// Language of user data.
    Content,
}

impl Namespace {
    pub const ALL: [Namespace; 2] = [Namespace::Application, Namespace::Content];

    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Application => "application",
            Namespace::Content => "content",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = LocalizationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "application" | "app" => Ok(Namespace::Application),
            "content" => Ok(Namespace::Content),
            _ => Err(LocalizationError::UnknownNamespace(s.to_string())),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Currency {
    pub iso: &'static str,
    pub symbol: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
    /// `$12.00` rather than `12,00 €`.
    pub symbol_first: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub label: &'static str,
    pub thousands_separator: &'static str,
    pub decimal_separator: &'static str,
    pub currency: &'static Currency,
}

#[derive(Debug, PartialEq, Eq)]
struct LocaleRecord {
    name: &'static str,
    label: &'static str,
    country: &'static Country,
}

static EUR: Currency = Currency {
    iso: "EUR",
    symbol: "€",
    singular: "Euro",
    plural: "Euros",
    symbol_first: false,
};
static USD: Currency = Currency {
    iso: "USD",
    symbol: "$",
    singular: "Dollar",
    plural: "Dollars",
    symbol_first: true,
};
static CAD: Currency = Currency {
    iso: "CAD",
    symbol: "$",
    singular: "Canadian Dollar",
    plural: "Canadian Dollars",
    symbol_first: true,
};
static GBP: Currency = Currency {
    iso: "GBP",
    symbol: "£",
    singular: "Pound",
    plural: "Pounds",
    symbol_first: true,
};
static MXN: Currency = Currency {
    iso: "MXN",
    symbol: "$",
    singular: "Peso",
    plural: "Pesos",
    symbol_first: true,
};
static PLN: Currency = Currency {
    iso: "PLN",
    symbol: "zł",
    singular: "Złoty",
    plural: "Złotys",
    symbol_first: false,
};
static SEK: Currency = Currency {
    iso: "SEK",
    symbol: "kr",
    singular: "Krona",
    plural: "Kronor",
    symbol_first: false,
};

const fn country(
    code: &'static str,
    label: &'static str,
    thousands_separator: &'static str,
    decimal_separator: &'static str,
    currency: &'static Currency,
) -> Country {
    Country {
        code,
        label,
        thousands_separator,
        decimal_separator,
        currency,
    }
}

static AT: Country = country("at", "Austria", ".", ",", &EUR);
static CA: Country = country("ca", "Canada", ",", ".", &CAD);
static DE: Country = country("de", "Germany", ".", ",", &EUR);
static ES: Country = country("es", "Spain", ".", ",", &EUR);
static FR: Country = country("fr", "France", " ", ",", &EUR);
static IT: Country = country("it", "Italy", ".", ",", &EUR);
static MX: Country = country("mx", "Mexico", ",", ".", &MXN);
static PL: Country = country("pl", "Poland", " ", ",", &PLN);
static SE: Country = country("se", "Sweden", " ", ",", &SEK);
static UK: Country = country("uk", "United Kingdom", ",", ".", &GBP);
static US: Country = country("us", "United States", ",", ".", &USD);

static LOCALES: [LocaleRecord; 11] = [
    LocaleRecord { name: "de_AT", label: "German (Austria)", country: &AT },
    LocaleRecord { name: "de_DE", label: "German", country: &DE },
    LocaleRecord { name: "en_CA", label: "English (Canada)", country: &CA },
    LocaleRecord { name: "en_UK", label: "English (UK)", country: &UK },
    LocaleRecord { name: "en_US", label: "English (US)", country: &US },
    LocaleRecord { name: "es_ES", label: "Spanish", country: &ES },
    LocaleRecord { name: "es_MX", label: "Spanish (Mexico)", country: &MX },
    LocaleRecord { name: "fr_FR", label: "French", country: &FR },
    LocaleRecord { name: "it_IT", label: "Italian", country: &IT },
    LocaleRecord { name: "pl_PL", label: "Polish", country: &PL },
    LocaleRecord { name: "sv_SE", label: "Swedish", country: &SE },
];

/// Handle to one supported locale.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Locale(&'static LocaleRecord);

impl Locale {
    pub fn by_name(name: &str) -> Result<Locale> {
        LOCALES
            .iter()
            .find(|record| record.name == name)
            .map(Locale)
            .ok_or_else(|| LocalizationError::UnsupportedLocale(name.to_string()))
    }

    pub fn is_supported(name: &str) -> bool {
        LOCALES.iter().any(|record| record.name == name)
    }

    /// Every supported locale, ordered by name.
    pub fn supported() -> impl Iterator<Item = Locale> {
        LOCALES.iter().map(Locale)
    }

    pub fn native() -> Locale {
        Locale::by_name(NATIVE_LOCALE).unwrap_or(Locale(&LOCALES[3]))
    }

    pub fn name(&self) -> &'static str {
        self.0.name
    }

    pub fn label(&self) -> &'static str {
        self.0.label
    }

    /// Language part of the name (`de` for `de_AT`).
    pub fn language(&self) -> &'static str {
        self.0.name.split('_').next().unwrap_or(self.0.name)
    }

    pub fn is_native(&self) -> bool {
        self.0.name == NATIVE_LOCALE
    }

    pub fn country(&self) -> &'static Country {
        self.0.country
    }

    pub fn currency(&self) -> &'static Currency {
        self.0.country.currency
    }

    /// `1234567.891` with 2 decimals is `1,234,567.89` in `en_US` and
    /// `1.234.567,89` in `de_DE`.
    pub fn format_number(&self, value: f64, decimals: usize) -> String {
        let country = self.country();
        let formatted = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = formatted
            .split_once('.')
            .unwrap_or((formatted.as_str(), ""));

        let mut grouped = String::new();
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push_str(country.thousands_separator);
            }
            grouped.push(digit);
        }

        let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
        let mut out = String::new();
        if value < 0.0 && !is_zero {
            out.push('-');
        }
        out.push_str(&grouped);
        if !frac_part.is_empty() {
            out.push_str(country.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }

    /// Amount with two decimals and the currency symbol on the side the
    /// currency uses.
    pub fn format_money(&self, value: f64) -> String {
        let currency = self.currency();
        let amount = self.format_number(value.abs(), 2);
        let sign = if value < 0.0 && amount.chars().any(|c| c.is_ascii_digit() && c != '0') {
            "-"
        } else {
            ""
        };

        if currency.symbol_first {
            format!("{}{}{}", sign, currency.symbol, amount)
        } else {
            format!("{}{} {}", sign, amount, currency.symbol)
        }
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Locale").field(&self.0.name).finish()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup() {
        let locale = Locale::by_name("de_AT").unwrap();
        assert_eq!(locale.label(), "German (Austria)");
        assert_eq!(locale.language(), "de");
        assert_eq!(locale.currency().iso, "EUR");
        assert!(!locale.is_native());
        assert!(Locale::native().is_native());

        let err = Locale::by_name("xx_XX").unwrap_err();
        assert_eq!(err.code(), "unsupported-locale");
    }

    #[test]
    fn test_supported_names_are_sorted() {
        let names: Vec<_> = Locale::supported().map(|l| l.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_format_number() {
        let us = Locale::by_name("en_US").unwrap();
        let de = Locale::by_name("de_DE").unwrap();
        let fr = Locale::by_name("fr_FR").unwrap();

        assert_eq!(us.format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(de.format_number(1234567.891, 2), "1.234.567,89");
        assert_eq!(fr.format_number(-1234.5, 1), "-1 234,5");
        assert_eq!(us.format_number(999.0, 0), "999");
        assert_eq!(us.format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(Locale::by_name("en_US").unwrap().format_money(-12.5), "-$12.50");
        assert_eq!(Locale::by_name("de_DE").unwrap().format_money(1234.5), "1.234,50 €");
        assert_eq!(Locale::by_name("en_UK").unwrap().format_money(3.0), "£3.00");
        assert_eq!(Locale::by_name("sv_SE").unwrap().format_money(10.0), "10,00 kr");
    }

    #[test]
    fn test_namespace_parsing() {
        assert_eq!("app".parse::<Namespace>().unwrap(), Namespace::Application);
        assert_eq!("Content".parse::<Namespace>().unwrap(), Namespace::Content);
        let err = "user".parse::<Namespace>().unwrap_err();
        assert_eq!(err.code(), "unknown-namespace");
    }
}
