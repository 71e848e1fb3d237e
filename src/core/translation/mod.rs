//! Per (source, locale) translation tables.
//!
//! A table maps string hashes to translated text. It is stored as two flat
//! files in the source's storage folder: the editable `<locale>-server.ini`
//! holding every translation, and the derived `<locale>-client.ini` holding
//! only translations of strings used in client files.

pub mod ini;

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use super::error::{LocalizationError, Result};
use super::language::Family;
use super::registry::Registry;
use crate::utils::write_atomic;

pub use ini::{FileKind, MalformedLine};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    locale: String,
    entries: BTreeMap<String, String>,
}

/// Outcome of loading a table from disk.
#[derive(Debug, Default)]
pub struct LoadedTable {
    pub table: TranslationTable,
    /// Lines skipped while reading, with the file they came from.
    pub malformed: Vec<(PathBuf, MalformedLine)>,
}

impl TranslationTable {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn get(&self, hash: &str) -> Option<&str> {
        self.entries.get(hash).map(String::as_str)
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.entries.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Upserts a translation. Empty or whitespace-only text removes it
    /// instead, so a blanked translation reads as untranslated.
    pub fn set(&mut self, hash: &str, text: &str) {
        if text.trim().is_empty() {
            self.entries.remove(hash);
        } else {
            self.entries.insert(hash.to_string(), text.to_string());
        }
    }

    pub fn remove(&mut self, hash: &str) -> Option<String> {
        self.entries.remove(hash)
    }

    /// Drops translations of strings no longer in `registry`. Returns how many
    /// were removed.
    pub fn retain_known(&mut self, registry: &Registry) -> usize {
        let before = self.entries.len();
        self.entries.retain(|hash, _| registry.contains(hash));
        before - self.entries.len()
    }

    /// Reads the server file, then fills gaps from the client file. Missing
    /// files yield an empty table.
    pub fn load(folder: &Path, locale: &str) -> Result<LoadedTable> {
        let mut loaded = LoadedTable {
            table: TranslationTable::new(locale),
            malformed: Vec::new(),
        };

        for kind in [FileKind::Server, FileKind::Client] {
            let path = folder.join(kind.file_name(locale));
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => return Err(LocalizationError::io(path, err)),
            };

            let (pairs, malformed) = ini::parse(&content);
            for line in malformed {
                tracing::warn!(
                    file = %path.display(),
                    line = line.line,
                    "skipping malformed translation line"
                );
                loaded.malformed.push((path.clone(), line));
            }
            for (hash, text) in pairs {
                if !loaded.table.contains(&hash) {
                    loaded.table.set(&hash, &text);
                }
            }
        }

        Ok(loaded)
    }

    /// Prunes translations of vanished strings, then writes both files.
    /// Output is deterministic and written atomically.
    pub fn save(&mut self, folder: &Path, locale_label: &str, registry: &Registry) -> Result<()> {
        let pruned = self.retain_known(registry);
        if pruned > 0 {
            tracing::debug!(locale = %self.locale, pruned, "dropped translations of removed strings");
        }

        let server: Vec<(&str, &str)> = self.iter().collect();
        let client: Vec<(&str, &str)> = server
            .iter()
            .copied()
            .filter(|(hash, _)| {
                registry
                    .get(hash)
                    .is_some_and(|entry| entry.has_family(Family::Client))
            })
            .collect();

        for (kind, entries) in [(FileKind::Server, server), (FileKind::Client, client)] {
            let path = folder.join(kind.file_name(&self.locale));
            let content = ini::render(kind, locale_label, &entries);
            write_atomic(&path, content.as_bytes())
                .map_err(|err| LocalizationError::io(&path, err))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::DiscoveredString;
    use crate::utils::hash_text;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn discovered(text: &str, family: Family) -> DiscoveredString {
        DiscoveredString {
            text: text.to_string(),
            file: "app.php".to_string(),
            line: 1,
            family,
        }
    }

    fn registry() -> Registry {
        Registry::merge(vec![
            discovered("Hello", Family::Server),
            discovered("Hello", Family::Client),
            discovered("Save", Family::Server),
        ])
    }

    #[test]
    fn test_blank_text_removes_translation() {
        let registry = registry();
        let mut table = TranslationTable::new("de_DE");
        table.set(&hash_text("Hello"), "Hallo");
        table.set(&hash_text("Save"), "Speichern");
        assert_eq!(registry.count_untranslated(&table), 0);

        table.set(&hash_text("Save"), "   ");
        assert_eq!(table.get(&hash_text("Save")), None);
        assert_eq!(registry.count_untranslated(&table), 1);
    }

    #[test]
    fn test_save_prunes_and_splits_files() {
        let dir = TempDir::new().unwrap();
        let registry = registry();
        let mut table = TranslationTable::new("de_DE");
        table.set(&hash_text("Hello"), "Hallo");
        table.set(&hash_text("Save"), "Speichern");
        table.set(&hash_text("Gone"), "Weg");

        table.save(dir.path(), "German", &registry).unwrap();

        assert_eq!(table.len(), 2);
        let server = fs::read_to_string(dir.path().join("de_DE-server.ini")).unwrap();
        let client = fs::read_to_string(dir.path().join("de_DE-client.ini")).unwrap();
        assert!(server.contains("Speichern") && server.contains("Hallo"));
        assert!(!server.contains("Weg"));
        assert!(client.contains("Hallo"));
        assert!(!client.contains("Speichern"));
    }

    #[test]
    fn test_save_twice_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let registry = registry();
        let mut table = TranslationTable::new("de_DE");
        table.set(&hash_text("Hello"), "Hallo");
        table.set(&hash_text("Save"), "Speichern");

        table.save(dir.path(), "German", &registry).unwrap();
        let first = fs::read(dir.path().join("de_DE-server.ini")).unwrap();
        table.save(dir.path(), "German", &registry).unwrap();
        let second = fs::read(dir.path().join("de_DE-server.ini")).unwrap();

        assert_eq!(first, second);
        assert!(!first.starts_with(&[0xEF, 0xBB, 0xBF]));
    }

    #[test]
    fn test_load_round_trip_and_client_fallback() {
        let dir = TempDir::new().unwrap();
        let registry = registry();
        let mut table = TranslationTable::new("de_DE");
        table.set(&hash_text("Hello"), "Hallo");
        table.set(&hash_text("Save"), "Speichern");
        table.save(dir.path(), "German", &registry).unwrap();

        let loaded = TranslationTable::load(dir.path(), "de_DE").unwrap();
        assert_eq!(loaded.table, table);

        // A translation only present in the client file is still picked up.
        fs::write(
            dir.path().join("de_DE-server.ini"),
            format!("{}= \"Speichern\"\n", hash_text("Save")),
        )
        .unwrap();
        let loaded = TranslationTable::load(dir.path(), "de_DE").unwrap();
        assert_eq!(loaded.table.get(&hash_text("Hello")), Some("Hallo"));
    }

    #[test]
    fn test_load_missing_files_is_empty() {
        let dir = TempDir::new().unwrap();
        let loaded = TranslationTable::load(dir.path(), "fr_FR").unwrap();
        assert!(loaded.table.is_empty());
        assert!(loaded.malformed.is_empty());
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("fr_FR-server.ini"),
            "; header\nabc= \"Bonjour\"\nnot a pair\n",
        )
        .unwrap();

        let loaded = TranslationTable::load(dir.path(), "fr_FR").unwrap();
        assert_eq!(loaded.table.get("abc"), Some("Bonjour"));
        assert_eq!(loaded.malformed.len(), 1);
        assert_eq!(loaded.malformed[0].1.line, 3);
    }
}
