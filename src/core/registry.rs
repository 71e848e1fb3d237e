//! Content-addressed string registry of one source.
//!
//! Every distinct text discovered in a scan gets one entry keyed by the MD5
//! hash of the text. The hash depends on nothing but the text, so the same
//! translation serves every occurrence and survives code moving around.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::error::{LocalizationError, Result};
use super::extract::DiscoveredString;
use super::language::Family;
use super::translation::TranslationTable;
use crate::utils::{hash_text, write_atomic};

pub const REGISTRY_FILE_NAME: &str = "strings.json";
pub const REGISTRY_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringEntry {
    pub hash: String,
    pub text: String,
    pub locations: BTreeSet<Location>,
    pub language_families: BTreeSet<Family>,
    pub call_count: usize,
}

impl StringEntry {
    pub fn has_family(&self, family: Family) -> bool {
        self.language_families.contains(&family)
    }

    /// Distinct files the string is used in, sorted.
    pub fn files(&self) -> Vec<&str> {
        let files: BTreeSet<&str> = self.locations.iter().map(|l| l.file.as_str()).collect();
        files.into_iter().collect()
    }
}

#[derive(Debug, Serialize)]
struct RegistryFileRef<'a> {
    version: u32,
    strings: Vec<&'a StringEntry>,
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    version: u32,
    #[serde(default)]
    strings: Vec<StringEntry>,
}

/// Immutable snapshot of the strings of one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<String, StringEntry>,
}

impl Registry {
    /// Builds a snapshot from the strings of a scan: one entry per distinct
    /// text, locations deduplicated by file and line, one call counted per
    /// occurrence.
    pub fn merge(discovered: impl IntoIterator<Item = DiscoveredString>) -> Registry {
        let mut entries: BTreeMap<String, StringEntry> = BTreeMap::new();

        for found in discovered {
            let hash = hash_text(&found.text);
            let entry = entries.entry(hash.clone()).or_insert_with(|| StringEntry {
                hash,
                text: found.text,
                locations: BTreeSet::new(),
                language_families: BTreeSet::new(),
                call_count: 0,
            });
            entry.locations.insert(Location {
                file: found.file,
                line: found.line,
            });
            entry.language_families.insert(found.family);
            entry.call_count += 1;
        }

        Registry { entries }
    }

    pub fn get(&self, hash: &str) -> Option<&StringEntry> {
        self.entries.get(hash)
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

    /// Entries ordered by hash.
    pub fn iter(&self) -> impl Iterator<Item = &StringEntry> {
        self.entries.values()
    }

    pub fn with_family(&self, family: Family) -> impl Iterator<Item = &StringEntry> {
        self.iter().filter(move |entry| entry.has_family(family))
    }

    /// Number of entries without a translation in `table`.
    pub fn count_untranslated(&self, table: &TranslationTable) -> usize {
        self.entries
            .keys()
            .filter(|hash| !table.contains(hash))
            .count()
    }

    /// Writes the snapshot to `strings.json` in `folder`.
    pub fn persist(&self, folder: &Path) -> Result<()> {
        let path = folder.join(REGISTRY_FILE_NAME);
        let file = RegistryFileRef {
            version: REGISTRY_VERSION,
            strings: self.entries.values().collect(),
        };
        let mut content = serde_json::to_string_pretty(&file).map_err(|err| {
            LocalizationError::CorruptRegistry {
                path: path.clone(),
                reason: err.to_string(),
            }
        })?;
        content.push('\n');

        write_atomic(&path, content.as_bytes()).map_err(|err| LocalizationError::io(&path, err))
    }

    /// Reads the snapshot stored in `folder`. A missing file is an empty
    /// registry; an unreadable or inconsistent one is an error.
    pub fn load(folder: &Path) -> Result<Registry> {
        let path = folder.join(REGISTRY_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Registry::default()),
            Err(err) => return Err(LocalizationError::io(path, err)),
        };

        let corrupt = |reason: String| LocalizationError::CorruptRegistry {
            path: path.clone(),
            reason,
        };

        let file: RegistryFile =
            serde_json::from_str(&content).map_err(|err| corrupt(err.to_string()))?;
        if file.version > REGISTRY_VERSION {
            return Err(corrupt(format!("unsupported version {}", file.version)));
        }

        let mut entries = BTreeMap::new();
        for entry in file.strings {
            if entry.hash != hash_text(&entry.text) {
                return Err(corrupt(format!(
                    "hash {} does not match its text",
                    entry.hash
                )));
            }
            entries.insert(entry.hash.clone(), entry);
        }

        Ok(Registry { entries })
    }

    /// Whether a snapshot has ever been stored in `folder`.
    pub fn exists(folder: &Path) -> bool {
        folder.join(REGISTRY_FILE_NAME).is_file()
    }
}
