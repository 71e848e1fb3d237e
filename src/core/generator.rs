//! Client library generation.
//!
//! Writes the JavaScript runtime and one table per application locale into
//! the client folder. A `.cachekey` file remembers the key the files were
//! built with, so unchanged output is not rewritten on every run.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use super::error::{LocalizationError, Result};
use super::language::Family;
use super::locale::Locale;
use super::source::Source;
use crate::utils::write_atomic;

pub const CACHE_KEY_FILE: &str = ".cachekey";

/// Runtime files written before the locale tables, in this order.
pub const SUPPORT_FILES: [(&str, &str); 2] = [
    ("translator.js", include_str!("assets/translator.js")),
    ("md5.js", include_str!("assets/md5.js")),
];

/// Result of [`ClientGenerator::write_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// No client folder is configured.
    Disabled,
    /// Cache key and files were current, nothing was written.
    UpToDate,
    Written(Vec<PathBuf>),
}

#[derive(Debug, Clone)]
pub struct ClientGenerator {
    folder: Option<PathBuf>,
    cache_key: String,
    locales: Vec<Locale>,
}

pub fn locale_file_name(locale: &str) -> String {
    format!("locale-{}.js", locale)
}

impl ClientGenerator {
    /// `locales` are the application locales; the native one is skipped.
    pub fn new(
        folder: Option<&Path>,
        cache_key: &str,
        locales: impl IntoIterator<Item = Locale>,
    ) -> Self {
        let mut locales: Vec<Locale> = locales.into_iter().filter(|l| !l.is_native()).collect();
        locales.sort_by_key(|l| l.name());
        locales.dedup();

        Self {
            folder: folder
                .filter(|f| !f.as_os_str().is_empty())
                .map(Path::to_path_buf),
            cache_key: cache_key.to_string(),
            locales,
        }
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// Paths of every artifact, support files first. Empty when disabled.
    pub fn artifact_list(&self) -> Vec<PathBuf> {
        let Some(folder) = &self.folder else {
            return Vec::new();
        };

        SUPPORT_FILES
            .iter()
            .map(|(name, _)| folder.join(name))
            .chain(
                self.locales
                    .iter()
                    .map(|locale| folder.join(locale_file_name(locale.name()))),
            )
            .collect()
    }

    /// Whether the stored cache key matches and every artifact exists.
    pub fn is_up_to_date(&self) -> bool {
        let Some(folder) = &self.folder else {
            return true;
        };
        let stored = fs::read_to_string(folder.join(CACHE_KEY_FILE)).ok();
        stored.as_deref() == Some(self.cache_key.as_str())
            && self.artifact_list().iter().all(|path| path.is_file())
    }

    /// Writes every artifact, then the cache key.
    pub fn write_files(&self, sources: &mut [Source], force: bool) -> Result<WriteOutcome> {
        let Some(folder) = &self.folder else {
            return Ok(WriteOutcome::Disabled);
        };
        if !force && self.is_up_to_date() {
            tracing::debug!(folder = %folder.display(), "client files are up to date");
            return Ok(WriteOutcome::UpToDate);
        }

        fs::create_dir_all(folder).map_err(|err| LocalizationError::io(folder, err))?;

        let mut written = Vec::new();
        for (name, content) in SUPPORT_FILES {
            let path = folder.join(name);
            write_atomic(&path, content.as_bytes())
                .map_err(|err| LocalizationError::io(&path, err))?;
            written.push(path);
        }

        for locale in &self.locales {
            let path = folder.join(locale_file_name(locale.name()));
            let content = render_locale(*locale, sources)?;
            write_atomic(&path, content.as_bytes())
                .map_err(|err| LocalizationError::io(&path, err))?;
            written.push(path);
        }

        let key_path = folder.join(CACHE_KEY_FILE);
        write_atomic(&key_path, self.cache_key.as_bytes())
            .map_err(|err| LocalizationError::io(&key_path, err))?;

        tracing::info!(folder = %folder.display(), files = written.len(), "wrote client files");
        Ok(WriteOutcome::Written(written))
    }
}

/// Table of every client string of every source for `locale`, falling back
/// to the source text where no translation exists.
pub fn render_locale(locale: Locale, sources: &mut [Source]) -> Result<String> {
    let mut strings: BTreeMap<String, String> = BTreeMap::new();

    for source in sources.iter_mut() {
        let registry = source.registry()?;
        let table = source.table(locale.name())?;
        for entry in registry.with_family(Family::Client) {
            let text = table.get(&entry.hash).unwrap_or(entry.text.as_str());
            strings.insert(entry.hash.clone(), text.to_string());
        }
    }

    let table: Map<String, Value> = strings
        .into_iter()
        .map(|(hash, text)| (hash, Value::String(text)))
        .collect();

    Ok(format!(
        "/* {} ({}) */\nLocSync.register({}, {:#});\n",
        locale.label(),
        locale.name(),
        Value::String(locale.name().to_string()),
        Value::Object(table)
    ))
}
