//! A named set of folders whose strings are tracked together.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use super::error::Result;
use super::registry::Registry;
use super::translation::TranslationTable;
use crate::utils::hash_text;

/// Everything needed to register a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDefinition {
    pub alias: String,
    pub label: String,
    pub group: String,
    /// Defaults to `<storage folder>/<alias>` when `None`.
    pub storage_folder: Option<PathBuf>,
    pub roots: Vec<PathBuf>,
    /// Directory names skipped during the walk (exact match).
    pub excluded_folders: Vec<String>,
    /// File name fragments skipped during the walk (case-insensitive substring).
    pub excluded_files: Vec<String>,
}

impl SourceDefinition {
    pub fn new(alias: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn exclude_folder(mut self, name: impl Into<String>) -> Self {
        self.excluded_folders.push(name.into());
        self
    }

    pub fn exclude_file(mut self, fragment: impl Into<String>) -> Self {
        self.excluded_files.push(fragment.into());
        self
    }

    pub fn storage_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.storage_folder = Some(folder.into());
        self
    }
}

/// Identifier of a source: MD5 of its roots joined with `|`.
pub fn source_id(roots: &[PathBuf]) -> String {
    let joined = roots
        .iter()
        .map(|root| root.to_string_lossy())
        .collect::<Vec<_>>()
        .join("|");
    hash_text(&joined)
}

#[derive(Debug)]
pub struct Source {
    id: String,
    alias: String,
    label: String,
    group: String,
    storage_folder: PathBuf,
    roots: Vec<PathBuf>,
    excluded_folders: Vec<String>,
    excluded_files: Vec<String>,
    registry: Option<Arc<Registry>>,
    tables: BTreeMap<String, TranslationTable>,
}

impl Source {
    pub fn new(definition: SourceDefinition, default_storage: &Path) -> Self {
        let storage_folder = definition
            .storage_folder
            .unwrap_or_else(|| default_storage.join(&definition.alias));

        Self {
            id: source_id(&definition.roots),
            alias: definition.alias,
            label: definition.label,
            group: definition.group,
            storage_folder,
            roots: definition.roots,
            excluded_folders: definition.excluded_folders,
            excluded_files: definition.excluded_files,
            registry: None,
            tables: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn storage_folder(&self) -> &Path {
        &self.storage_folder
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn excluded_folders(&self) -> &[String] {
        &self.excluded_folders
    }

    pub fn excluded_files(&self) -> &[String] {
        &self.excluded_files
    }

    /// Whether `name` is the id or the alias of this source.
    pub fn matches(&self, name: &str) -> bool {
        self.id == name || self.alias == name
    }

    /// Whether a registry has ever been stored for this source.
    pub fn is_scanned(&self) -> bool {
        Registry::exists(&self.storage_folder)
    }

    /// Current registry snapshot, loaded from storage on first access.
    pub fn registry(&mut self) -> Result<Arc<Registry>> {
        if let Some(registry) = &self.registry {
            return Ok(Arc::clone(registry));
        }
        let registry = Arc::new(Registry::load(&self.storage_folder)?);
        self.registry = Some(Arc::clone(&registry));
        Ok(registry)
    }

    /// Snapshot already in memory, if any.
    pub fn loaded_registry(&self) -> Option<Arc<Registry>> {
        self.registry.clone()
    }

    /// Persists `registry` and makes it the current snapshot. Readers holding
    /// the previous snapshot keep it unchanged.
    pub fn replace_registry(&mut self, registry: Registry) -> Result<Arc<Registry>> {
        registry.persist(&self.storage_folder)?;
        let registry = Arc::new(registry);
        self.registry = Some(Arc::clone(&registry));
        Ok(registry)
    }

    /// Translation table of `locale`, loaded from storage on first access.
    pub fn table(&mut self, locale: &str) -> Result<&mut TranslationTable> {
        if !self.tables.contains_key(locale) {
            let loaded = TranslationTable::load(&self.storage_folder, locale)?;
            self.tables.insert(locale.to_string(), loaded.table);
        }
        Ok(self
            .tables
            .entry(locale.to_string())
            .or_insert_with(|| TranslationTable::new(locale)))
    }

    /// Prunes the table of `locale` against the current registry and writes
    /// its files.
    pub fn save_table(&mut self, locale: &str, locale_label: &str) -> Result<()> {
        let registry = self.registry()?;
        let storage = self.storage_folder.clone();
        self.table(locale)?.save(&storage, locale_label, &registry)
    }

    /// Untranslated strings of the current registry for `locale`.
    pub fn count_untranslated(&mut self, locale: &str) -> Result<usize> {
        let registry = self.registry()?;
        Ok(registry.count_untranslated(self.table(locale)?))
    }

    /// Drops in-memory state so the next access reads storage again.
    pub fn forget(&mut self) {
        self.registry = None;
        self.tables.clear();
    }
}
