//! The localization context.
//!
//! [`Localization`] owns everything a process knows about localization: the
//! locales added to each namespace and which one is selected, the sources and
//! their registries and tables, and the client file settings. Nothing is
//! global; construct one per project and pass it around.
//!
//! ```no_run
//! use locsync::core::{Localization, Namespace, SourceDefinition};
//!
//! let mut l10n = Localization::new();
//! l10n.add_locale("de_DE", Namespace::Application)?;
//! l10n.configure("storage", None)?;
//! l10n.add_source(SourceDefinition::new("app", "Application").root("src"))?;
//! l10n.scan_all()?;
//! # Ok::<(), locsync::core::LocalizationError>(())
//! ```

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use serde::Serialize;

use super::error::{LocalizationError, Result};
use super::events::{
    CacheKeyChanged, ClientFolderChanged, EventHub, ListenerId, LocaleChanged,
};
use super::generator::{ClientGenerator, WriteOutcome};
use super::language::Family;
use super::locale::{Locale, NATIVE_LOCALE, Namespace};
use super::registry::Registry;
use super::scanner::{ScanFailure, ScanRules, ScanWarning, scan_roots};
use super::source::{Source, SourceDefinition};
use super::translator::Translator;
use crate::utils::natural_cmp_ci;

#[derive(Debug, Default)]
struct LocaleSet {
    /// Sorted by label.
    locales: Vec<Locale>,
    selected: Option<Locale>,
}

/// Result of scanning one source.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub source: String,
    pub files_scanned: usize,
    pub string_count: usize,
    /// Strings not present before the scan.
    pub added: usize,
    /// Strings that vanished with the scan.
    pub removed: usize,
    pub failures: Vec<ScanFailure>,
    pub warnings: Vec<ScanWarning>,
}

/// One string of a source together with its translation in a locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryStatus {
    pub hash: String,
    pub text: String,
    pub translation: Option<String>,
    pub files: Vec<String>,
    pub call_count: usize,
    pub families: Vec<Family>,
}

impl EntryStatus {
    pub fn is_translated(&self) -> bool {
        self.translation.is_some()
    }
}

/// Translation state of a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub id: String,
    pub alias: String,
    pub label: String,
    pub group: String,
    pub scanned: bool,
    pub string_count: usize,
    /// Untranslated strings per non-native application locale, by name.
    pub untranslated: Vec<LocaleCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleCount {
    pub locale: String,
    pub count: usize,
}

#[derive(Debug)]
pub struct Localization {
    application: LocaleSet,
    content: LocaleSet,
    sources: Vec<Source>,
    excluded_folders: Vec<String>,
    excluded_files: Vec<String>,
    storage_folder: Option<PathBuf>,
    client_folder: Option<PathBuf>,
    cache_key: String,
    configured: bool,
    unicode: bool,
    events: EventHub,
}

impl Default for Localization {
    fn default() -> Self {
        Self::new()
    }
}

impl Localization {
    /// A context with the native locale added and selected in both
    /// namespaces.
    pub fn new() -> Self {
        let mut l10n = Self {
            application: LocaleSet::default(),
            content: LocaleSet::default(),
            sources: Vec::new(),
            excluded_folders: Vec::new(),
            excluded_files: Vec::new(),
            storage_folder: None,
            client_folder: None,
            cache_key: String::new(),
            configured: false,
            unicode: true,
            events: EventHub::default(),
        };
        l10n.reset();
        l10n
    }

    /// Drops every added locale and selects the native one again in both
    /// namespaces. Sources and settings are kept.
    pub fn reset(&mut self) {
        for namespace in Namespace::ALL {
            *self.set_mut(namespace) = LocaleSet::default();
        }
        for namespace in Namespace::ALL {
            // The native locale is always supported.
            let _ = self.select_locale(NATIVE_LOCALE, namespace);
        }
    }

    fn set(&self, namespace: Namespace) -> &LocaleSet {
        match namespace {
            Namespace::Application => &self.application,
            Namespace::Content => &self.content,
        }
    }

    fn set_mut(&mut self, namespace: Namespace) -> &mut LocaleSet {
        match namespace {
            Namespace::Application => &mut self.application,
            Namespace::Content => &mut self.content,
        }
    }

    // ============================================================
    // Locales
    // ============================================================

    /// Names of every supported locale.
    pub fn supported_locale_names() -> Vec<&'static str> {
        Locale::supported().map(|l| l.name()).collect()
    }

    /// Adds a locale to a namespace. Adding it twice is harmless.
    pub fn add_locale(&mut self, name: &str, namespace: Namespace) -> Result<Locale> {
        let locale = Locale::by_name(name)?;
        let set = self.set_mut(namespace);
        if !set.locales.contains(&locale) {
            set.locales.push(locale);
            set.locales
                .sort_by(|a, b| natural_cmp_ci(a.label(), b.label()).then(a.name().cmp(b.name())));
        }
        Ok(locale)
    }

    /// Selects a locale, adding it first when needed. Listeners are notified
    /// only when the selection actually changes.
    pub fn select_locale(&mut self, name: &str, namespace: Namespace) -> Result<Locale> {
        let locale = self.add_locale(name, namespace)?;
        let set = self.set_mut(namespace);
        let previous = set.selected;
        if previous == Some(locale) {
            return Ok(locale);
        }
        set.selected = Some(locale);

        tracing::debug!(%namespace, locale = locale.name(), "selected locale");
        self.events.locale_changed.emit(&LocaleChanged {
            namespace,
            previous: previous.map(|l| l.name().to_string()),
            current: locale.name().to_string(),
        });
        Ok(locale)
    }

    pub fn selected_locale(&self, namespace: Namespace) -> Result<Locale> {
        self.set(namespace)
            .selected
            .ok_or_else(|| LocalizationError::NoLocaleSelected(namespace.to_string()))
    }

    /// Locales of a namespace, sorted by label.
    pub fn locales(&self, namespace: Namespace) -> &[Locale] {
        &self.set(namespace).locales
    }

    /// Locale names of a namespace, sorted alphabetically.
    pub fn locale_names(&self, namespace: Namespace) -> Vec<&'static str> {
        let mut names: Vec<_> = self.locales(namespace).iter().map(|l| l.name()).collect();
        names.sort_unstable();
        names
    }

    pub fn locale_exists(&self, name: &str, namespace: Namespace) -> bool {
        self.locales(namespace).iter().any(|l| l.name() == name)
    }

    pub fn count_locales(&self, namespace: Namespace) -> usize {
        self.locales(namespace).len()
    }

    pub fn get_locale(&self, name: &str, namespace: Namespace) -> Result<Locale> {
        self.locales(namespace)
            .iter()
            .copied()
            .find(|l| l.name() == name)
            .ok_or_else(|| LocalizationError::UnknownLocale {
                locale: name.to_string(),
                namespace: namespace.to_string(),
            })
    }

    pub fn is_active_locale(&self, locale: Locale, namespace: Namespace) -> bool {
        self.set(namespace).selected == Some(locale)
    }

    /// Application locales that need translation tables.
    pub fn translated_locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self
            .locales(Namespace::Application)
            .iter()
            .copied()
            .filter(|l| !l.is_native())
            .collect();
        locales.sort_by_key(|l| l.name());
        locales
    }

    // ============================================================
    // Sources
    // ============================================================

    /// Registers a source. Without an explicit storage folder it is stored
    /// in `<storage folder>/<alias>`, so the storage folder must be known.
    pub fn add_source(&mut self, definition: SourceDefinition) -> Result<&Source> {
        let default_storage = match (&definition.storage_folder, &self.storage_folder) {
            (Some(_), _) => PathBuf::new(),
            (None, Some(storage)) => storage.clone(),
            (None, None) => return Err(LocalizationError::NoStorageFolder),
        };

        let source = Source::new(definition, &default_storage);
        let index = self.sources.partition_point(|existing| {
            natural_cmp_ci(existing.label(), source.label())
                .then(existing.alias().cmp(source.alias()))
                .is_le()
        });
        self.sources.insert(index, source);
        Ok(&self.sources[index])
    }

    /// Folder name skipped in every source.
    pub fn add_exclude_folder(&mut self, name: &str) {
        if !self.excluded_folders.iter().any(|f| f == name) {
            self.excluded_folders.push(name.to_string());
        }
    }

    /// File name fragment skipped in every source.
    pub fn add_exclude_file(&mut self, fragment: &str) {
        if !self.excluded_files.iter().any(|f| f == fragment) {
            self.excluded_files.push(fragment.to_string());
        }
    }

    /// Sources sorted by label.
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Sources bucketed by group, groups in order of first appearance.
    pub fn sources_grouped(&self) -> Vec<(&str, Vec<&Source>)> {
        let mut groups: Vec<(&str, Vec<&Source>)> = Vec::new();
        for source in &self.sources {
            match groups.iter_mut().find(|(group, _)| *group == source.group()) {
                Some((_, members)) => members.push(source),
                None => groups.push((source.group(), vec![source])),
            }
        }
        groups
    }

    /// Looks a source up by id or alias.
    pub fn source(&self, name: &str) -> Result<&Source> {
        let index = self.source_index(name)?;
        Ok(&self.sources[index])
    }

    pub fn source_mut(&mut self, name: &str) -> Result<&mut Source> {
        let index = self.source_index(name)?;
        Ok(&mut self.sources[index])
    }

    pub fn source_exists(&self, name: &str) -> bool {
        self.sources.iter().any(|s| s.matches(name))
    }

    pub fn source_ids(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.id()).collect()
    }

    pub fn source_aliases(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.alias()).collect()
    }

    fn source_index(&self, name: &str) -> Result<usize> {
        self.sources
            .iter()
            .position(|s| s.matches(name))
            .ok_or_else(|| LocalizationError::UnknownSource {
                requested: name.to_string(),
                available: self
                    .sources
                    .iter()
                    .map(|s| format!("{} ({})", s.alias(), s.id()))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    // ============================================================
    // Configuration
    // ============================================================

    /// Sets the storage folder and the optional client folder. Client files
    /// are written right away when a client folder is given.
    pub fn configure(
        &mut self,
        storage_folder: impl Into<PathBuf>,
        client_folder: Option<&Path>,
    ) -> Result<()> {
        let storage_folder = storage_folder.into();
        self.configured = true;
        self.storage_folder = (!storage_folder.as_os_str().is_empty()).then_some(storage_folder);
        self.client_folder = client_folder
            .filter(|f| !f.as_os_str().is_empty())
            .map(Path::to_path_buf);

        if self.client_folder.is_some() {
            self.write_client_files(false)?;
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn storage_folder(&self) -> Option<&Path> {
        self.storage_folder.as_deref()
    }

    /// Fails unless `configure` was called with a storage folder and at
    /// least one source exists.
    pub fn require_configuration(&self) -> Result<()> {
        if !self.configured {
            return Err(LocalizationError::NotConfigured);
        }
        if self.storage_folder.is_none() {
            return Err(LocalizationError::NoStorageFolder);
        }
        if self.sources.is_empty() {
            return Err(LocalizationError::NoSources);
        }
        Ok(())
    }

    /// Character classes used when tokenizing: unicode (default) or ASCII.
    pub fn set_unicode(&mut self, unicode: bool) {
        self.unicode = unicode;
    }

    // ============================================================
    // Scanning
    // ============================================================

    /// Scans one source, stores its new registry, prunes its tables and
    /// refreshes the client files.
    pub fn scan(&mut self, name: &str) -> Result<ScanSummary> {
        self.require_configuration()?;
        let index = self.source_index(name)?;
        let summary = self.scan_source_at(index)?;
        self.write_client_files(true)?;
        Ok(summary)
    }

    /// Scans every source, then refreshes the client files once.
    pub fn scan_all(&mut self) -> Result<Vec<ScanSummary>> {
        self.require_configuration()?;
        let mut summaries = Vec::with_capacity(self.sources.len());
        for index in 0..self.sources.len() {
            summaries.push(self.scan_source_at(index)?);
        }
        self.write_client_files(true)?;
        Ok(summaries)
    }

    fn scan_source_at(&mut self, index: usize) -> Result<ScanSummary> {
        let locales = self.translated_locales();
        let source = &mut self.sources[index];

        let mut excluded_folders = self.excluded_folders.clone();
        excluded_folders.extend_from_slice(source.excluded_folders());
        let mut excluded_files = self.excluded_files.clone();
        excluded_files.extend_from_slice(source.excluded_files());

        let outcome = scan_roots(
            source.roots(),
            ScanRules {
                excluded_folders: &excluded_folders,
                excluded_files: &excluded_files,
                unicode: self.unicode,
            },
        );

        let previous = source.registry()?;
        let registry = Registry::merge(outcome.strings);
        let added = registry.iter().filter(|e| !previous.contains(&e.hash)).count();
        let removed = previous.iter().filter(|e| !registry.contains(&e.hash)).count();
        let registry = source.replace_registry(registry)?;

        for locale in &locales {
            source.save_table(locale.name(), locale.label())?;
        }

        tracing::info!(
            source = source.alias(),
            files = outcome.files_scanned,
            strings = registry.len(),
            added,
            removed,
            "scan finished"
        );

        Ok(ScanSummary {
            source: source.alias().to_string(),
            files_scanned: outcome.files_scanned,
            string_count: registry.len(),
            added,
            removed,
            failures: outcome.failures,
            warnings: outcome.warnings,
        })
    }

    pub fn is_scanned(&self, name: &str) -> Result<bool> {
        Ok(self.source(name)?.is_scanned())
    }

    // ============================================================
    // Translations
    // ============================================================

    fn require_app_locale(&self, locale: &str) -> Result<Locale> {
        Locale::by_name(locale)?;
        self.get_locale(locale, Namespace::Application)
    }

    pub fn count_untranslated(&mut self, source: &str, locale: &str) -> Result<usize> {
        let locale = self.require_app_locale(locale)?;
        if locale.is_native() {
            return Ok(0);
        }
        self.source_mut(source)?.count_untranslated(locale.name())
    }

    /// Every string of a source with its translation in `locale`, ordered
    /// by text in natural order.
    pub fn entries(&mut self, source: &str, locale: &str) -> Result<Vec<EntryStatus>> {
        let locale = self.require_app_locale(locale)?;
        let source = self.source_mut(source)?;
        let registry = source.registry()?;
        let table = source.table(locale.name())?;

        let mut entries: Vec<EntryStatus> = registry
            .iter()
            .map(|entry| EntryStatus {
                hash: entry.hash.clone(),
                text: entry.text.clone(),
                translation: table.get(&entry.hash).map(str::to_string),
                files: entry.files().into_iter().map(str::to_string).collect(),
                call_count: entry.call_count,
                families: entry.language_families.iter().copied().collect(),
            })
            .collect();
        entries.sort_by(|a, b| natural_cmp_ci(&a.text, &b.text).then_with(|| a.hash.cmp(&b.hash)));
        Ok(entries)
    }

    /// Sets or, with blank text, removes a translation in memory. Returns
    /// false when the hash is not a string of the source.
    pub fn set_translation(
        &mut self,
        source: &str,
        locale: &str,
        hash: &str,
        text: &str,
    ) -> Result<bool> {
        let locale = self.require_app_locale(locale)?;
        let source = self.source_mut(source)?;
        if !source.registry()?.contains(hash) {
            tracing::warn!(source = source.alias(), hash, "ignoring translation of unknown string");
            return Ok(false);
        }
        source.table(locale.name())?.set(hash, text);
        Ok(true)
    }

    /// Writes the table of `locale` and regenerates the client files.
    pub fn save_translations(&mut self, source: &str, locale: &str) -> Result<()> {
        self.require_configuration()?;
        let locale = self.require_app_locale(locale)?;
        self.source_mut(source)?
            .save_table(locale.name(), locale.label())?;
        self.write_client_files(true)?;
        Ok(())
    }

    /// Status of every source, in source order.
    pub fn status(&mut self) -> Result<Vec<SourceStatus>> {
        let locales = self.translated_locales();
        let mut statuses = Vec::with_capacity(self.sources.len());

        for source in &mut self.sources {
            let registry = source.registry()?;
            let mut untranslated = Vec::with_capacity(locales.len());
            for locale in &locales {
                untranslated.push(LocaleCount {
                    locale: locale.name().to_string(),
                    count: source.count_untranslated(locale.name())?,
                });
            }
            statuses.push(SourceStatus {
                id: source.id().to_string(),
                alias: source.alias().to_string(),
                label: source.label().to_string(),
                group: source.group().to_string(),
                scanned: source.is_scanned(),
                string_count: registry.len(),
                untranslated,
            });
        }

        Ok(statuses)
    }

    // ============================================================
    // Client files
    // ============================================================

    pub fn client_folder(&self) -> Option<&Path> {
        self.client_folder.as_deref()
    }

    /// `None` or an empty path disables client file generation.
    pub fn set_client_folder(&mut self, folder: Option<PathBuf>) {
        let folder = folder.filter(|f| !f.as_os_str().is_empty());
        if folder == self.client_folder {
            return;
        }
        self.client_folder = folder;
        self.events.client_folder_changed.emit(&ClientFolderChanged {
            folder: self.client_folder.clone(),
        });
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Key stored next to the client files. Changing it makes the next
    /// non-forced write regenerate them.
    pub fn set_cache_key(&mut self, key: &str) {
        if key == self.cache_key {
            return;
        }
        self.cache_key = key.to_string();
        self.events.cache_key_changed.emit(&CacheKeyChanged {
            key: self.cache_key.clone(),
        });
    }

    pub fn generator(&self) -> ClientGenerator {
        ClientGenerator::new(
            self.client_folder.as_deref(),
            &self.cache_key,
            self.locales(Namespace::Application).iter().copied(),
        )
    }

    pub fn artifact_list(&self) -> Vec<PathBuf> {
        self.generator().artifact_list()
    }

    pub fn write_client_files(&mut self, force: bool) -> Result<WriteOutcome> {
        let generator = self.generator();
        generator.write_files(&mut self.sources, force)
    }

    // ============================================================
    // Runtime translation
    // ============================================================

    /// Translator for the selected application locale.
    pub fn translator(&mut self) -> Result<Translator> {
        let locale = self.selected_locale(Namespace::Application)?;
        Translator::load(locale, &mut self.sources)
    }

    /// Translates `text` into the selected application locale.
    pub fn translate(&mut self, text: &str, args: &[&dyn Display]) -> Result<String> {
        Ok(self.translator()?.translate(text, args))
    }

    // ============================================================
    // Events
    // ============================================================

    pub fn on_locale_changed(
        &mut self,
        callback: impl Fn(&LocaleChanged) + Send + Sync + 'static,
    ) -> ListenerId {
        self.events.locale_changed.add(callback)
    }

    pub fn on_client_folder_changed(
        &mut self,
        callback: impl Fn(&ClientFolderChanged) + Send + Sync + 'static,
    ) -> ListenerId {
        self.events.client_folder_changed.add(callback)
    }

    pub fn on_cache_key_changed(
        &mut self,
        callback: impl Fn(&CacheKeyChanged) + Send + Sync + 'static,
    ) -> ListenerId {
        self.events.cache_key_changed.add(callback)
    }

    pub fn events_mut(&mut self) -> &mut EventHub {
        &mut self.events
    }
}
