use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::{Locale, Localization, Namespace, SourceDefinition};

pub const CONFIG_FILE_NAME: &str = ".locsyncrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Folder holding one storage folder per source.
    #[serde(default = "default_storage_folder")]
    pub storage_folder: String,
    /// Where client files are written. Empty disables them.
    #[serde(default)]
    pub client_folder: String,
    #[serde(default)]
    pub cache_key: String,
    #[serde(default)]
    pub app_locales: Vec<String>,
    #[serde(default)]
    pub content_locales: Vec<String>,
    /// Unicode character classes when tokenizing; `false` is ASCII-only.
    #[serde(default = "default_unicode")]
    pub unicode: bool,
    /// Folder names skipped in every source.
    #[serde(default)]
    pub exclude_folders: Vec<String>,
    /// File name fragments skipped in every source.
    #[serde(default)]
    pub exclude_files: Vec<String>,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    pub alias: String,
    pub label: String,
    #[serde(default)]
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_folder: Option<String>,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub exclude_folders: Vec<String>,
    #[serde(default)]
    pub exclude_files: Vec<String>,
}

fn default_storage_folder() -> String {
    "./localization".to_string()
}

fn default_unicode() -> bool {
    true
}

fn default_sources() -> Vec<SourceConfig> {
    vec![SourceConfig {
        alias: "app".to_string(),
        label: "Application".to_string(),
        group: String::new(),
        storage_folder: None,
        paths: vec!["./".to_string()],
        exclude_folders: [".git", "node_modules", "vendor"].map(String::from).to_vec(),
        exclude_files: Vec::new(),
    }]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_folder: default_storage_folder(),
            client_folder: String::new(),
            cache_key: String::new(),
            app_locales: Vec::new(),
            content_locales: Vec::new(),
            unicode: default_unicode(),
            exclude_folders: Vec::new(),
            exclude_files: Vec::new(),
            sources: default_sources(),
        }
    }
}

/// Values given on the command line, taking precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub storage_folder: Option<PathBuf>,
    pub client_folder: Option<PathBuf>,
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error naming the offending field for unsupported locales,
    /// duplicate or empty source aliases and sources without paths.
    pub fn validate(&self) -> Result<()> {
        for (field, locales) in [
            ("appLocales", &self.app_locales),
            ("contentLocales", &self.content_locales),
        ] {
            for name in locales {
                if !Locale::is_supported(name) {
                    bail!(
                        "Unsupported locale in '{}': \"{}\" (supported: {})",
                        field,
                        name,
                        Localization::supported_locale_names().join(", ")
                    );
                }
            }
        }

        let mut aliases = HashSet::new();
        for source in &self.sources {
            if source.alias.trim().is_empty() {
                bail!("Empty alias in 'sources'");
            }
            if !aliases.insert(source.alias.as_str()) {
                bail!("Duplicate alias in 'sources': \"{}\"", source.alias);
            }
            if source.paths.is_empty() {
                bail!("Source \"{}\" in 'sources' has no 'paths'", source.alias);
            }
        }

        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(folder) = &overrides.storage_folder {
            self.storage_folder = folder.to_string_lossy().into_owned();
        }
        if let Some(folder) = &overrides.client_folder {
            self.client_folder = folder.to_string_lossy().into_owned();
        }
    }

    /// Builds a configured context. Relative paths are resolved against
    /// `root`. Client files are not written here.
    pub fn localization(&self, root: &Path) -> Result<Localization> {
        let mut l10n = Localization::new();

        for name in &self.app_locales {
            l10n.add_locale(name, Namespace::Application)
                .with_context(|| format!("Invalid entry in 'appLocales': \"{}\"", name))?;
        }
        for name in &self.content_locales {
            l10n.add_locale(name, Namespace::Content)
                .with_context(|| format!("Invalid entry in 'contentLocales': \"{}\"", name))?;
        }

        l10n.configure(resolve(root, &self.storage_folder), None)?;
        if !self.client_folder.is_empty() {
            l10n.set_client_folder(Some(resolve(root, &self.client_folder)));
        }
        l10n.set_cache_key(&self.cache_key);
        l10n.set_unicode(self.unicode);
        for folder in &self.exclude_folders {
            l10n.add_exclude_folder(folder);
        }
        for file in &self.exclude_files {
            l10n.add_exclude_file(file);
        }

        for source in &self.sources {
            let definition = SourceDefinition {
                alias: source.alias.clone(),
                label: source.label.clone(),
                group: source.group.clone(),
                storage_folder: source.storage_folder.as_deref().map(|f| resolve(root, f)),
                roots: source.paths.iter().map(|p| resolve(root, p)).collect(),
                excluded_folders: source.exclude_folders.clone(),
                excluded_files: source.exclude_files.clone(),
            };
            l10n.add_source(definition)
                .with_context(|| format!("Failed to add source \"{}\"", source.alias))?;
        }

        Ok(l10n)
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .fold(root.to_path_buf(), |acc, c| acc.join(c))
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory relative paths are resolved against: the one holding the
    /// config file, or the start directory.
    pub root: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                root,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            root: start_dir.to_path_buf(),
        }),
    }
}
