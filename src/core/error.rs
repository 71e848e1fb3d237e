use std::path::PathBuf;

/// Errors surfaced by the localization core.
///
/// Configuration-class errors are fatal for the operation that raised them.
/// Lexical problems never show up here: they are reported as diagnostics
/// next to the token stream.
#[derive(Debug, thiserror::Error)]
pub enum LocalizationError {
    #[error("The localization configuration is incomplete: configure() has not been called")]
    NotConfigured,

    #[error("No localization storage folder set")]
    NoStorageFolder,

    #[error("No source folders have been defined, at least one source is required")]
    NoSources,

    #[error("Unknown locale namespace '{0}', expected 'application' or 'content'")]
    UnknownNamespace(String),

    #[error("The locale '{locale}' has not been added to the {namespace} namespace")]
    UnknownLocale { locale: String, namespace: String },

    #[error("Locale '{0}' is not supported")]
    UnsupportedLocale(String),

    #[error("No locale has been selected in the {0} namespace")]
    NoLocaleSelected(String),

    #[error("Unknown localization source '{requested}', available sources are: [{available}]")]
    UnknownSource { requested: String, available: String },

    #[error("Corrupt string registry file {path}: {reason}")]
    CorruptRegistry { path: PathBuf, reason: String },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LocalizationError {
    /// Stable identifier of the error kind, for callers that need to branch
    /// on it without matching on the message.
    pub fn code(&self) -> &'static str {
        match self {
            LocalizationError::NotConfigured => "not-configured",
            LocalizationError::NoStorageFolder => "no-storage-folder",
            LocalizationError::NoSources => "no-sources",
            LocalizationError::UnknownNamespace(_) => "unknown-namespace",
            LocalizationError::UnknownLocale { .. } => "unknown-locale",
            LocalizationError::UnsupportedLocale(_) => "unsupported-locale",
            LocalizationError::NoLocaleSelected(_) => "no-locale-selected",
            LocalizationError::UnknownSource { .. } => "unknown-source",
            LocalizationError::CorruptRegistry { .. } => "corrupt-registry",
            LocalizationError::Io { .. } => "io",
        }
    }

    /// True for errors caused by missing or inconsistent configuration.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, LocalizationError::Io { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LocalizationError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LocalizationError>;
