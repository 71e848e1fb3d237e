//! Localization engine.
//!
//! Scanning runs leaves first: [`tokenizer`] turns a file into tokens,
//! [`extract`] finds the marker calls, [`scanner`] walks the source folders
//! and [`registry`] collapses the findings into one entry per text.
//! [`translation`] stores the per-locale tables and [`generator`] renders
//! the client files. [`context::Localization`] ties it all together.

pub mod context;
pub mod error;
pub mod events;
pub mod extract;
pub mod generator;
pub mod language;
pub mod locale;
pub mod registry;
pub mod scanner;
pub mod source;
pub mod tokenizer;
pub mod translation;
pub mod translator;

pub use context::{EntryStatus, LocaleCount, Localization, ScanSummary, SourceStatus};
pub use error::{LocalizationError, Result};
pub use events::{CacheKeyChanged, ClientFolderChanged, ListenerId, LocaleChanged};
pub use extract::DiscoveredString;
pub use generator::{ClientGenerator, WriteOutcome};
pub use language::{Family, Language};
pub use locale::{Locale, NATIVE_LOCALE, Namespace};
pub use registry::{Registry, StringEntry};
pub use scanner::{ScanFailure, ScanOutcome, ScanWarning};
pub use source::{Source, SourceDefinition};
pub use translation::TranslationTable;
pub use translator::Translator;
