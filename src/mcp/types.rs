use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{EntryStatus, ScanSummary, SourceStatus};

// ============================================================
// Parameters
// ============================================================

/// Parameters of tools that only need the project.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    /// Absolute path of the project root (where .locsyncrc.json lives)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListLocalesParams {
    /// Absolute path of the project root (where .locsyncrc.json lives)
    pub project_root_path: String,
    /// "application" (default) or "content"
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetStringsParams {
    /// Absolute path of the project root (where .locsyncrc.json lives)
    pub project_root_path: String,
    /// Source alias or id
    pub source: String,
    /// Application locale name, e.g. "de_DE"
    pub locale: String,
    /// Only return strings without a translation (default: false)
    pub untranslated_only: Option<bool>,
    /// Number of items to skip (default: 0)
    pub offset: Option<u32>,
    /// Maximum number of items (default: 50, max: 100)
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationInput {
    /// Hash of the string as returned by get_strings
    pub hash: String,
    /// Translated text. An empty text removes the translation
    pub text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTranslationParams {
    /// Absolute path of the project root (where .locsyncrc.json lives)
    pub project_root_path: String,
    /// Source alias or id
    pub source: String,
    /// Application locale name, e.g. "de_DE"
    pub locale: String,
    pub translations: Vec<TranslationInput>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanParams {
    /// Absolute path of the project root (where .locsyncrc.json lives)
    pub project_root_path: String,
    /// Source alias or id. All sources are scanned when omitted
    pub source: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishParams {
    /// Absolute path of the project root (where .locsyncrc.json lives)
    pub project_root_path: String,
    /// Rewrite the files even when the cache key is unchanged (default: false)
    pub force: Option<bool>,
}

// ============================================================
// Shared
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

// ============================================================
// Locales Types (list_locales)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalesResult {
    pub namespace: String,
    pub selected: Option<String>,
    pub locales: Vec<LocaleInfo>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    pub name: String,
    pub label: String,
    pub language: String,
    pub currency: String,
    pub native: bool,
}

// ============================================================
// Sources Types (list_sources)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourcesResult {
    pub sources: Vec<SourceInfo>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub id: String,
    pub alias: String,
    pub label: String,
    pub group: String,
    pub roots: Vec<String>,
    pub storage_folder: String,
    pub scanned: bool,
}

// ============================================================
// Status Types (get_status)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResult {
    /// Non-native application locales
    pub locales: Vec<String>,
    pub total_untranslated: usize,
    pub sources: Vec<SourceStatusItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatusItem {
    pub id: String,
    pub alias: String,
    pub label: String,
    pub scanned: bool,
    pub string_count: usize,
    pub untranslated: Vec<UntranslatedCount>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UntranslatedCount {
    pub locale: String,
    pub count: usize,
}

impl From<SourceStatus> for SourceStatusItem {
    fn from(status: SourceStatus) -> Self {
        Self {
            id: status.id,
            alias: status.alias,
            label: status.label,
            scanned: status.scanned,
            string_count: status.string_count,
            untranslated: status
                .untranslated
                .into_iter()
                .map(|c| UntranslatedCount {
                    locale: c.locale,
                    count: c.count,
                })
                .collect(),
        }
    }
}

// ============================================================
// Strings Types (get_strings)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StringsResult {
    pub source: String,
    pub locale: String,
    pub total_count: usize,
    pub untranslated_count: usize,
    pub items: Vec<StringItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StringItem {
    pub hash: String,
    pub text: String,
    pub translation: Option<String>,
    pub files: Vec<String>,
    pub call_count: usize,
    /// "server" and/or "client"
    pub families: Vec<String>,
}

impl From<EntryStatus> for StringItem {
    fn from(entry: EntryStatus) -> Self {
        Self {
            hash: entry.hash,
            text: entry.text,
            translation: entry.translation,
            files: entry.files,
            call_count: entry.call_count,
            families: entry.families.iter().map(|f| f.to_string()).collect(),
        }
    }
}

// ============================================================
// SetTranslation Types (set_translation)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTranslationResult {
    /// True if every hash was known and the table was saved
    pub success: bool,
    pub applied_count: usize,
    pub removed_count: usize,
    /// Hashes that are not strings of the source; nothing was stored for them
    pub unknown_hashes: Vec<String>,
    /// Untranslated strings left in the source for this locale
    pub untranslated_count: usize,
}

// ============================================================
// Scan Types (scan)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub sources: Vec<ScanSourceResult>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanSourceResult {
    pub source: String,
    pub files_scanned: usize,
    pub string_count: usize,
    pub added: usize,
    pub removed: usize,
    pub failures: Vec<ScanFailureItem>,
    pub warnings: Vec<ScanWarningItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanFailureItem {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanWarningItem {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub problem: String,
}

impl From<ScanSummary> for ScanSourceResult {
    fn from(summary: ScanSummary) -> Self {
        Self {
            source: summary.source,
            files_scanned: summary.files_scanned,
            string_count: summary.string_count,
            added: summary.added,
            removed: summary.removed,
            failures: summary
                .failures
                .into_iter()
                .map(|f| ScanFailureItem {
                    path: f.path.to_string_lossy().to_string(),
                    reason: f.reason,
                })
                .collect(),
            warnings: summary
                .warnings
                .into_iter()
                .map(|w| ScanWarningItem {
                    file: w.file,
                    line: w.diagnostic.line,
                    column: w.diagnostic.column,
                    problem: w.diagnostic.problem.to_string(),
                })
                .collect(),
        }
    }
}

// ============================================================
// Publish Types (publish)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    /// "disabled", "upToDate" or "written"
    pub status: String,
    pub client_folder: Option<String>,
    pub files: Vec<String>,
}
