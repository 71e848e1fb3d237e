use std::path::PathBuf;

use crate::cli::ExitStatus;
use crate::core::{EntryStatus, Namespace, ScanSummary, SourceStatus, WriteOutcome};

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanReport),
    Status(StatusReport),
    Strings(StringsReport),
    Translate(TranslateReport),
    Publish(PublishReport),
    Files(FilesReport),
    Locales(LocalesReport),
    Sources(SourcesReport),
    Init(InitReport),
}

#[derive(Debug)]
pub struct ScanReport {
    pub summaries: Vec<ScanSummary>,
}

#[derive(Debug)]
pub struct StatusReport {
    /// Non-native application locales included in the report.
    pub locales: Vec<String>,
    pub sources: Vec<SourceStatus>,
}

impl StatusReport {
    pub fn untranslated_total(&self) -> usize {
        self.sources
            .iter()
            .flat_map(|s| &s.untranslated)
            .map(|c| c.count)
            .sum()
    }
}

#[derive(Debug)]
pub struct StringsReport {
    pub source: String,
    pub locale: String,
    /// Strings of the source before filtering.
    pub total: usize,
    pub entries: Vec<EntryStatus>,
}

#[derive(Debug)]
pub struct TranslateReport {
    pub source: String,
    pub locale: String,
    pub hash: String,
    /// False when the hash is not a string of the source.
    pub applied: bool,
    /// True when an empty text removed the translation.
    pub removed: bool,
}

#[derive(Debug)]
pub struct PublishReport {
    pub outcome: WriteOutcome,
}

#[derive(Debug)]
pub struct FilesReport {
    pub folder: Option<PathBuf>,
    pub files: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct LocaleRow {
    pub name: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug)]
pub struct LocalesReport {
    /// None when every supported locale is listed.
    pub namespace: Option<Namespace>,
    pub locales: Vec<LocaleRow>,
}

#[derive(Debug)]
pub struct SourceRow {
    pub id: String,
    pub alias: String,
    pub label: String,
    pub roots: Vec<PathBuf>,
    pub storage_folder: PathBuf,
    pub scanned: bool,
}

#[derive(Debug)]
pub struct SourcesReport {
    /// Sources per group label, groups in order of appearance.
    pub groups: Vec<(String, Vec<SourceRow>)>,
}

#[derive(Debug)]
pub struct InitReport {
    pub created: bool,
}

/// Result of running locsync commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Problems that make the command fail, e.g. unreadable files during a
    /// scan or untranslated strings with `--fail-on-untranslated`.
    pub failure_count: usize,
    /// If false, problems are reported but exit status stays 0.
    pub exit_on_failures: bool,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_failures && self.failure_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
