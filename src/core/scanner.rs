//! Source tree walker.
//!
//! Enumerates the files of a source, tokenizes and extracts them in parallel
//! and hands back every discovered string. Building the registry from the
//! outcome is left to the caller and happens on one thread.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::extract::{DiscoveredString, extract_source};
use super::language::Language;
use super::source::Source;
use super::tokenizer::LexicalDiagnostic;
use crate::utils::relative_slash_path;

/// A file or directory entry that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// A recoverable lexical problem in a scanned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    /// Path relative to its scan root.
    pub file: String,
    pub diagnostic: LexicalDiagnostic,
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub strings: Vec<DiscoveredString>,
    pub files_scanned: usize,
    pub failures: Vec<ScanFailure>,
    pub warnings: Vec<ScanWarning>,
}

/// Walk settings of one source.
#[derive(Debug, Clone, Copy)]
pub struct ScanRules<'a> {
    pub excluded_folders: &'a [String],
    pub excluded_files: &'a [String],
    pub unicode: bool,
}

impl<'a> ScanRules<'a> {
    pub fn for_source(source: &'a Source, unicode: bool) -> Self {
        Self {
            excluded_folders: source.excluded_folders(),
            excluded_files: source.excluded_files(),
            unicode,
        }
    }

    fn is_excluded_folder(&self, name: &str) -> bool {
        self.excluded_folders.iter().any(|folder| folder == name)
    }

    fn is_excluded_file(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.excluded_files
            .iter()
            .any(|fragment| !fragment.is_empty() && name.contains(&fragment.to_lowercase()))
    }
}

struct Candidate {
    root: PathBuf,
    path: PathBuf,
    language: Language,
}

/// Scans every root of `source`.
pub fn scan_source(source: &Source, unicode: bool) -> ScanOutcome {
    scan_roots(source.roots(), ScanRules::for_source(source, unicode))
}

/// Scans `roots` with `rules`. The result does not depend on traversal or
/// thread scheduling order.
pub fn scan_roots(roots: &[PathBuf], rules: ScanRules<'_>) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let mut candidates = Vec::new();

    for root in roots {
        collect_candidates(root, &rules, &mut candidates, &mut outcome.failures);
    }
    extract_candidates(&candidates, rules.unicode, &mut outcome);

    outcome
}

/// Reads and extracts `candidates` in parallel, then folds the results into
/// `outcome` in candidate order.
fn extract_candidates(candidates: &[Candidate], unicode: bool, outcome: &mut ScanOutcome) {
    let results: Vec<_> = candidates
        .par_iter()
        .map(|candidate| {
            let file = relative_slash_path(&candidate.root, &candidate.path);
            let extraction = fs::read(&candidate.path).map(|bytes| {
                let content = String::from_utf8_lossy(&bytes);
                extract_source(candidate.language, &content, &file, unicode)
            });
            (candidate, file, extraction)
        })
        .collect();

    for (candidate, file, extraction) in results {
        match extraction {
            Ok(extraction) => {
                tracing::debug!(file = %file, strings = extraction.strings.len(), "scanned");
                outcome.files_scanned += 1;
                outcome.strings.extend(extraction.strings);
                for diagnostic in extraction.diagnostics {
                    tracing::warn!(file = %file, "{}", diagnostic);
                    outcome.warnings.push(ScanWarning {
                        file: file.clone(),
                        diagnostic,
                    });
                }
            }
            Err(err) => {
                tracing::warn!(path = %candidate.path.display(), "cannot read file: {}", err);
                outcome.failures.push(ScanFailure {
                    path: candidate.path.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
}

fn collect_candidates(
    root: &Path,
    rules: &ScanRules<'_>,
    candidates: &mut Vec<Candidate>,
    failures: &mut Vec<ScanFailure>,
) {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !rules.is_excluded_folder(&entry.file_name().to_string_lossy())
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                tracing::warn!(path = %path.display(), "cannot access path: {}", err);
                failures.push(ScanFailure {
                    path,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if rules.is_excluded_file(&entry.file_name().to_string_lossy()) {
            continue;
        }
        let Some(language) = Language::for_path(entry.path()) else {
            continue;
        };

        candidates.push(Candidate {
            root: root.to_path_buf(),
            path: entry.into_path(),
            language,
        });
    }
}
