use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, ScanReport, helper::{finish, load_localization}};
use crate::cli::args::ScanCommand;

/// Scans one source, or all of them, and stores the registries.
///
/// Unreadable files fail the command; lexical warnings do not.
pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let mut l10n = load_localization(&cmd.common)?;

    let summaries = match &cmd.source {
        Some(name) => vec![
            l10n.scan(name)
                .with_context(|| format!("Failed to scan source '{}'", name))?,
        ],
        None => l10n.scan_all().context("Failed to scan sources")?,
    };

    let failure_count = summaries.iter().map(|s| s.failures.len()).sum();
    Ok(finish(
        CommandSummary::Scan(ScanReport { summaries }),
        failure_count,
        true,
    ))
}
