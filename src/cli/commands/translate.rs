use anyhow::{Context, Result};

use super::{
    CommandResult, CommandSummary, TranslateReport,
    helper::{finish, load_localization},
};
use crate::cli::args::TranslateCommand;

/// Sets one translation and saves the table. An unknown hash leaves every
/// file untouched and fails the command.
pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let mut l10n = load_localization(&cmd.common)?;

    let applied = l10n
        .set_translation(&cmd.source, &cmd.locale, &cmd.hash, &cmd.text)
        .with_context(|| format!("Failed to set translation of '{}'", cmd.hash))?;
    if applied {
        l10n.save_translations(&cmd.source, &cmd.locale)
            .with_context(|| {
                format!(
                    "Failed to save translations of '{}' for '{}'",
                    cmd.source, cmd.locale
                )
            })?;
    }

    Ok(finish(
        CommandSummary::Translate(TranslateReport {
            removed: cmd.text.trim().is_empty(),
            source: cmd.source,
            locale: cmd.locale,
            hash: cmd.hash,
            applied,
        }),
        usize::from(!applied),
        true,
    ))
}
