use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, StringsReport, helper::{finish, load_localization}};
use crate::cli::args::StringsCommand;

pub fn strings(cmd: StringsCommand) -> Result<CommandResult> {
    let mut l10n = load_localization(&cmd.common)?;

    let mut entries = l10n.entries(&cmd.source, &cmd.locale).with_context(|| {
        format!(
            "Failed to list strings of '{}' for '{}'",
            cmd.source, cmd.locale
        )
    })?;
    let total = entries.len();
    if cmd.untranslated {
        entries.retain(|e| !e.is_translated());
    }

    Ok(finish(
        CommandSummary::Strings(StringsReport {
            source: cmd.source,
            locale: cmd.locale,
            total,
            entries,
        }),
        0,
        false,
    ))
}
