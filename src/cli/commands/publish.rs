use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, PublishReport, helper::{finish, load_localization}};
use crate::cli::args::PublishCommand;
use crate::core::WriteOutcome;

pub fn publish(cmd: PublishCommand) -> Result<CommandResult> {
    let mut l10n = load_localization(&cmd.common)?;
    l10n.require_configuration()?;

    let outcome = l10n
        .write_client_files(cmd.force)
        .context("Failed to write client files")?;
    let failure_count = usize::from(outcome == WriteOutcome::Disabled);

    Ok(finish(
        CommandSummary::Publish(PublishReport { outcome }),
        failure_count,
        true,
    ))
}
