use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, StatusReport, helper::{finish, load_localization}};
use crate::cli::args::StatusCommand;
use crate::core::{NATIVE_LOCALE, Namespace};

pub fn status(cmd: StatusCommand) -> Result<CommandResult> {
    let mut l10n = load_localization(&cmd.common)?;

    if let Some(locale) = &cmd.locale {
        l10n.get_locale(locale, Namespace::Application)
            .with_context(|| format!("Invalid value for '--locale': \"{}\"", locale))?;
    }

    let mut sources = l10n.status().context("Failed to read translation status")?;
    if let Some(locale) = &cmd.locale {
        for source in &mut sources {
            source.untranslated.retain(|c| &c.locale == locale);
        }
    }

    let locales = match &cmd.locale {
        Some(locale) if locale != NATIVE_LOCALE => vec![locale.clone()],
        Some(_) => Vec::new(),
        None => l10n
            .translated_locales()
            .iter()
            .map(|l| l.name().to_string())
            .collect(),
    };

    let report = StatusReport { locales, sources };
    let untranslated = report.untranslated_total();
    Ok(finish(
        CommandSummary::Status(report),
        untranslated,
        cmd.fail_on_untranslated,
    ))
}
