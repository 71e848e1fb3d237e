//! Read-only listings of locales, sources and client files.

use anyhow::Result;

use super::{
    CommandResult, CommandSummary, FilesReport, LocaleRow, LocalesReport, SourceRow,
    SourcesReport,
    helper::{finish, load_localization},
};
use crate::cli::args::{FilesCommand, LocalesCommand, SourcesCommand};
use crate::core::{Locale, Namespace};

pub fn locales(cmd: LocalesCommand) -> Result<CommandResult> {
    let report = if cmd.supported {
        LocalesReport {
            namespace: None,
            locales: Locale::supported()
                .map(|locale| LocaleRow {
                    name: locale.name(),
                    label: locale.label(),
                    selected: false,
                })
                .collect(),
        }
    } else {
        let l10n = load_localization(&cmd.common)?;
        let namespace = Namespace::from(cmd.namespace);
        let selected = l10n.selected_locale(namespace).ok();
        LocalesReport {
            namespace: Some(namespace),
            locales: l10n
                .locales(namespace)
                .iter()
                .map(|locale| LocaleRow {
                    name: locale.name(),
                    label: locale.label(),
                    selected: selected == Some(*locale),
                })
                .collect(),
        }
    };

    Ok(finish(CommandSummary::Locales(report), 0, false))
}

pub fn sources(cmd: SourcesCommand) -> Result<CommandResult> {
    let l10n = load_localization(&cmd.common)?;

    let groups = l10n
        .sources_grouped()
        .into_iter()
        .map(|(group, sources)| {
            let rows = sources
                .into_iter()
                .map(|source| SourceRow {
                    id: source.id().to_string(),
                    alias: source.alias().to_string(),
                    label: source.label().to_string(),
                    roots: source.roots().to_vec(),
                    storage_folder: source.storage_folder().to_path_buf(),
                    scanned: source.is_scanned(),
                })
                .collect();
            (group.to_string(), rows)
        })
        .collect();

    Ok(finish(
        CommandSummary::Sources(SourcesReport { groups }),
        0,
        false,
    ))
}

pub fn files(cmd: FilesCommand) -> Result<CommandResult> {
    let l10n = load_localization(&cmd.common)?;

    Ok(finish(
        CommandSummary::Files(FilesReport {
            folder: l10n.client_folder().map(|f| f.to_path_buf()),
            files: l10n.artifact_list(),
        }),
        0,
        false,
    ))
}
