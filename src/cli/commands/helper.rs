use std::env;

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary};
use crate::cli::CommonArgs;
use crate::config::{ConfigOverrides, load_config};
use crate::core::Localization;

/// Loads the config found from `--root` (or the working directory), applies
/// the command line overrides and builds the context.
pub fn load_localization(common: &CommonArgs) -> Result<Localization> {
    let start_dir = match &common.root {
        Some(root) => root.clone(),
        None => env::current_dir().context("Failed to determine the working directory")?,
    };

    let loaded = load_config(&start_dir)?;
    if !loaded.from_file {
        tracing::debug!(dir = %start_dir.display(), "no config file found, using defaults");
    }

    let mut config = loaded.config;
    config.apply_overrides(&ConfigOverrides {
        storage_folder: common.storage_folder.clone(),
        client_folder: common.client_folder.clone(),
    });
    config.validate()?;

    config.localization(&loaded.root)
}

pub fn finish(
    summary: CommandSummary,
    failure_count: usize,
    exit_on_failures: bool,
) -> CommandResult {
    CommandResult {
        summary,
        failure_count,
        exit_on_failures,
    }
}
