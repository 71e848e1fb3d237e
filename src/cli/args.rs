//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Extract strings from one or all sources
//! - `status`: Untranslated counts per source and locale
//! - `strings`: List the strings of a source with their translations
//! - `translate`: Set or remove one translation
//! - `publish`: Write the client files
//! - `files`: List the client files that `publish` writes
//! - `locales`: List locales of a namespace
//! - `sources`: List configured sources
//! - `init`: Create a `.locsyncrc.json`
//! - `serve`: Start the MCP server

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::Namespace;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.common().is_some_and(|common| common.verbose)
    }

    pub fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Scan(cmd)) => Some(&cmd.common),
            Some(Command::Status(cmd)) => Some(&cmd.common),
            Some(Command::Strings(cmd)) => Some(&cmd.common),
            Some(Command::Translate(cmd)) => Some(&cmd.common),
            Some(Command::Publish(cmd)) => Some(&cmd.common),
            Some(Command::Files(cmd)) => Some(&cmd.common),
            Some(Command::Locales(cmd)) => Some(&cmd.common),
            Some(Command::Sources(cmd)) => Some(&cmd.common),
            Some(Command::Init) | Some(Command::Serve) | None => None,
        }
    }
}

/// Common arguments shared by all project commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project directory to search for the config file (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Storage folder for registries and translations (overrides config file)
    #[arg(long)]
    pub storage_folder: Option<PathBuf>,

    /// Folder for the generated client files (overrides config file)
    #[arg(long)]
    pub client_folder: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Alias or id of the source to scan (default: all sources)
    #[arg(long)]
    pub source: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Only report this application locale
    #[arg(long)]
    pub locale: Option<String>,

    /// Exit with status 1 when any string is untranslated
    #[arg(long)]
    pub fail_on_untranslated: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct StringsCommand {
    /// Alias or id of the source
    #[arg(long)]
    pub source: String,

    /// Application locale whose translations are shown
    #[arg(long)]
    pub locale: String,

    /// Only list strings without a translation
    #[arg(long)]
    pub untranslated: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// Alias or id of the source
    #[arg(long)]
    pub source: String,

    /// Application locale of the translation
    #[arg(long)]
    pub locale: String,

    /// Hash of the string, as listed by `strings`
    pub hash: String,

    /// Translated text. An empty text removes the translation
    pub text: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct PublishCommand {
    /// Rewrite the client files even when the cache key is unchanged
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FilesCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamespaceArg {
    App,
    Content,
}

impl From<NamespaceArg> for Namespace {
    fn from(arg: NamespaceArg) -> Self {
        match arg {
            NamespaceArg::App => Namespace::Application,
            NamespaceArg::Content => Namespace::Content,
        }
    }
}

#[derive(Debug, Args)]
pub struct LocalesCommand {
    /// Namespace to list (default: app)
    #[arg(long, value_enum, default_value = "app")]
    pub namespace: NamespaceArg,

    /// List every supported locale instead
    #[arg(long)]
    pub supported: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SourcesCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings from the source folders
    Scan(ScanCommand),
    /// Show untranslated string counts per source and locale
    Status(StatusCommand),
    /// List the strings of a source with their translations
    Strings(StringsCommand),
    /// Set or remove the translation of one string
    Translate(TranslateCommand),
    /// Write the client translation files
    Publish(PublishCommand),
    /// List the client files written by publish
    Files(FilesCommand),
    /// List the locales of a namespace
    Locales(LocalesCommand),
    /// List the configured sources
    Sources(SourcesCommand),
    /// Initialize a new .locsyncrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
