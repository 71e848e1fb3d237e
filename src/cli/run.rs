//! Dispatches parsed arguments to the command handlers.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult,
        init::init,
        listing::{files, locales, sources},
        publish::publish,
        scan::scan,
        status::status,
        strings::strings,
        translate::translate,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Status(cmd)) => status(cmd),
        Some(Command::Strings(cmd)) => strings(cmd),
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Publish(cmd)) => publish(cmd),
        Some(Command::Files(cmd)) => files(cmd),
        Some(Command::Locales(cmd)) => locales(cmd),
        Some(Command::Sources(cmd)) => sources(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            anyhow::bail!("Serve command should be handled before run()")
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
