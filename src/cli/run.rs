use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{extract::extract, fixes::fixes, init::init, scan::scan, suggest::suggest},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler selected by `args`.
///
/// Returns `ExitStatus::Success` after printing help when no command is given.
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments { command, .. }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Some(Command::Suggest(cmd)) => suggest(cmd),
        Some(Command::Fixes(cmd)) => fixes(cmd),
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
