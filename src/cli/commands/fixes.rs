//! Fixes command - show the quick fixes an editor would offer on a line.

use anyhow::Result;

use super::super::{args::FixesCommand, exit_status::ExitStatus, report};
use super::helper::open_document;
use crate::editor::{Range, code_actions};

pub fn fixes(cmd: FixesCommand) -> Result<ExitStatus> {
    let (document, config) = open_document(&cmd.document)?;
    let actions = code_actions(&document, Range::at_line(cmd.line - 1), &config);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&actions)?);
    } else {
        report::print_code_actions(&actions);
    }

    Ok(ExitStatus::Success)
}
