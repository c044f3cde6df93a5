//! Suggest command - list the properties a document can reference.
//!
//! Properties come from the document's `<Import Project="..." />` files, in
//! import order. Unreadable imports are skipped (see `-v` for details).

use anyhow::Result;
use colored::Colorize;

use super::super::{args::SuggestCommand, exit_status::ExitStatus, report};
use super::helper::open_document;
use crate::editor::completions;

pub fn suggest(cmd: SuggestCommand) -> Result<ExitStatus> {
    let (document, _config) = open_document(&cmd.document)?;

    if cmd.json {
        let items = completions(&document);
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(ExitStatus::Success);
    }

    let properties = document.suggestions();
    if properties.is_empty() {
        println!(
            "{}",
            format!(
                "No properties available to {}",
                document.path.display()
            )
            .dimmed()
        );
    } else {
        report::print_suggestions(&properties);
    }

    Ok(ExitStatus::Success)
}
