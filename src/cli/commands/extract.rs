//! Extract command - replace a literal value with a property reference.
//!
//! The value is replaced in the document and the property is declared in the
//! document's first imported properties file. A property that already exists
//! there is not written again.
//!
//! Use `--apply` to modify files (default is dry-run mode).

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use colored::Colorize;

use super::super::{
    args::ExtractCommand,
    exit_status::ExitStatus,
    report::{self, SUCCESS_MARK},
};
use super::helper::open_document;
use crate::{
    actions::{ExtractProperty, FileDocumentEditor, NamePrompt, PropertyFileOutcome, WriteOptions},
    core::{ExtractionCandidate, PropsError, ValueSiteDetector},
    utils::slugify,
};

/// Reads a property name from stdin.
struct StdinPrompt;

impl NamePrompt for StdinPrompt {
    fn prompt_name(&mut self, candidate: &ExtractionCandidate) -> Option<String> {
        eprint!(
            "Property name for {}=\"{}\": ",
            candidate.source_name, candidate.value
        );
        io::stderr().flush().ok();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(answer),
        }
    }
}

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let (document, config) = open_document(&cmd.document)?;
    let line_index = cmd.line - 1;

    let Some(line) = document.line(line_index as usize) else {
        bail!("{} has no line {}", document.path.display(), cmd.line);
    };

    let candidates = ValueSiteDetector::new(config.property_suffix.as_str())
        .detect(line)
        .into_vec();
    if candidates.is_empty() {
        report::print_warning(
            &PropsError::NoExtractableValue {
                line: cmd.line as usize,
            }
            .to_string(),
        );
        return Ok(ExitStatus::Failure);
    }

    let Some(candidate) = candidates.get(cmd.candidate as usize - 1) else {
        bail!(
            "line {} has {} extractable value(s), --candidate {} is out of range",
            cmd.line,
            candidates.len(),
            cmd.candidate
        );
    };

    let candidate = match cmd.name.as_deref() {
        Some(name) => {
            let name = slugify(name.trim());
            if name.is_empty() {
                return Ok(cancelled());
            }
            candidate.clone().with_property_name(name)
        }
        None => candidate.clone(),
    };

    let extraction =
        match ExtractProperty::prepare(&document, line_index, &candidate, &mut StdinPrompt) {
            Ok(extraction) => extraction,
            Err(e) if e.is_cancellation() => return Ok(cancelled()),
            Err(e) => return Err(e.into()),
        };

    if !cmd.apply {
        extraction.preview();
        println!(
            "{} '{}' as {} in {}.",
            "Would extract".yellow().bold(),
            extraction.candidate().value,
            extraction.candidate().replacement_text,
            extraction.properties_file().display()
        );
        println!("Run with {} to apply this change.", "--apply".cyan());
        return Ok(ExitStatus::Failure);
    }

    let outcome = extraction.apply(&mut FileDocumentEditor, WriteOptions::from(&config))?;

    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Replaced '{}' with {} in {}",
            outcome.property.value,
            outcome.edit.new_text,
            document.path.display()
        )
        .green()
    );

    match outcome.file {
        PropertyFileOutcome::Added => {
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Added {} to {}",
                    outcome.property.name,
                    outcome.properties_file.display()
                )
                .green()
            );
            Ok(ExitStatus::Success)
        }
        PropertyFileOutcome::AlreadyPresent => {
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "{} is already declared in {}",
                    outcome.property.name,
                    outcome.properties_file.display()
                )
                .green()
            );
            Ok(ExitStatus::Success)
        }
        PropertyFileOutcome::Failed(e) => {
            report::print_warning(&format!(
                "{} was not added: {} (the document was still updated)",
                outcome.property.name, e
            ));
            Ok(ExitStatus::Failure)
        }
    }
}

fn cancelled() -> ExitStatus {
    println!("{}", "Extraction cancelled.".dimmed());
    ExitStatus::Success
}
