//! Report formatting and printing utilities.
//!
//! Output follows the cargo style: a headline, a `-->` location, and the source
//! line framed by a `|` gutter with a caret underline.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::{
    core::{Property, scanner::ScanFinding},
    editor::CodeAction,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

/// Print known properties, one `$(Name) = value` per line.
pub fn print_suggestions_to<W: Write>(properties: &[Property], writer: &mut W) {
    let name_width = properties
        .iter()
        .map(|p| UnicodeWidthStr::width(p.name.as_str()) + 3)
        .max()
        .unwrap_or(0);

    for property in properties {
        let reference = format!("$({})", property.name);
        let _ = writeln!(
            writer,
            "{:<width$} = {}",
            reference.cyan(),
            property.value,
            width = name_width
        );
    }
}

pub fn print_suggestions(properties: &[Property]) {
    print_suggestions_to(properties, &mut io::stdout().lock());
}

/// Print code actions as a numbered list.
pub fn print_code_actions_to<W: Write>(actions: &[CodeAction], writer: &mut W) {
    for (idx, action) in actions.iter().enumerate() {
        let marker = if action.is_preferred {
            format!(" {}", "(preferred)".green())
        } else {
            String::new()
        };
        let _ = writeln!(writer, "[{}] {}{}", idx + 1, action.title, marker);
    }
}

pub fn print_code_actions(actions: &[CodeAction]) {
    print_code_actions_to(actions, &mut io::stdout().lock());
}

/// Print scan findings, paths shown relative to `base_dir`.
pub fn report_findings_to<W: Write>(findings: &[ScanFinding], base_dir: &Path, writer: &mut W) {
    if findings.is_empty() {
        return;
    }

    let max_line_width = findings
        .iter()
        .map(|f| f.line.to_string().len())
        .max()
        .unwrap_or(1);

    for finding in findings {
        print_finding(finding, base_dir, writer, max_line_width);
    }

    let file_count = {
        let mut files: Vec<&Path> = findings.iter().map(|f| f.file_path.as_path()).collect();
        files.dedup();
        files.len()
    };
    let _ = writeln!(
        writer,
        "{} {} hardcoded {} in {} {}",
        FAILURE_MARK.red(),
        findings.len(),
        plural(findings.len(), "value", "values"),
        file_count,
        plural(file_count, "file", "files")
    );
}

pub fn report_findings(findings: &[ScanFinding], base_dir: &Path) {
    report_findings_to(findings, base_dir, &mut io::stdout().lock());
}

fn print_finding<W: Write>(
    finding: &ScanFinding,
    base_dir: &Path,
    writer: &mut W,
    max_line_width: usize,
) {
    let candidate = &finding.candidate;
    let display_path = finding
        .file_path
        .strip_prefix(base_dir)
        .unwrap_or(&finding.file_path);
    let prefix = finding
        .source_line
        .get(..candidate.span.start)
        .unwrap_or("");
    let col = prefix.chars().count() + 1;

    let _ = writeln!(
        writer,
        "{}: \"{}\" could be {}  {}",
        "warning".bold().yellow(),
        candidate.value,
        candidate.replacement_text,
        "hardcoded-value".dimmed().cyan()
    );
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        display_path.display(),
        finding.line,
        col
    );
    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        finding.line.to_string().blue(),
        "|".blue(),
        finding.source_line,
        width = max_line_width
    );

    let caret_padding = UnicodeWidthStr::width(prefix);
    let underline = "^".repeat(UnicodeWidthStr::width(candidate.value.as_str()).max(1));
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        underline.yellow(),
        width = max_line_width,
        padding = caret_padding
    );
    let _ = writeln!(writer);
}

/// Print a success line, e.g. `✓ Checked 3 project files - no hardcoded values found`.
pub fn print_success(message: &str) {
    println!("{} {}", SUCCESS_MARK.green(), message.green());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "warning:".bold().yellow(), message);
}
