//! Low-level changes an extraction performs, with a dry-run preview.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{ExtractionCandidate, Property};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Replace a literal value in the document with a property reference.
    ReplaceValue {
        document: PathBuf,
        /// 1-based.
        line: usize,
        source_line: String,
        candidate: ExtractionCandidate,
    },
    /// Declare a property in a properties file unless it already exists.
    AddProperty { file: PathBuf, property: Property },
}

impl Operation {
    pub fn preview(&self) {
        self.preview_to(&mut io::stdout().lock());
    }

    pub fn preview_to<W: Write>(&self, writer: &mut W) {
        match self {
            Operation::ReplaceValue {
                document,
                line,
                source_line,
                candidate,
            } => {
                let col = source_line
                    .get(..candidate.span.start)
                    .map(|prefix| prefix.chars().count() + 1)
                    .unwrap_or(1);
                let _ = writeln!(
                    writer,
                    "  {} {}:{}:{}",
                    "-->".blue(),
                    document.display(),
                    line,
                    col
                );

                let width = line.to_string().len();
                let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);
                let _ = writeln!(
                    writer,
                    "{} {} {}",
                    line.to_string().blue(),
                    "|".blue(),
                    source_line
                );

                let prefix = source_line.get(..candidate.span.start).unwrap_or("");
                let padding = UnicodeWidthStr::width(prefix);
                let underline = "^".repeat(UnicodeWidthStr::width(candidate.value.as_str()).max(1));
                let _ = writeln!(
                    writer,
                    "{:>width$} {} {:>padding$}{} {}",
                    "",
                    "|".blue(),
                    "",
                    underline.yellow(),
                    format!("replace with {}", candidate.replacement_text).yellow(),
                    width = width,
                    padding = padding
                );
            }
            Operation::AddProperty { file, property } => {
                let _ = writeln!(
                    writer,
                    "  {} {}",
                    "-->".blue(),
                    file.display()
                );
                let _ = writeln!(
                    writer,
                    "  {} {}",
                    "+".green(),
                    format!("<{0}>{1}</{0}>", property.name, property.value).green()
                );
            }
        }
    }
}
