//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `suggest`: List the properties a project file can reference
//! - `fixes`: List the quick fixes offered for one line
//! - `extract`: Extract a value on one line into a property
//! - `scan`: Find hardcoded package versions across a project tree
//! - `init`: Initialize csprops configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

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
}

#[derive(Debug, Args)]
pub struct SuggestCommand {
    /// Project or properties file
    pub document: PathBuf,

    /// Print completion items as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct FixesCommand {
    /// Project or properties file
    pub document: PathBuf,

    /// Line to inspect (1-based)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub line: u32,

    /// Print code actions as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Project or properties file
    pub document: PathBuf,

    /// Line holding the value (1-based)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub line: u32,

    /// Which value on the line to extract (1-based, element first, then attributes)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub candidate: u32,

    /// Property name (prompted for when the value has no derived name)
    #[arg(long)]
    pub name: Option<String>,

    /// Actually modify files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Directory to scan (default: current directory)
    pub path: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the properties available to a project file through its imports
    Suggest(SuggestCommand),
    /// List the quick fixes offered for a line
    Fixes(FixesCommand),
    /// Replace a literal value with a property reference and declare the property
    Extract(ExtractCommand),
    /// Report hardcoded package versions that could be extracted
    Scan(ScanCommand),
    /// Initialize a new .cspropsrc.json configuration file
    Init,
}
