//! Scan command - find hardcoded package versions across a project tree.
//!
//! Reports every value that has a derived property name (attributes next to an
//! `Include`), i.e. what `extract` could move into a properties file without
//! asking for a name.

use std::path::Path;

use anyhow::{Result, bail};

use super::super::{exit_status::ExitStatus, args::ScanCommand, report};
use super::helper::config_start_dir;
use crate::{
    config::load_config,
    core::{
        ValueSiteDetector,
        scanner::{find_candidates, scan_files},
    },
};

pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let base_dir = config_start_dir(cmd.path.as_deref().unwrap_or(Path::new(".")));
    if !base_dir.is_dir() {
        bail!("{} is not a directory", base_dir.display());
    }

    let config = load_config(&base_dir)?.config;
    let scanned = scan_files(&base_dir, &config.includes, &config.ignores);
    if scanned.skipped_count > 0 {
        report::print_warning(&format!(
            "{} path(s) could not be accessed",
            scanned.skipped_count
        ));
    }

    let detector = ValueSiteDetector::new(config.property_suffix.as_str());
    let findings = find_candidates(&scanned.files, &detector);

    if findings.is_empty() {
        let count = scanned.files.len();
        report::print_success(&format!(
            "Checked {} project {} - no hardcoded values found",
            count,
            if count == 1 { "file" } else { "files" }
        ));
        return Ok(ExitStatus::Success);
    }

    report::report_findings(&findings, &base_dir);
    Ok(ExitStatus::Failure)
}
