//! Project-wide discovery of hardcoded values.
//!
//! Walks a directory tree, keeps the files matching the include globs, and runs
//! the value-site detector over every line of each file in parallel.

use std::{
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::core::{ExtractionCandidate, detect::ValueSiteDetector};

/// Files selected by a scan.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted, without duplicates.
    pub files: Vec<PathBuf>,
    /// Entries that could not be visited.
    pub skipped_count: usize,
}

/// One preferred candidate found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFinding {
    pub file_path: PathBuf,
    /// 1-based line number.
    pub line: usize,
    pub source_line: String,
    pub candidate: ExtractionCandidate,
}

fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!("Invalid glob pattern '{}': {}", p, e);
                None
            }
        })
        .collect()
}

/// Collect the files under `base_dir` that match `includes` and none of `ignores`.
///
/// Patterns are matched against paths relative to `base_dir`, using `/` as
/// separator.
pub fn scan_files(base_dir: &Path, includes: &[String], ignores: &[String]) -> ScanResult {
    let include_patterns = compile_patterns(includes);
    let ignore_patterns = compile_patterns(ignores);

    let mut files = Vec::new();
    let mut skipped_count = 0;

    for entry in WalkDir::new(base_dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::warn!("Cannot access path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = relative_pattern_path(base_dir, path);

        if ignore_patterns.iter().any(|p| p.matches(&relative)) {
            continue;
        }
        if include_patterns.iter().any(|p| p.matches(&relative)) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();

    ScanResult {
        files,
        skipped_count,
    }
}

fn relative_pattern_path(base_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Preferred candidates of one file, in line order.
///
/// An unreadable file is logged and yields nothing.
pub fn scan_file(path: &Path, detector: &ValueSiteDetector) -> Vec<ScanFinding> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Skipping {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    content
        .lines()
        .enumerate()
        .flat_map(|(idx, line)| {
            detector
                .detect(line)
                .into_vec()
                .into_iter()
                .filter(|candidate| candidate.is_preferred)
                .map(move |candidate| ScanFinding {
                    file_path: path.to_path_buf(),
                    line: idx + 1,
                    source_line: line.to_string(),
                    candidate,
                })
        })
        .collect()
}

/// Detect candidates in every file, in parallel. Results are sorted by path and line.
pub fn find_candidates(files: &[PathBuf], detector: &ValueSiteDetector) -> Vec<ScanFinding> {
    let mut findings: Vec<ScanFinding> = files
        .par_iter()
        .flat_map_iter(|path| scan_file(path, detector))
        .collect();

    findings.sort_by(|a, b| {
        a.file_path
            .cmp(&b.file_path)
            .then(a.line.cmp(&b.line))
            .then(a.candidate.span.start.cmp(&b.candidate.span.start))
    });
    findings
}
