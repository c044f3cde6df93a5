use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{
    config::{Config, load_config},
    editor::TextDocument,
};

/// Directory a config search starts from; relative paths are made absolute so
/// the search can walk up past them.
pub fn config_start_dir(dir: &Path) -> PathBuf {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}

/// Open a document and the configuration that applies to it.
pub fn open_document(path: &Path) -> Result<(TextDocument, Config)> {
    let document = TextDocument::open(path)
        .with_context(|| format!("Failed to open document: {}", path.display()))?;
    let config = load_config(&config_start_dir(document.dir()))?.config;
    Ok((document, config))
}
