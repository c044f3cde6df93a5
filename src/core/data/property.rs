use std::path::PathBuf;

use serde::Serialize;

/// An `<Import Project="..." />` declaration found in a project document.
///
/// Recomputed on every query; documents change too often to cache these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    /// The `Project` attribute value as written (usually relative).
    pub raw_path: String,
    /// `raw_path` joined onto the importing document's directory.
    pub resolved_path: PathBuf,
}

impl ImportReference {
    pub fn new(raw_path: impl Into<String>, resolved_path: impl Into<PathBuf>) -> Self {
        Self {
            raw_path: raw_path.into(),
            resolved_path: resolved_path.into(),
        }
    }
}

/// A `<Name>Value</Name>` entry declared in a property group.
///
/// Both fields hold the literal text from the file; entities are not decoded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
