use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures of the property resolution and extraction engine.
///
/// Read and parse failures are normally caught where they happen, logged and
/// treated as "nothing from this file"; the host never sees them as crashes.
#[derive(Debug, Error)]
pub enum PropsError {
    /// An imported file is missing or unreadable.
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A properties file is not well-formed XML (rewrite path only).
    #[error("failed to parse {} at byte {position}: {message}", path.display())]
    FileParse {
        path: PathBuf,
        position: u64,
        message: String,
    },

    /// The rewritten properties file could not be serialized or stored.
    #[error("failed to write {}: {message}", path.display())]
    FileWrite { path: PathBuf, message: String },

    /// Neither detector found a value on the selected line.
    #[error("no extractable value on line {line}")]
    NoExtractableValue { line: usize },

    /// The user cancelled or left the property name blank.
    #[error("no property name was supplied")]
    MissingPropertyName,

    /// The document has no `<Import Project="..." />` to write the property into.
    #[error("{} does not import any properties file", document.display())]
    NoPropertiesFile { document: PathBuf },
}

impl PropsError {
    /// Cancellations are ordinary user actions rather than failures.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, PropsError::MissingPropertyName)
    }
}
