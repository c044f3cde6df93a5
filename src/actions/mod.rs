//! Refactorings that modify files.
//!
//! ## Architecture
//!
//! ```text
//! ExtractionCandidate (value found on a line)
//!     ↓
//! ExtractProperty::prepare (name resolved, target file chosen)
//!     ↓
//! Operation (document replacement, property insertion)
//!     ↓
//! preview (dry run) or apply (document edit, then properties file rewrite)
//! ```

mod extract_property;
mod operation;

pub use extract_property::{
    DocumentEditor, ExtractProperty, ExtractionOutcome, FileDocumentEditor, NamePrompt,
    PropertyFileOutcome, WriteOptions, add_property, apply_extraction,
};
pub use operation::Operation;
