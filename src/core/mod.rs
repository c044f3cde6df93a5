//! Property resolution and extraction engine.
//!
//! - `imports` / `properties` / `suggestions`: what a document can reference
//! - `detect`: literal values on a line that could become properties
//! - `props_file`: structured rewrite of the properties file receiving a new property
//! - `scanner`: the same detection across a project tree

pub mod data;
pub mod detect;
pub mod error;
pub mod imports;
pub mod properties;
pub mod props_file;
pub mod scanner;
pub mod suggestions;

pub use data::{CandidateKind, ExtractionCandidate, ImportReference, Property, Span};
pub use detect::{LineCandidates, ValueSiteDetector, detect_candidates, detect_element};
pub use error::PropsError;
pub use imports::{first_import, resolve_import_path, resolve_imports};
pub use properties::{extract_properties, parse_properties};
pub use props_file::{InsertOutcome, PropsFile};
pub use suggestions::build_suggestions;
