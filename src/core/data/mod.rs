//! Core data types shared by the resolver, detectors and writer.
//!
//! ## Module Structure
//!
//! - `property`: Import references and declared properties
//! - `candidate`: Extraction candidates found on a line of a project file

pub mod candidate;
pub mod property;

pub use candidate::{CandidateKind, ExtractionCandidate, Span};
pub use property::{ImportReference, Property};
