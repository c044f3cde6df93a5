use std::fmt;

use serde::Serialize;

/// Where on the line the literal value was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateKind {
    /// Text content of `<Tag>value</Tag>`.
    Element,
    /// Value of `name="value"`.
    Attribute,
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateKind::Element => write!(f, "element"),
            CandidateKind::Attribute => write!(f, "attribute"),
        }
    }
}

/// Byte range of a value within a single line.
///
/// `line[start..end]` is exactly the literal value, so replacing that slice with
/// the candidate's replacement text is always a well-formed substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// A literal value on one line that can be replaced by a `$(Name)` reference.
///
/// Computed fresh for every request and never persisted. All candidates returned
/// by one detection call come from the same line and form one sibling batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionCandidate {
    pub kind: CandidateKind,
    /// Element tag or attribute name holding the value.
    pub source_name: String,
    /// Literal value text as written on the line.
    pub value: String,
    pub span: Span,
    /// Proposed property name; empty when it has to be supplied by the user.
    pub property_name: String,
    /// `$(property_name)`, or empty when the name is unknown.
    pub replacement_text: String,
    pub is_preferred: bool,
}

impl ExtractionCandidate {
    /// True when the candidate carries a usable property name.
    pub fn has_property_name(&self) -> bool {
        !self.property_name.is_empty()
    }

    /// Rebind the candidate to another property name.
    pub fn with_property_name(mut self, name: impl Into<String>) -> Self {
        self.property_name = name.into();
        self.replacement_text = crate::utils::property_reference(&self.property_name);
        self
    }
}
