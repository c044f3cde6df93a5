//! Detection of extractable literal values on a single line.
//!
//! Two independent detectors run over the same line:
//!
//! - **Element**: the first `<Tag>value</Tag>` on the line. The proposed
//!   property is named after the tag.
//! - **Attribute**: every `name="value"` on the line. When the line carries an
//!   `Include` attribute (an MSBuild item reference), every other attribute is
//!   named after the slugified `Include` value plus a suffix, e.g.
//!   `Include="Newtonsoft.Json" Version="13.0.1"` proposes `NewtonsoftJsonVersion`.
//!
//! Spans are byte offsets into the line; replacing `line[span.start..span.end]`
//! with the candidate's replacement text is always a valid substitution.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    core::{CandidateKind, ExtractionCandidate, Span},
    utils::{is_property_identifier, is_property_reference, property_reference, slugify},
};

/// Attribute naming the item a line refers to.
pub const INCLUDE_ATTRIBUTE: &str = "Include";

/// Suffix appended to the slugified `Include` value.
pub const DEFAULT_PROPERTY_SUFFIX: &str = "Version";

// <Tag>value</Tag>; the tag cannot hold attributes, comments or closing slashes.
static ELEMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^<>/!?\s]+)>([^<]+)</([^<>]+)>").unwrap());

// Start of an attribute: `name="`. The name may be empty (`<A ="x">`), which
// makes the whole line malformed for attribute detection.
static ATTRIBUTE_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([^\s="'<>/]*)=""#).unwrap());

// What may follow the quote that closes an attribute value: another quote,
// the end of the tag, the end of the line, or whitespace and the next `name=`.
static VALUE_END_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?:"|\s*/?>|\s*$|\s+[^\s="'<>/]+=)"#).unwrap());

/// Candidates found on one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineCandidates {
    pub element: Option<ExtractionCandidate>,
    pub attributes: Vec<ExtractionCandidate>,
}

impl LineCandidates {
    pub fn is_empty(&self) -> bool {
        self.element.is_none() && self.attributes.is_empty()
    }

    /// Element candidate first, then attributes in line order.
    pub fn iter(&self) -> impl Iterator<Item = &ExtractionCandidate> {
        self.element.iter().chain(self.attributes.iter())
    }

    pub fn into_vec(self) -> Vec<ExtractionCandidate> {
        self.element.into_iter().chain(self.attributes).collect()
    }

    /// Candidates whose property name is already known.
    pub fn named(&self) -> impl Iterator<Item = &ExtractionCandidate> {
        self.iter().filter(|c| c.has_property_name())
    }
}

/// Detects extractable values; carries the naming configuration.
#[derive(Debug, Clone)]
pub struct ValueSiteDetector {
    property_suffix: String,
}

impl Default for ValueSiteDetector {
    fn default() -> Self {
        Self::new(DEFAULT_PROPERTY_SUFFIX)
    }
}

impl ValueSiteDetector {
    pub fn new(property_suffix: impl Into<String>) -> Self {
        Self {
            property_suffix: property_suffix.into(),
        }
    }

    /// Run both detectors over one line of text.
    pub fn detect(&self, line: &str) -> LineCandidates {
        LineCandidates {
            element: detect_element(line),
            attributes: self.detect_attributes(line),
        }
    }

    /// Attribute candidates of one line, `Include` excluded.
    ///
    /// Candidates without an `Include` sibling keep an empty property name and
    /// are not preferred. A match with an empty name or value aborts the pass.
    pub fn detect_attributes(&self, line: &str) -> Vec<ExtractionCandidate> {
        let Some(attributes) = scan_attributes(line) else {
            return Vec::new();
        };

        let include_value = attributes
            .iter()
            .find(|attr| attr.name == INCLUDE_ATTRIBUTE)
            .map(|attr| attr.value);
        let sibling_name = include_value.and_then(|value| self.include_property_name(value));

        attributes
            .iter()
            .filter(|attr| attr.name != INCLUDE_ATTRIBUTE)
            .filter(|attr| !is_property_reference(attr.value))
            .map(|attr| {
                let candidate = ExtractionCandidate {
                    kind: CandidateKind::Attribute,
                    source_name: attr.name.to_string(),
                    value: attr.value.to_string(),
                    span: attr.span,
                    property_name: String::new(),
                    replacement_text: String::new(),
                    is_preferred: false,
                };
                match &sibling_name {
                    Some(name) => ExtractionCandidate {
                        is_preferred: true,
                        ..candidate.with_property_name(name)
                    },
                    None => candidate,
                }
            })
            .collect()
    }

    /// Property name derived from an `Include` value, if it forms an identifier.
    pub fn include_property_name(&self, include_value: &str) -> Option<String> {
        let name = format!("{}{}", slugify(include_value), self.property_suffix);
        is_property_identifier(&name).then_some(name)
    }
}

/// Run both detectors with the default suffix.
pub fn detect_candidates(line: &str) -> LineCandidates {
    ValueSiteDetector::default().detect(line)
}

/// The first `<Tag>value</Tag>` on the line, named after its tag.
pub fn detect_element(line: &str) -> Option<ExtractionCandidate> {
    let caps = ELEMENT_REGEX.captures(line)?;
    let tag = caps.get(1)?;
    let value = caps.get(2)?;

    if tag.as_str().is_empty()
        || value.as_str().is_empty()
        || is_property_reference(value.as_str())
    {
        return None;
    }

    let property_name = if is_property_identifier(tag.as_str()) {
        tag.as_str().to_string()
    } else {
        slugify(tag.as_str())
    };
    if property_name.is_empty() {
        return None;
    }

    Some(ExtractionCandidate {
        kind: CandidateKind::Element,
        source_name: tag.as_str().to_string(),
        value: value.as_str().to_string(),
        span: Span::new(value.start(), value.end()),
        replacement_text: property_reference(&property_name),
        property_name,
        is_preferred: false,
    })
}

struct RawAttribute<'a> {
    name: &'a str,
    value: &'a str,
    span: Span,
}

/// Split a line into `name="value"` pairs.
///
/// Scanning resumes after each value's closing quote, so spans never overlap
/// even when several attributes hold the same text. Returns `None` when any
/// pair has an empty name or value.
fn scan_attributes(line: &str) -> Option<Vec<RawAttribute<'_>>> {
    let mut attributes = Vec::new();
    let mut search_from = 0;

    while let Some(caps) = ATTRIBUTE_START_REGEX.captures_at(line, search_from) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let value_start = whole.end();
        let Some(value_end) = find_value_end(line, value_start) else {
            // Unterminated value, e.g. a tag continuing on the next line.
            break;
        };

        let value = &line[value_start..value_end];
        if name.as_str().is_empty() || value.is_empty() {
            return None;
        }

        attributes.push(RawAttribute {
            name: name.as_str(),
            value,
            span: Span::new(value_start, value_end),
        });
        search_from = value_end + 1;
    }

    Some(attributes)
}

/// Offset of the quote closing the value that starts at `value_start`.
fn find_value_end(line: &str, value_start: usize) -> Option<usize> {
    line[value_start..]
        .match_indices('"')
        .map(|(offset, _)| value_start + offset)
        .find(|&quote| VALUE_END_REGEX.is_match(&line[quote + 1..]))
}
