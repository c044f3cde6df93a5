//! Lenient property extraction from properties files.
//!
//! This is the fast path used for suggestions: the file is flattened to one
//! line and matched with patterns, so half-edited or otherwise invalid XML still
//! yields whatever properties can be recognized. Only the first
//! `<PropertyGroup>` of a file is considered.

use std::{fs, path::Path, sync::LazyLock};

use regex::Regex;

use crate::core::{Property, PropsError};

// Comments, including commented-out properties.
static COMMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<!--.*?-->").unwrap());

// First <PropertyGroup>...</PropertyGroup> of the flattened file.
static PROPERTY_GROUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<PropertyGroup>(.+?)</PropertyGroup>").unwrap());

// <Name>Value</Name>. The tag excludes `!`/`?` so processing instructions and
// CDATA are skipped, and the value stops at the next `<` so an empty
// element cannot swallow its siblings.
static PROPERTY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^<>/!?\s]+)>([^<]*)</([^<>]+)>").unwrap());

/// Read a properties file and extract its declared properties.
///
/// Returns [`PropsError::FileRead`] when the file cannot be read; callers are
/// expected to log it and treat the file as declaring nothing.
pub fn extract_properties(path: &Path) -> Result<Vec<Property>, PropsError> {
    let content = fs::read_to_string(path).map_err(|source| PropsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_properties(&content))
}

/// Extract the properties of the first property group in `content`.
///
/// Comments are removed first, so commented-out properties are not reported.
/// Names and values are returned exactly as written, in declaration order.
/// Later duplicates of a name are kept as separate entries.
pub fn parse_properties(content: &str) -> Vec<Property> {
    let flattened: String = content.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    let flattened = COMMENT_REGEX.replace_all(&flattened, "");

    let Some(group) = PROPERTY_GROUP_REGEX
        .captures(&flattened)
        .and_then(|caps| caps.get(1))
    else {
        return Vec::new();
    };

    PROPERTY_REGEX
        .captures_iter(group.as_str())
        .map(|caps| Property::new(&caps[1], &caps[2]))
        .collect()
}
