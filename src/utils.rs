//! Common utility functions shared across the codebase.

use std::sync::LazyLock;

use regex::Regex;

// A value that is nothing but a single property reference: $(Name)
static PROPERTY_REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\([A-Za-z_][A-Za-z0-9_]*\)$").unwrap());

/// Normalizes text into an MSBuild-safe property identifier.
///
/// Path separators, dots and any other punctuation are stripped; only ASCII
/// letters, digits and underscores survive. A leading digit gets an underscore
/// prefix so the result is always a valid identifier (or empty).
///
/// # Examples
///
/// ```
/// use csprops::utils::slugify;
///
/// assert_eq!(slugify("Newtonsoft.Json"), "NewtonsoftJson");
/// assert_eq!(slugify("libs/shared\\Core.dll"), "libssharedCoredll");
/// assert_eq!(slugify("7zip"), "_7zip");
/// assert_eq!(slugify("..."), "");
/// ```
pub fn slugify(text: &str) -> String {
    let slug: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    match slug.chars().next() {
        Some(first) if first.is_ascii_digit() => format!("_{}", slug),
        _ => slug,
    }
}

/// Checks if the text is a valid MSBuild property name.
///
/// Letters, digits and underscores only, not starting with a digit.
pub fn is_property_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Checks if a value is already a single `$(Name)` property reference.
pub fn is_property_reference(value: &str) -> bool {
    PROPERTY_REFERENCE_REGEX.is_match(value.trim())
}

/// Formats the `$(Name)` reference text for a property.
pub fn property_reference(name: &str) -> String {
    format!("$({})", name)
}
