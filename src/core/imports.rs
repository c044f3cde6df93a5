//! Import resolution for project documents.
//!
//! Finds every self-closing `<Import Project="..." />` declaration in a document
//! and resolves its path against the document's directory. Whether the target
//! exists is not checked here; readers of the resolved files handle that.

use std::{
    path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::core::ImportReference;

// <Import Project="shared.props" />, possibly spread over several lines.
// Imports carrying extra attributes (Condition, Sdk, ...) are not matched.
static IMPORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<Import\s+Project="([^"]*)"\s*/>"#).unwrap());

/// Resolve all imports of a document, in declaration order.
///
/// The whole text is matched at once, so declarations split across lines are
/// found. Duplicate declarations are yielded once per occurrence.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use csprops::core::resolve_imports;
///
/// let text = r#"<Project><Import Project="shared.props" /></Project>"#;
/// let imports: Vec<_> = resolve_imports(text, Path::new("/proj")).collect();
/// assert_eq!(imports[0].resolved_path, Path::new("/proj/shared.props"));
/// ```
pub fn resolve_imports<'a>(
    document_text: &'a str,
    document_dir: &'a Path,
) -> impl Iterator<Item = ImportReference> + 'a {
    IMPORT_REGEX
        .captures_iter(document_text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|raw| !raw.trim().is_empty())
        .map(move |raw| ImportReference::new(raw, resolve_import_path(document_dir, raw)))
}

/// The file a new property is written to: the first import of the document.
pub fn first_import(document_text: &str, document_dir: &Path) -> Option<ImportReference> {
    resolve_imports(document_text, document_dir).next()
}

/// Join an import path onto the document directory.
///
/// MSBuild files usually use `\` separators; they are accepted on every platform.
/// `.` and `..` segments are folded lexically.
pub fn resolve_import_path(document_dir: &Path, raw_path: &str) -> PathBuf {
    let native = raw_path.trim().replace('\\', MAIN_SEPARATOR_STR);
    normalize_path(&document_dir.join(native))
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` is still `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().map(|c| c.as_os_str()).collect()
}
