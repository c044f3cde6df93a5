//! Known properties of a document, gathered from its imports.

use std::path::Path;

use crate::core::{Property, extract_properties, resolve_imports};

/// Collect the properties a document can reference.
///
/// Imports are visited in declaration order and each file contributes its
/// properties in declaration order. An unreadable import is logged and skipped;
/// the remaining imports are still visited. Names declared by several files are
/// all returned.
pub fn build_suggestions(document_text: &str, document_dir: &Path) -> Vec<Property> {
    let mut suggestions = Vec::new();

    for import in resolve_imports(document_text, document_dir) {
        match extract_properties(&import.resolved_path) {
            Ok(properties) => {
                tracing::debug!(
                    "{} declares {} propert(ies)",
                    import.resolved_path.display(),
                    properties.len()
                );
                suggestions.extend(properties);
            }
            Err(e) => {
                tracing::warn!("Skipping import \"{}\": {}", import.raw_path, e);
            }
        }
    }

    suggestions
}
