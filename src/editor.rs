//! Shapes exchanged with an editor host.
//!
//! Positions follow the LSP convention: 0-based lines, columns counted in UTF-16
//! code units. The engine itself works on byte offsets within one line; the
//! conversion happens here and nowhere else.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::Value;

use crate::{
    config::Config,
    core::{
        ExtractionCandidate, ImportReference, Property, PropsError, Span, ValueSiteDetector,
        build_suggestions, first_import,
    },
};

/// Command the host runs after applying an extraction edit.
/// Arguments: properties file path, property name, property value.
pub const EXTRACT_PROPERTY_COMMAND: &str = "csprops.extractProperty";
/// Command opening an external URL. Argument: the URL.
pub const OPEN_LINK_COMMAND: &str = "csprops.openLink";
pub const LEARN_MORE_TITLE: &str = "Learn more about MSBuild properties";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty range at the start of `line`.
    pub fn at_line(line: u32) -> Self {
        let position = Position::new(line, 0);
        Self::new(position, position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

/// An open document: its path on disk and its current, possibly unsaved, text.
#[derive(Debug, Clone)]
pub struct TextDocument {
    pub path: PathBuf,
    pub text: String,
}

impl TextDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Load a document from disk.
    pub fn open(path: &Path) -> Result<Self, PropsError> {
        let text = fs::read_to_string(path).map_err(|source| PropsError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, text))
    }

    /// Directory imports are resolved against.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }

    /// Text of a 0-based line, without its line terminator.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.text.lines().nth(index)
    }

    /// Properties declared by the document's imports.
    pub fn suggestions(&self) -> Vec<Property> {
        build_suggestions(&self.text, self.dir())
    }

    /// The properties file new properties are written to.
    pub fn properties_file(&self) -> Option<ImportReference> {
        first_import(&self.text, self.dir())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub label: String,
    pub insert_text: String,
    /// Markdown.
    pub documentation: String,
}

impl From<&Property> for CompletionItem {
    fn from(property: &Property) -> Self {
        Self {
            label: property.name.clone(),
            insert_text: crate::utils::property_reference(&property.name),
            documentation: format!(
                "*{}* refers a value as **{}**.",
                property.name, property.value
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub title: String,
    pub command: String,
    pub arguments: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAction {
    pub title: String,
    pub is_preferred: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<TextEdit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,
}

/// Completion items for every property the document can reference, in order.
pub fn completions(document: &TextDocument) -> Vec<CompletionItem> {
    document
        .suggestions()
        .iter()
        .map(CompletionItem::from)
        .collect()
}

/// Quick fixes for the line at `range.start`.
///
/// One extraction action per candidate with a known property name, offered only
/// when the document imports a properties file, followed by the learn-more action.
pub fn code_actions(document: &TextDocument, range: Range, config: &Config) -> Vec<CodeAction> {
    let mut actions = Vec::new();
    let line_index = range.start.line;

    match (document.line(line_index as usize), document.properties_file()) {
        (Some(line), Some(target)) => {
            let detector = ValueSiteDetector::new(config.property_suffix.as_str());
            actions.extend(
                detector
                    .detect(line)
                    .named()
                    .map(|candidate| extraction_action(line_index, line, candidate, &target.resolved_path)),
            );
        }
        (Some(_), None) => {
            tracing::debug!("{} has no imports; no extraction offered", document.path.display());
        }
        (None, _) => {}
    }

    actions.push(learn_more_action(&config.learn_more_url));
    actions
}

/// Extraction quick fix: replace the value in the document, then let the host
/// run [`EXTRACT_PROPERTY_COMMAND`] to persist the property.
pub fn extraction_action(
    line_index: u32,
    line: &str,
    candidate: &ExtractionCandidate,
    properties_file: &Path,
) -> CodeAction {
    CodeAction {
        title: format!(
            "Extract '{}' to {}",
            candidate.value, candidate.replacement_text
        ),
        is_preferred: candidate.is_preferred,
        edit: Some(TextEdit {
            range: span_range(line_index, line, candidate.span),
            new_text: candidate.replacement_text.clone(),
        }),
        command: Some(Command {
            title: format!("Add {} to properties file", candidate.property_name),
            command: EXTRACT_PROPERTY_COMMAND.to_string(),
            arguments: vec![
                Value::String(properties_file.display().to_string()),
                Value::String(candidate.property_name.clone()),
                Value::String(candidate.value.clone()),
            ],
        }),
    }
}

pub fn learn_more_action(url: &str) -> CodeAction {
    CodeAction {
        title: LEARN_MORE_TITLE.to_string(),
        is_preferred: false,
        edit: None,
        command: Some(Command {
            title: LEARN_MORE_TITLE.to_string(),
            command: OPEN_LINK_COMMAND.to_string(),
            arguments: vec![Value::String(url.to_string())],
        }),
    }
}

/// Document range covering a byte span of one line.
pub fn span_range(line_index: u32, line: &str, span: Span) -> Range {
    Range::new(
        Position::new(line_index, utf16_column(line, span.start)),
        Position::new(line_index, utf16_column(line, span.end)),
    )
}

/// UTF-16 column of a byte offset within `line`.
pub fn utf16_column(line: &str, byte_offset: usize) -> u32 {
    let prefix = line.get(..byte_offset).unwrap_or(line);
    prefix.encode_utf16().count() as u32
}

/// Byte offset of a UTF-16 column, or `None` if it is past the end of the line
/// or inside a surrogate pair.
pub fn byte_offset(line: &str, character: u32) -> Option<usize> {
    let target = character as usize;
    let mut units = 0;
    for (idx, ch) in line.char_indices() {
        if units == target {
            return Some(idx);
        }
        if units > target {
            return None;
        }
        units += ch.len_utf16();
    }
    (units == target).then_some(line.len())
}

fn offset_at(text: &str, position: Position) -> Option<usize> {
    let mut line_start = 0;
    for _ in 0..position.line {
        line_start += text[line_start..].find('\n')? + 1;
    }

    let rest = &text[line_start..];
    let line_end = rest.find('\n').unwrap_or(rest.len());
    let line = &rest[..line_end];
    let line = line.strip_suffix('\r').unwrap_or(line);

    byte_offset(line, position.character).map(|offset| line_start + offset)
}

/// Apply an edit to the full text of a document.
///
/// Returns `None` when the range does not lie within the text.
pub fn apply_text_edit(text: &str, edit: &TextEdit) -> Option<String> {
    let start = offset_at(text, edit.range.start)?;
    let end = offset_at(text, edit.range.end)?;
    if start > end {
        return None;
    }

    let mut result = String::with_capacity(text.len() - (end - start) + edit.new_text.len());
    result.push_str(&text[..start]);
    result.push_str(&edit.new_text);
    result.push_str(&text[end..]);
    Some(result)
}
