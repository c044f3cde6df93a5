//! Extract-to-property: replace a literal value with `$(Name)` and declare the
//! property in the document's first imported properties file.
//!
//! The document edit is handed to a [`DocumentEditor`]; the properties file is
//! rewritten here. The two steps are not transactional: if the properties file
//! cannot be read, parsed or written, the failure is logged and reported in the
//! outcome, and the document edit stays applied.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{
    actions::Operation,
    config::Config,
    core::{ExtractionCandidate, InsertOutcome, Property, PropsError, PropsFile},
    editor::{TextDocument, TextEdit, apply_text_edit, span_range},
    utils::slugify,
};

/// Supplies a property name when a candidate has none.
///
/// Returning `None` (or a blank string) cancels the extraction.
pub trait NamePrompt {
    fn prompt_name(&mut self, candidate: &ExtractionCandidate) -> Option<String>;
}

impl<F> NamePrompt for F
where
    F: FnMut(&ExtractionCandidate) -> Option<String>,
{
    fn prompt_name(&mut self, candidate: &ExtractionCandidate) -> Option<String> {
        self(candidate)
    }
}

/// Applies text edits to documents on behalf of the host.
pub trait DocumentEditor {
    fn apply_edit(&mut self, document: &TextDocument, edit: &TextEdit) -> Result<(), PropsError>;
}

/// Edits documents directly on disk.
#[derive(Debug, Default)]
pub struct FileDocumentEditor;

impl DocumentEditor for FileDocumentEditor {
    fn apply_edit(&mut self, document: &TextDocument, edit: &TextEdit) -> Result<(), PropsError> {
        let updated =
            apply_text_edit(&document.text, edit).ok_or_else(|| PropsError::FileWrite {
                path: document.path.clone(),
                message: "edit range is outside the document".to_string(),
            })?;
        fs::write(&document.path, updated).map_err(|e| PropsError::FileWrite {
            path: document.path.clone(),
            message: e.to_string(),
        })
    }
}

/// How the properties file is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub indent: usize,
    pub atomic: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            atomic: false,
        }
    }
}

impl From<&Config> for WriteOptions {
    fn from(config: &Config) -> Self {
        Self {
            indent: config.indent,
            atomic: config.atomic_writes,
        }
    }
}

/// What happened to the properties file.
#[derive(Debug)]
pub enum PropertyFileOutcome {
    Added,
    /// A property of that name was already declared; the file was not touched.
    AlreadyPresent,
    /// Reading, parsing or writing failed; the document edit was kept.
    Failed(PropsError),
}

impl From<InsertOutcome> for PropertyFileOutcome {
    fn from(outcome: InsertOutcome) -> Self {
        match outcome {
            InsertOutcome::Added => PropertyFileOutcome::Added,
            InsertOutcome::AlreadyPresent => PropertyFileOutcome::AlreadyPresent,
        }
    }
}

#[derive(Debug)]
pub struct ExtractionOutcome {
    pub property: Property,
    pub properties_file: PathBuf,
    pub edit: TextEdit,
    pub file: PropertyFileOutcome,
}

/// A fully resolved extraction, ready to preview or apply.
#[derive(Debug, Clone)]
pub struct ExtractProperty {
    document: TextDocument,
    line_index: u32,
    source_line: String,
    candidate: ExtractionCandidate,
    properties_file: PathBuf,
}

impl ExtractProperty {
    /// Resolve the property name and target file for `candidate`, found on the
    /// 0-based line `line_index` of `document`.
    ///
    /// Nothing is modified. A candidate without a name asks `prompt`; a blank
    /// answer gives [`PropsError::MissingPropertyName`]. Names typed by the user
    /// are slugified.
    pub fn prepare(
        document: &TextDocument,
        line_index: u32,
        candidate: &ExtractionCandidate,
        prompt: &mut dyn NamePrompt,
    ) -> Result<Self, PropsError> {
        let line_number = line_index as usize + 1;
        let source_line = document
            .line(line_index as usize)
            .ok_or(PropsError::NoExtractableValue { line: line_number })?;
        if source_line.get(candidate.span.start..candidate.span.end) != Some(candidate.value.as_str())
        {
            return Err(PropsError::NoExtractableValue { line: line_number });
        }

        let properties_file = document
            .properties_file()
            .ok_or_else(|| PropsError::NoPropertiesFile {
                document: document.path.clone(),
            })?
            .resolved_path;

        let candidate = if candidate.has_property_name() {
            candidate.clone()
        } else {
            let name = prompt
                .prompt_name(candidate)
                .map(|name| slugify(name.trim()))
                .unwrap_or_default();
            if name.is_empty() {
                tracing::debug!("Extraction on line {} cancelled", line_number);
                return Err(PropsError::MissingPropertyName);
            }
            candidate.clone().with_property_name(name)
        };

        Ok(Self {
            document: document.clone(),
            line_index,
            source_line: source_line.to_string(),
            candidate,
            properties_file,
        })
    }

    pub fn candidate(&self) -> &ExtractionCandidate {
        &self.candidate
    }

    pub fn properties_file(&self) -> &Path {
        &self.properties_file
    }

    pub fn property(&self) -> Property {
        Property::new(&self.candidate.property_name, &self.candidate.value)
    }

    /// Replacement of the value by its property reference.
    pub fn text_edit(&self) -> TextEdit {
        TextEdit {
            range: span_range(self.line_index, &self.source_line, self.candidate.span),
            new_text: self.candidate.replacement_text.clone(),
        }
    }

    pub fn to_operations(&self) -> Vec<Operation> {
        vec![
            Operation::ReplaceValue {
                document: self.document.path.clone(),
                line: self.line_index as usize + 1,
                source_line: self.source_line.clone(),
                candidate: self.candidate.clone(),
            },
            Operation::AddProperty {
                file: self.properties_file.clone(),
                property: self.property(),
            },
        ]
    }

    /// Dry run.
    pub fn preview(&self) {
        self.preview_to(&mut io::stdout().lock());
    }

    pub fn preview_to<W: Write>(&self, writer: &mut W) {
        for op in self.to_operations() {
            op.preview_to(writer);
        }
    }

    /// Edit the document, then add the property to the properties file.
    ///
    /// Only a failing document edit is returned as an error; properties file
    /// failures end up in [`ExtractionOutcome::file`].
    pub fn apply(
        &self,
        editor: &mut dyn DocumentEditor,
        options: WriteOptions,
    ) -> Result<ExtractionOutcome, PropsError> {
        let edit = self.text_edit();
        editor.apply_edit(&self.document, &edit)?;

        let property = self.property();
        let file = match add_property(&self.properties_file, &property, options) {
            Ok(outcome) => outcome.into(),
            Err(e) => {
                tracing::warn!("Property {} was not written: {}", property.name, e);
                PropertyFileOutcome::Failed(e)
            }
        };

        Ok(ExtractionOutcome {
            property,
            properties_file: self.properties_file.clone(),
            edit,
            file,
        })
    }
}

/// Declare `property` in the root property group of `path`.
///
/// The file is rewritten only when the property was actually added.
pub fn add_property(
    path: &Path,
    property: &Property,
    options: WriteOptions,
) -> Result<InsertOutcome, PropsError> {
    let mut props = PropsFile::open(path)?.with_indent(options.indent);
    let outcome = props.insert_property(&property.name, &property.value);

    if outcome == InsertOutcome::Added {
        if options.atomic {
            props.save_atomic()?;
        } else {
            props.save()?;
        }
        tracing::debug!("Added {} to {}", property.name, path.display());
    } else {
        tracing::debug!("{} already declared in {}", property.name, path.display());
    }

    Ok(outcome)
}

/// Prepare and apply an extraction in one step.
pub fn apply_extraction(
    document: &TextDocument,
    line_index: u32,
    candidate: &ExtractionCandidate,
    prompt: &mut dyn NamePrompt,
    editor: &mut dyn DocumentEditor,
    options: WriteOptions,
) -> Result<ExtractionOutcome, PropsError> {
    ExtractProperty::prepare(document, line_index, candidate, prompt)?.apply(editor, options)
}
