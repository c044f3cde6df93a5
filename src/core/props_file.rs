//! Structured read-modify-write of MSBuild properties files.
//!
//! Unlike the lenient extractor, this parses the whole file with quick-xml so a
//! rewrite cannot corrupt it. Declarations, comments, processing instructions
//! and attributes are written back as they were read; text is kept in its
//! escaped form, whitespace included. Whitespace-only text between elements is
//! regenerated with a fixed indent, so the output is not byte-identical to
//! hand-formatted input.
//!
//! Rewriting is read tree, mutate, serialize, overwrite. Nothing guards
//! against a concurrent writer; the last one wins.

use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use quick_xml::{
    Reader, Writer,
    events::{BytesStart, BytesText, Event},
};

use crate::core::{Property, PropsError};

pub const PROPERTY_GROUP: &str = "PropertyGroup";

const DEFAULT_INDENT: usize = 2;
const BOM: char = '\u{feff}';

/// Result of inserting a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Added,
    /// A property with that name already exists; nothing changed.
    AlreadyPresent,
}

impl InsertOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertOutcome::Added => "added",
            InsertOutcome::AlreadyPresent => "already present",
        }
    }
}

#[derive(Debug, Clone)]
enum XmlNode {
    Element(XmlElement),
    /// Raw, still-escaped character data.
    Text(String),
    /// Declarations, comments, CDATA, processing instructions, doctype.
    Other(Event<'static>),
}

#[derive(Debug, Clone)]
struct XmlElement {
    start: BytesStart<'static>,
    children: Vec<XmlNode>,
    self_closing: bool,
}

impl XmlElement {
    fn new(start: BytesStart<'static>, self_closing: bool) -> Self {
        Self {
            start,
            children: Vec::new(),
            self_closing,
        }
    }

    fn named(name: &str) -> Self {
        Self::new(BytesStart::new(name.to_string()), false)
    }

    /// Turn `<X />` into `<X></X>` so children can be added.
    fn open_up(&mut self) {
        if !self.self_closing {
            return;
        }
        let name_len = self.start.name().as_ref().len();
        let content = String::from_utf8_lossy(&self.start).trim_end().to_string();
        self.start = BytesStart::from_content(content, name_len);
        self.self_closing = false;
    }

    /// Drop whitespace-only text between child elements; leaf text is kept as written.
    fn drop_layout_whitespace(&mut self) {
        let has_markup = self
            .children
            .iter()
            .any(|child| !matches!(child, XmlNode::Text(_)));
        if has_markup {
            self.children
                .retain(|child| !matches!(child, XmlNode::Text(text) if is_layout(text)));
        }
    }

    fn is_named(&self, name: &str) -> bool {
        self.start.name().as_ref() == name.as_bytes()
    }

    fn name(&self) -> String {
        String::from_utf8_lossy(self.start.name().as_ref()).into_owned()
    }

    fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }
}

/// A parsed properties file.
#[derive(Debug, Clone)]
pub struct PropsFile {
    file_path: PathBuf,
    prolog: Vec<XmlNode>,
    root: XmlElement,
    epilog: Vec<XmlNode>,
    indent: usize,
    has_bom: bool,
    crlf: bool,
}

impl PropsFile {
    /// Read and parse a properties file.
    pub fn open(path: &Path) -> Result<Self, PropsError> {
        let content = fs::read_to_string(path).map_err(|source| PropsError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse properties file content; `path` is where [`save`](Self::save) writes.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, PropsError> {
        let file_path = path.into();
        let has_bom = content.starts_with(BOM);
        let body = content.strip_prefix(BOM).unwrap_or(content);

        let mut reader = Reader::from_str(body);
        reader.config_mut().trim_text(false);

        let mut open: Vec<XmlElement> = Vec::new();
        let mut top_level: Vec<XmlNode> = Vec::new();

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(parse_error(&file_path, reader.error_position(), e));
                }
            };

            let node = match event {
                Event::Start(start) => {
                    open.push(XmlElement::new(start.into_owned(), false));
                    continue;
                }
                Event::End(_) => match open.pop() {
                    Some(mut element) => {
                        element.drop_layout_whitespace();
                        XmlNode::Element(element)
                    }
                    None => {
                        return Err(parse_error(
                            &file_path,
                            reader.buffer_position(),
                            "unexpected closing tag",
                        ));
                    }
                },
                Event::Empty(start) => XmlNode::Element(XmlElement::new(start.into_owned(), true)),
                Event::Text(text) => {
                    let text = String::from_utf8_lossy(&text).into_owned();
                    if open.is_empty() && is_layout(&text) {
                        continue;
                    }
                    XmlNode::Text(text)
                }
                Event::Eof => break,
                other => XmlNode::Other(other.into_owned()),
            };

            match open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => top_level.push(node),
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(parse_error(
                &file_path,
                reader.buffer_position(),
                format!("unclosed element <{}>", unclosed.name()),
            ));
        }

        let Some(root_index) = top_level
            .iter()
            .position(|node| matches!(node, XmlNode::Element(_)))
        else {
            return Err(parse_error(
                &file_path,
                reader.buffer_position(),
                "no root element",
            ));
        };

        let epilog = top_level.split_off(root_index + 1);
        let Some(XmlNode::Element(root)) = top_level.pop() else {
            return Err(parse_error(&file_path, 0, "no root element"));
        };

        Ok(Self {
            file_path,
            prolog: top_level,
            root,
            epilog,
            indent: DEFAULT_INDENT,
            has_bom,
            crlf: content.contains("\r\n"),
        })
    }

    /// Spaces per nesting level used by [`to_xml_string`](Self::to_xml_string).
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Properties of the root property group, in document order.
    pub fn properties(&self) -> Vec<Property> {
        self.root_property_group()
            .map(|group| {
                group
                    .elements()
                    .map(|element| Property::new(element.name(), element.text()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the root property group already declares `name`.
    pub fn contains_property(&self, name: &str) -> bool {
        self.root_property_group()
            .is_some_and(|group| group.elements().any(|element| element.is_named(name)))
    }

    /// Add `<name>value</name>` to the root property group.
    ///
    /// An existing property of that name is left untouched. When the root has
    /// no property group yet, one is appended to it.
    pub fn insert_property(&mut self, name: &str, value: &str) -> InsertOutcome {
        if self.contains_property(name) {
            return InsertOutcome::AlreadyPresent;
        }

        let mut property = XmlElement::named(name);
        if !value.is_empty() {
            property.children.push(XmlNode::Text(value.replace('<', "&lt;")));
        }

        match self.root_property_group_mut() {
            Some(group) => {
                group.open_up();
                group.children.push(XmlNode::Element(property));
            }
            None => {
                let mut group = XmlElement::named(PROPERTY_GROUP);
                group.children.push(XmlNode::Element(property));
                self.root.open_up();
                self.root.children.push(XmlNode::Element(group));
            }
        }

        InsertOutcome::Added
    }

    /// Serialize the whole tree back to XML text.
    pub fn to_xml_string(&self) -> Result<String, PropsError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent);

        for node in &self.prolog {
            write_node(&mut writer, node).map_err(|e| self.write_error(e))?;
        }
        write_element(&mut writer, &self.root).map_err(|e| self.write_error(e))?;
        for node in &self.epilog {
            write_node(&mut writer, node).map_err(|e| self.write_error(e))?;
        }

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|e| self.write_error(e.to_string()))?;
        xml.push('\n');

        if self.crlf {
            xml = xml.replace("\r\n", "\n").replace('\n', "\r\n");
        }
        if self.has_bom {
            xml.insert(0, BOM);
        }
        Ok(xml)
    }

    /// Overwrite the file in place.
    pub fn save(&self) -> Result<(), PropsError> {
        let xml = self.to_xml_string()?;
        fs::write(&self.file_path, xml).map_err(|e| self.write_error(e.to_string()))
    }

    /// Write to a temporary file next to the target, then rename it over the target.
    pub fn save_atomic(&self) -> Result<(), PropsError> {
        let xml = self.to_xml_string()?;
        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| self.write_error(e.to_string()))?;
        temp.write_all(xml.as_bytes())
            .map_err(|e| self.write_error(e.to_string()))?;
        temp.persist(&self.file_path)
            .map_err(|e| self.write_error(e.to_string()))?;
        Ok(())
    }

    fn root_property_group(&self) -> Option<&XmlElement> {
        self.root.elements().find(|e| e.is_named(PROPERTY_GROUP))
    }

    fn root_property_group_mut(&mut self) -> Option<&mut XmlElement> {
        self.root.elements_mut().find(|e| e.is_named(PROPERTY_GROUP))
    }

    fn write_error(&self, message: impl Into<String>) -> PropsError {
        PropsError::FileWrite {
            path: self.file_path.clone(),
            message: message.into(),
        }
    }
}

fn is_layout(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_whitespace())
}

fn parse_error(path: &Path, position: u64, message: impl ToString) -> PropsError {
    PropsError::FileParse {
        path: path.to_path_buf(),
        position,
        message: message.to_string(),
    }
}

fn emit<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), String> {
    writer.write_event(event).map_err(|e| e.to_string())
}

fn write_node<W: std::io::Write>(writer: &mut Writer<W>, node: &XmlNode) -> Result<(), String> {
    match node {
        XmlNode::Element(element) => write_element(writer, element),
        XmlNode::Text(text) => emit(writer, Event::Text(BytesText::from_escaped(text.as_str()))),
        XmlNode::Other(event) => emit(writer, event.clone()),
    }
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
) -> Result<(), String> {
    if element.self_closing && element.children.is_empty() {
        return emit(writer, Event::Empty(element.start.borrow()));
    }

    emit(writer, Event::Start(element.start.borrow()))?;
    if element.children.is_empty() {
        // An empty text event keeps `<A></A>` on one line.
        emit(writer, Event::Text(BytesText::from_escaped("")))?;
    }
    for child in &element.children {
        write_node(writer, child)?;
    }
    emit(writer, Event::End(element.start.to_end()))
}
