use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::CompileError;
use crate::ir::value::{Document, Value};

use super::Backend;

pub const DEFAULT_ROOT: &str = "config";

/// Serializes a [`Document`] as indented XML:
///
/// ```text
/// <config>
///   <PORT>8080</PORT>
///   <item_0>
///     <array>
///       <item>1</item>
///     </array>
///   </item_0>
/// </config>
/// ```
pub struct XmlBackend {
    root: String,
    writer: Writer<Vec<u8>>,
}

impl Backend for XmlBackend {
    fn emit(&mut self, document: &Document) -> Result<String, CompileError> {
        self.emit_document(document)
    }
}

impl XmlBackend {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            writer: Self::fresh_writer(),
        }
    }

    fn fresh_writer() -> Writer<Vec<u8>> {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    }

    pub fn emit_document(&mut self, document: &Document) -> Result<String, CompileError> {
        self.writer = Self::fresh_writer();

        let root = self.root.clone();
        if document.is_empty() {
            self.write(Event::Empty(BytesStart::new(root.as_str())))?;
        } else {
            self.write(Event::Start(BytesStart::new(root.as_str())))?;
            for (key, value) in document.iter() {
                self.emit_element(key, value)?;
            }
            self.write(Event::End(BytesEnd::new(root.as_str())))?;
        }

        let bytes = std::mem::replace(&mut self.writer, Self::fresh_writer()).into_inner();
        let xml = String::from_utf8(bytes).map_err(|e| CompileError::EmitError {
            message: e.to_string(),
        })?;
        Ok(xml.trim().to_string())
    }

    fn emit_element(&mut self, tag: &str, value: &Value) -> Result<(), CompileError> {
        match value {
            Value::Number(n) => self.emit_text(tag, &n.to_string()),
            Value::Text(text) => self.emit_text(tag, text),
            Value::Array(items) => {
                self.write(Event::Start(BytesStart::new(tag)))?;
                self.emit_array(items)?;
                self.write(Event::End(BytesEnd::new(tag)))
            }
        }
    }

    fn emit_array(&mut self, items: &[Value]) -> Result<(), CompileError> {
        if items.is_empty() {
            return self.write(Event::Empty(BytesStart::new("array")));
        }
        self.write(Event::Start(BytesStart::new("array")))?;
        for item in items {
            self.emit_element("item", item)?;
        }
        self.write(Event::End(BytesEnd::new("array")))
    }

    fn emit_text(&mut self, tag: &str, text: &str) -> Result<(), CompileError> {
        // An element without content collapses to <tag/>
        if text.is_empty() {
            return self.write(Event::Empty(BytesStart::new(tag)));
        }
        self.write(Event::Start(BytesStart::new(tag)))?;
        // Only markup characters are escaped; quotes stay literal in text content
        self.write(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
        self.write(Event::End(BytesEnd::new(tag)))
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), CompileError> {
        self.writer
            .write_event(event)
            .map_err(|e| CompileError::EmitError {
                message: e.to_string(),
            })
    }
}

impl Default for XmlBackend {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}
