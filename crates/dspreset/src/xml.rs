//! Minimal owned XML tree over `quick-xml`.
//!
//! The importer reads a whole document into an [`Element`] tree and the
//! exporter builds one before writing it out. Text content is ignored;
//! `.dspreset` files carry everything in attributes.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::error::{ExportError, ParseError};

/// An element with its attributes (in document order) and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attributes in document order.
    pub attrs: Vec<(String, String)>,
    /// Child elements.
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute, builder style.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set an attribute, replacing an existing value.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Attribute value by name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append a child.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Append a child, builder style.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// First direct child with this name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Direct children with this name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First descendant (depth-first, excluding `self`) with this name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }
}

fn start_element(e: &BytesStart<'_>) -> Result<Element, ParseError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut el = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ParseError::Malformed(format!("<{}>: {err}", el.name)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| ParseError::Malformed(format!("<{}> {key}: {err}", el.name)))?
            .into_owned();
        el.attrs.push((key, value));
    }
    Ok(el)
}

/// Parse a document and return its root element.
pub fn parse_document(input: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| ParseError::Xml {
            position: reader.error_position(),
            message: e.to_string(),
        })?;

        match event {
            Event::Start(ref e) => stack.push(start_element(e)?),
            Event::Empty(ref e) => {
                let el = start_element(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.push(el),
                    None if root.is_none() => root = Some(el),
                    None => return Err(ParseError::Malformed("multiple root elements".into())),
                }
            }
            Event::End(_) => {
                let Some(el) = stack.pop() else {
                    return Err(ParseError::Malformed("unbalanced closing tag".into()));
                };
                match stack.last_mut() {
                    Some(parent) => parent.push(el),
                    None if root.is_none() => root = Some(el),
                    None => return Err(ParseError::Malformed("multiple root elements".into())),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::Xml {
            position: reader.buffer_position(),
            message: format!("unexpected end of document inside <{}>", open.name),
        });
    }

    root.ok_or_else(|| ParseError::Malformed("document has no root element".into()))
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, el: &Element) -> Result<(), ExportError> {
    let mut start = BytesStart::new(el.name.as_str());
    for (key, value) in &el.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if el.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| ExportError::Serialize(e.to_string()))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| ExportError::Serialize(e.to_string()))?;
    for child in &el.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(el.name.as_str())))
        .map_err(|e| ExportError::Serialize(e.to_string()))?;
    Ok(())
}

/// Render a document with an XML declaration and two-space indentation.
pub fn write_document(root: &Element) -> Result<String, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| ExportError::Serialize(e.to_string()))?;
    write_element(&mut writer, root)?;

    let mut out = String::from_utf8(writer.into_inner())
        .map_err(|e| ExportError::Serialize(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let doc = r#"<?xml version="1.0"?>
            <DecentSampler presetName="Keys">
              <ui width="812"><tab name="main"><labeled-knob label="A &amp; B"/></tab></ui>
              <groups><group><sample path="a.wav"/></group></groups>
            </DecentSampler>"#;
        let root = parse_document(doc).unwrap();
        assert_eq!(root.name, "DecentSampler");
        assert_eq!(root.attr("presetName"), Some("Keys"));

        let knob = root.find("labeled-knob").unwrap();
        assert_eq!(knob.attr("label"), Some("A & B"));

        let groups = root.child("groups").unwrap();
        assert_eq!(groups.children_named("group").count(), 1);
        assert!(root.child("sample").is_none());
        assert!(root.find("sample").is_some());
    }

    #[test]
    fn test_parse_rejects_mismatched_tags() {
        let err = parse_document("<a><b></a>").unwrap_err();
        assert!(matches!(err, ParseError::Xml { .. }), "got: {err:?}");
    }

    #[test]
    fn test_parse_rejects_unclosed_root() {
        let err = parse_document("<DecentSampler><ui>").unwrap_err();
        assert!(matches!(err, ParseError::Xml { .. }), "got: {err:?}");
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        let err = parse_document("   ").unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)), "got: {err:?}");
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut el = Element::new("group").with_attr("tags", "a");
        el.set_attr("tags", "a,b");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.attr("tags"), Some("a,b"));
    }

    #[test]
    fn test_write_then_parse() {
        let root = Element::new("DecentSampler")
            .with_attr("presetName", "Pad \"X\"")
            .with_child(
                Element::new("groups")
                    .with_attr("volume", "-3dB")
                    .with_child(Element::new("group").with_child(Element::new("sample").with_attr("path", "samples/a.wav"))),
            );
        let text = write_document(&root).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(text.contains("\n  <groups volume=\"-3dB\">"), "got:\n{text}");

        let parsed = parse_document(&text).unwrap();
        assert_eq!(parsed, root);
    }
}
