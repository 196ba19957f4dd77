//! Order-preserving element tree.
//!
//! Used for documents that are persisted or forwarded whole, where decoding
//! into a fixed struct would drop vendor elements the client never reads.
//! Serialization follows the usual XML-to-JSON shape: a bare text element
//! becomes a string, anything else an object keyed by child name, repeated
//! children become arrays and attributes sit under `"$"`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::xml_decode;
use crate::error::{ParseError, ParseResult};

/// One XML element with its attributes, text and children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<(String, Vec<XmlElement>)>,
}

impl XmlElement {
    /// Parse a whole document, returning the root element name and tree.
    pub fn parse_document(xml: &str) -> ParseResult<(String, XmlElement)> {
        let mut reader = Reader::from_str(xml_decode::prepare(xml)?);
        reader.trim_text(true);

        let mut open: Vec<(String, XmlElement)> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event().map_err(syntax)? {
                Event::Start(start) => open.push(Self::open(&start)?),
                Event::Empty(start) => {
                    let (name, element) = Self::open(&start)?;
                    Self::close(&mut open, &mut root, name, element)?;
                }
                Event::End(_) => {
                    let (name, element) = open
                        .pop()
                        .ok_or_else(|| syntax("unexpected closing tag"))?;
                    Self::close(&mut open, &mut root, name, element)?;
                }
                Event::Text(text) => {
                    if let Some((_, element)) = open.last_mut() {
                        element.text.push_str(text.unescape().map_err(syntax)?.trim());
                    }
                }
                Event::CData(data) => {
                    if let Some((_, element)) = open.last_mut() {
                        element.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some((name, _)) = open.last() {
            return Err(syntax(format!("unclosed element <{}>", name)));
        }
        root.ok_or(ParseError::EmptyDocument)
    }

    fn open(start: &BytesStart<'_>) -> ParseResult<(String, XmlElement)> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut element = XmlElement::default();

        for attribute in start.attributes() {
            let attribute = attribute.map_err(syntax)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value().map_err(syntax)?.into_owned();
            element.attributes.push((key, value));
        }

        Ok((name, element))
    }

    fn close(
        open: &mut [(String, XmlElement)],
        root: &mut Option<(String, XmlElement)>,
        name: String,
        element: XmlElement,
    ) -> ParseResult<()> {
        match open.last_mut() {
            Some((_, parent)) => parent.push_child(name, element),
            None if root.is_none() => *root = Some((name, element)),
            None => return Err(syntax(format!("second root element <{}>", name))),
        }
        Ok(())
    }

    fn push_child(&mut self, name: String, element: XmlElement) {
        match self.children.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, siblings)) => siblings.push(element),
            None => self.children.push((name, vec![element])),
        }
    }

    /// Text content, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child with the given element name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, siblings)| siblings.first())
    }

    /// Text of the first child with the given element name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlElement::text)
    }

    /// Every child in document order, repeated names included.
    pub fn children(&self) -> impl Iterator<Item = (&str, &XmlElement)> {
        self.children.iter().flat_map(|(name, siblings)| {
            siblings.iter().map(move |element| (name.as_str(), element))
        })
    }

    /// No attributes and no children.
    pub fn is_leaf(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    /// Write attributes, mixed text and children as entries of `map`.
    pub(crate) fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        if !self.attributes.is_empty() {
            map.serialize_entry("$", &Attributes(&self.attributes))?;
        }
        if !self.text.is_empty() {
            map.serialize_entry("_", &self.text)?;
        }
        for (name, siblings) in &self.children {
            match siblings.as_slice() {
                [only] => map.serialize_entry(name, only)?,
                many => map.serialize_entry(name, many)?,
            }
        }
        Ok(())
    }
}

impl Serialize for XmlElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_leaf() {
            return serializer.serialize_str(&self.text);
        }
        let mut map = serializer.serialize_map(None)?;
        self.serialize_entries(&mut map)?;
        map.end()
    }
}

struct Attributes<'a>(&'a [(String, String)]);

impl Serialize for Attributes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn syntax(error: impl ToString) -> ParseError {
    ParseError::XmlDeserializationFailed(error.to_string())
}
