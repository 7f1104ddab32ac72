//! Minimal element tree over `quick-xml` events.
//!
//! The EVE API documents are small and deeply nested, so the parsers walk a
//! materialised tree top-down instead of driving the event reader directly.

use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
    text: String,
}

/// Parses a complete document and returns its root element.
pub fn parse(bytes: &[u8]) -> Result<XmlNode, ApiError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => stack.push(XmlNode::from_start(&e)?),
            Event::Empty(e) => {
                let node = XmlNode::from_start(&e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ApiError::malformed("unbalanced closing tag"))?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    let raw = e.into_inner();
                    let text = std::str::from_utf8(&raw)
                        .map_err(|e| ApiError::malformed(format!("invalid UTF-8 in CDATA: {}", e)))?;
                    top.text.push_str(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ApiError::malformed(format!(
            "document ended inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| ApiError::malformed("document has no root element"))
}

fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> Result<(), ApiError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(ApiError::malformed("multiple root elements")),
    }
    Ok(())
}

impl XmlNode {
    fn from_start(e: &BytesStart<'_>) -> Result<Self, ApiError> {
        let name = utf8(e.name().as_ref())?.to_string();

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Concatenated character data directly inside this element, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.is(name))
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlNode::text)
    }

    /// The `<rowset name="...">` child with the given name.
    pub fn rowset(&self, name: &str) -> Option<&XmlNode> {
        self.children
            .iter()
            .find(|c| c.is("rowset") && c.attr("name") == Some(name))
    }

    pub fn rows(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter(|c| c.is("row"))
    }

    /// Parses the element text, treating an empty element as the default value.
    pub fn parse_text<T>(&self) -> Result<T, ApiError>
    where
        T: FromStr + Default,
    {
        if self.text.is_empty() {
            return Ok(T::default());
        }
        self.text.parse().map_err(|_| {
            ApiError::malformed(format!("invalid value in <{}>: {}", self.name, self.text))
        })
    }

    pub fn parse_attr<T: FromStr>(&self, key: &str) -> Result<Option<T>, ApiError> {
        match self.attr(key) {
            None => Ok(None),
            Some(value) => value.trim().parse().map(Some).map_err(|_| {
                ApiError::malformed(format!(
                    "invalid {} attribute on <{}>: {}",
                    key, self.name, value
                ))
            }),
        }
    }

    pub fn required_attr<T: FromStr>(&self, key: &str) -> Result<T, ApiError> {
        self.parse_attr(key)?.ok_or_else(|| {
            ApiError::malformed(format!("missing {} attribute on <{}>", key, self.name))
        })
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, ApiError> {
    std::str::from_utf8(bytes).map_err(|e| ApiError::malformed(format!("invalid UTF-8: {}", e)))
}
