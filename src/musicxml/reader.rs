//! Read MusicXML text into an owned [`XmlDocument`] using quick-xml events

use super::errors::ScoreError;
use super::tree::{Element, XmlNode};
use super::{Declaration, PrologNode, XmlDocument};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

/// Parse an XML string into an owned document tree
pub fn read_document(xml: &str) -> Result<XmlDocument, ScoreError> {
    let mut reader = Reader::from_str(xml);
    // Whitespace is significant for round-tripping untouched content
    reader.trim_text(false);

    let mut prolog: Vec<PrologNode> = Vec::new();
    let mut epilog: Vec<XmlNode> = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            ScoreError::InvalidXml(format!(
                "XML error at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(ref e) => {
                stack.push(element_from_start(e)?);
            }
            Event::Empty(ref e) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    ScoreError::InvalidXml("unexpected closing tag".to_string())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(ref t) => {
                let text = t
                    .unescape()
                    .map_err(|e| ScoreError::InvalidXml(format!("bad text content: {}", e)))?
                    .into_owned();
                push_misc(&mut stack, &root, &mut prolog, &mut epilog, XmlNode::Text(text));
            }
            Event::CData(ref c) => {
                let text = String::from_utf8_lossy(c).into_owned();
                push_misc(&mut stack, &root, &mut prolog, &mut epilog, XmlNode::CData(text));
            }
            Event::Comment(ref c) => {
                let text = String::from_utf8_lossy(c).into_owned();
                push_misc(&mut stack, &root, &mut prolog, &mut epilog, XmlNode::Comment(text));
            }
            Event::PI(ref p) => {
                let text = String::from_utf8_lossy(p).into_owned();
                push_misc(
                    &mut stack,
                    &root,
                    &mut prolog,
                    &mut epilog,
                    XmlNode::ProcessingInstruction(text),
                );
            }
            Event::Decl(ref d) => {
                let version = d
                    .version()
                    .map_err(|e| ScoreError::InvalidXml(format!("bad XML declaration: {}", e)))?;
                let encoding = d.encoding().and_then(|r| r.ok()).map(bytes_to_string);
                let standalone = d.standalone().and_then(|r| r.ok()).map(bytes_to_string);
                prolog.push(PrologNode::Declaration(Declaration {
                    version: bytes_to_string(version),
                    encoding,
                    standalone,
                }));
            }
            Event::DocType(ref d) => {
                prolog.push(PrologNode::DocType(String::from_utf8_lossy(d).into_owned()));
            }
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(ScoreError::InvalidXml(format!(
            "unclosed element <{}>",
            stack.last().map(|e| e.name.as_str()).unwrap_or_default()
        )));
    }

    let root = root.ok_or_else(|| {
        ScoreError::MissingRequiredElement("document has no root element".to_string())
    })?;

    Ok(XmlDocument {
        prolog,
        root,
        epilog,
    })
}

fn element_from_start(e: &BytesStart) -> Result<Element, ScoreError> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| ScoreError::InvalidXml(format!("element name is not UTF-8: {}", err)))?
        .to_string();

    let mut element = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ScoreError::InvalidXml(format!("bad attribute: {}", err)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| ScoreError::InvalidXml(format!("bad attribute value: {}", err)))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Attach a finished element to its parent, or make it the root
fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ScoreError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(ScoreError::InvalidXml(format!(
                "second root element <{}>",
                element.name
            )))
        }
    }
    Ok(())
}

/// Route a non-element node to the open element, the prolog or the epilog
fn push_misc(
    stack: &mut [Element],
    root: &Option<Element>,
    prolog: &mut Vec<PrologNode>,
    epilog: &mut Vec<XmlNode>,
    node: XmlNode,
) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        prolog.push(PrologNode::Node(node));
    } else {
        epilog.push(node);
    }
}

fn bytes_to_string(bytes: Cow<[u8]>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}
