//! Serialize an [`XmlDocument`] back to text with quick-xml's `Writer`

use super::errors::ScoreError;
use super::tree::{Element, XmlNode};
use super::{PrologNode, XmlDocument};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub fn write_document(doc: &XmlDocument) -> Result<String, ScoreError> {
    let mut writer = Writer::new(Vec::new());

    for node in &doc.prolog {
        let written = match node {
            PrologNode::Declaration(decl) => writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            ))),
            PrologNode::DocType(text) => {
                writer.write_event(Event::DocType(BytesText::from_escaped(text.as_str())))
            }
            PrologNode::Node(node) => write_node(&mut writer, node),
        };
        written.map_err(write_error)?;
    }

    write_element(&mut writer, &doc.root).map_err(write_error)?;

    for node in &doc.epilog {
        write_node(&mut writer, node).map_err(write_error)?;
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| ScoreError::Write(format!("output is not UTF-8: {}", e)))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> quick_xml::Result<()> {
    match node {
        XmlNode::Element(element) => write_element(writer, element),
        XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text))),
        XmlNode::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str()))),
        XmlNode::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
        }
        XmlNode::ProcessingInstruction(text) => {
            writer.write_event(Event::PI(BytesText::from_escaped(text.as_str())))
        }
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> quick_xml::Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start));
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))
}

fn write_error(e: quick_xml::Error) -> ScoreError {
    ScoreError::Write(e.to_string())
}
