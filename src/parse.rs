//! Document parsing from XML.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::ast::*;
use crate::error::CleanError;

/// Parse an XML string into a Document.
///
/// Text is kept verbatim, whitespace included, so that writing the document
/// back without pretty-printing reproduces the original layout.
pub fn parse_document(xml: &str) -> Result<Document, CleanError> {
    let mut reader = Reader::from_str(xml);

    let mut xml_declaration = None;
    let mut doctype = None;
    let mut prolog = Vec::new();
    let mut epilog = Vec::new();
    let mut root = None;

    loop {
        let event = reader.read_event()?;
        let element = match event {
            Event::Decl(decl) => {
                xml_declaration = Some(XmlDeclaration {
                    version: String::from_utf8_lossy(decl.version()?.as_ref()).into_owned(),
                    encoding: decl
                        .encoding()
                        .transpose()
                        .ok()
                        .flatten()
                        .map(|e| String::from_utf8_lossy(e.as_ref()).into_owned()),
                    standalone: decl.standalone().transpose().ok().flatten().map(|s| {
                        let s = String::from_utf8_lossy(s.as_ref());
                        s == "yes"
                    }),
                });
                continue;
            }
            Event::DocType(dt) => {
                doctype = Some(String::from_utf8_lossy(&dt).into_owned());
                continue;
            }
            Event::Start(start) => parse_element(&mut reader, &start)?,
            Event::Empty(start) => parse_element_start(&start)?,
            Event::Comment(comment) => {
                let node = Node::Comment(String::from_utf8_lossy(&comment).into_owned());
                if root.is_none() {
                    prolog.push(node);
                } else {
                    epilog.push(node);
                }
                continue;
            }
            Event::PI(pi) => {
                let node = parse_pi(&String::from_utf8_lossy(&pi));
                if root.is_none() {
                    prolog.push(node);
                } else {
                    epilog.push(node);
                }
                continue;
            }
            Event::Eof => break,
            // whitespace between top-level nodes
            _ => continue,
        };

        if root.is_some() {
            return Err(CleanError::InvalidSvg(format!(
                "Unexpected second top-level element <{}>",
                element.name.full_name()
            )));
        }
        root = Some(element);
    }

    let root = root.ok_or_else(|| CleanError::InvalidSvg("No root element found".into()))?;

    Ok(Document {
        xml_declaration,
        doctype,
        prolog,
        root,
        epilog,
    })
}

fn parse_element(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<Element, CleanError> {
    let mut element = parse_element_start(start)?;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                element
                    .children
                    .push(Node::Element(parse_element(reader, &start)?));
            }
            Event::Empty(start) => {
                element
                    .children
                    .push(Node::Element(parse_element_start(&start)?));
            }
            Event::End(_) => {
                break;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                element.children.push(Node::Text(text.into_owned()));
            }
            Event::Comment(comment) => {
                element
                    .children
                    .push(Node::Comment(String::from_utf8_lossy(&comment).into_owned()));
            }
            Event::CData(cdata) => {
                element
                    .children
                    .push(Node::CData(String::from_utf8_lossy(&cdata).into_owned()));
            }
            Event::PI(pi) => {
                element
                    .children
                    .push(parse_pi(&String::from_utf8_lossy(&pi)));
            }
            Event::Eof => {
                return Err(CleanError::InvalidSvg(format!(
                    "Unexpected end of file inside <{}>",
                    element.name.full_name()
                )));
            }
            _ => {}
        }
    }

    Ok(element)
}

fn parse_pi(content: &str) -> Node {
    let (target, content) = content
        .split_once(char::is_whitespace)
        .map(|(t, r)| (t.to_string(), Some(r.to_string())))
        .unwrap_or_else(|| (content.to_string(), None));
    Node::ProcessingInstruction { target, content }
}

fn parse_element_start(start: &BytesStart) -> Result<Element, CleanError> {
    let name_bytes = start.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?;

    let mut element = Element {
        name: QName::parse(name),
        attributes: Vec::new(),
        children: Vec::new(),
    };

    for attr in start.attributes() {
        let attr = attr.map_err(|e| CleanError::InvalidSvg(format!("Invalid attribute: {}", e)))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        element.attributes.push(Attribute {
            name: QName::parse(key),
            value: value.into_owned(),
        });
    }

    Ok(element)
}
