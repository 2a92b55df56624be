//! Document serialization to XML.

use crate::Options;
use crate::ast::*;

const INDENT: &str = "  ";

/// Serialize a Document back to XML text.
///
/// Without `options.pretty` nodes are written exactly as they were read
/// (modulo escaping). With it, whitespace-only text is dropped and elements
/// are indented one per line; elements holding text are written on one line
/// so the text itself is untouched.
pub fn serialize(doc: &Document, options: &Options) -> String {
    let mut out = String::new();
    let newline = if options.pretty { "\n" } else { "" };

    if let Some(ref decl) = doc.xml_declaration {
        out.push_str("<?xml version=\"");
        out.push_str(&decl.version);
        out.push('"');
        if let Some(ref enc) = decl.encoding {
            out.push_str(" encoding=\"");
            out.push_str(enc);
            out.push('"');
        }
        if let Some(standalone) = decl.standalone {
            out.push_str(" standalone=\"");
            out.push_str(if standalone { "yes" } else { "no" });
            out.push('"');
        }
        out.push_str("?>");
        out.push_str(newline);
    }

    if let Some(ref dt) = doc.doctype {
        out.push_str("<!DOCTYPE ");
        out.push_str(dt);
        out.push('>');
        out.push_str(newline);
    }

    for node in &doc.prolog {
        serialize_node(&mut out, node);
        out.push_str(newline);
    }

    if options.pretty {
        serialize_pretty(&mut out, &doc.root, 0);
    } else {
        serialize_element(&mut out, &doc.root);
    }

    for node in &doc.epilog {
        out.push_str(newline);
        serialize_node(&mut out, node);
    }

    if options.pretty && !out.ends_with('\n') {
        out.push('\n');
    }

    out
}

fn serialize_start(out: &mut String, elem: &Element) {
    out.push('<');
    out.push_str(&elem.name.full_name());

    for attr in &elem.attributes {
        out.push(' ');
        out.push_str(&attr.name.full_name());
        out.push_str("=\"");
        push_escaped_attr(out, &attr.value);
        out.push('"');
    }
}

fn serialize_end(out: &mut String, elem: &Element) {
    out.push_str("</");
    out.push_str(&elem.name.full_name());
    out.push('>');
}

fn serialize_element(out: &mut String, elem: &Element) {
    serialize_start(out, elem);

    if elem.children.is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');
        for child in &elem.children {
            serialize_node(out, child);
        }
        serialize_end(out, elem);
    }
}

fn serialize_pretty(out: &mut String, elem: &Element, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }

    // text layout is whitespace sensitive
    if elem.has_text_content() || elem.name.local == "text" {
        serialize_element(out, elem);
        out.push('\n');
        return;
    }

    let children: Vec<_> = elem
        .children
        .iter()
        .filter(|n| !matches!(n, Node::Text(_)))
        .collect();

    serialize_start(out, elem);
    if children.is_empty() {
        out.push_str("/>\n");
        return;
    }

    out.push_str(">\n");
    for child in children {
        match child {
            Node::Element(e) => serialize_pretty(out, e, depth + 1),
            other => {
                for _ in 0..=depth {
                    out.push_str(INDENT);
                }
                serialize_node(out, other);
                out.push('\n');
            }
        }
    }
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    serialize_end(out, elem);
    out.push('\n');
}

fn serialize_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(elem) => serialize_element(out, elem),
        Node::Text(text) => push_escaped_text(out, text),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::CData(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
        }
        Node::ProcessingInstruction { target, content } => {
            out.push_str("<?");
            out.push_str(target);
            if let Some(c) = content {
                out.push(' ');
                out.push_str(c);
            }
            out.push_str("?>");
        }
    }
}

fn push_escaped_attr(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_escaped_text(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
