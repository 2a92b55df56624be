//! svg-style-clean - strip redundant inline styles from SVG
//!
//! Removes `style` properties that cannot affect rendering: properties that do
//! not apply to an element's tag, properties repeating a value inherited from
//! an ancestor, and properties set to their default value. Only the `style`
//! attribute is considered; `<style>` sheets and selectors are not.

mod ast;
mod clean;
mod encoding;
mod error;
mod parse;
pub mod properties;
mod serialize;
mod simplify;
mod style;

pub use ast::*;
pub use clean::*;
pub use encoding::*;
pub use error::*;
pub use parse::*;
pub use serialize::*;
pub use simplify::*;
pub use style::*;

/// Clean an SVG string, returning the rewritten document.
pub fn clean_svg(svg: &str, options: &Options) -> Result<String, CleanError> {
    let mut doc = parse_document(svg)?;
    clean(&mut doc, options)?;
    Ok(serialize(&doc, options))
}

/// Clean raw SVG bytes. The output uses the encoding the input declared,
/// or UTF-8 when that encoding cannot be written; the XML declaration is
/// relabelled to match.
pub fn clean_bytes(svg: &[u8], options: &Options) -> Result<(Vec<u8>, CleanReport), CleanError> {
    let (text, encoding) = decode_document(svg)?;
    let mut doc = parse_document(&text)?;
    let report = clean(&mut doc, options)?;

    let output_encoding = encoding.output_encoding();
    if output_encoding != encoding {
        if let Some(label) = doc.xml_declaration.as_mut().and_then(|d| d.encoding.as_mut()) {
            *label = output_encoding.name().to_string();
        }
    }

    Ok((encode_document(&serialize(&doc, options), output_encoding), report))
}

/// Cleanup options. Everything is off by default, which makes a run a plain
/// parse and re-serialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Remove properties that do not apply to the element's tag
    pub remove_inapplicable: bool,
    /// Remove properties equal to the inherited or the default value
    pub remove_redundant: bool,
    /// Indent the output, one element per line
    pub pretty: bool,
}
