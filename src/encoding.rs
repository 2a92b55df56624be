//! Character encoding detection for input documents.
//!
//! - A BOM wins when present.
//! - Otherwise the `encoding` pseudo-attribute of a leading XML declaration
//!   chooses the encoding.
//! - Otherwise UTF-8 is used.
//!
//! Output is written back in the same encoding.

use encoding_rs::{Encoding, UTF_8};

use crate::error::CleanError;

/// Decode raw document bytes, returning the text and the encoding it was read with.
///
/// Byte sequences that are malformed in the chosen encoding are an error.
pub fn decode_document(bytes: &[u8]) -> Result<(String, &'static Encoding), CleanError> {
    if let Some((enc, bom_len)) = Encoding::for_bom(bytes) {
        return Ok((decode_strict(&bytes[bom_len..], enc)?, enc));
    }

    let enc = match declared_encoding(bytes) {
        Some(label) => Encoding::for_label(label.as_bytes())
            .ok_or_else(|| CleanError::UnknownEncoding(label.to_string()))?,
        None => UTF_8,
    };

    Ok((decode_strict(bytes, enc)?, enc))
}

fn decode_strict(bytes: &[u8], enc: &'static Encoding) -> Result<String, CleanError> {
    enc.decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or(CleanError::Undecodable(enc.name()))
}

/// Encode serialized output. Characters the encoding cannot represent become
/// numeric character references. Encodings `encoding_rs` can only decode
/// (UTF-16) are written as UTF-8.
pub fn encode_document(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, _, _) = encoding.encode(text);
    bytes.into_owned()
}

/// Read the `encoding="..."` label from a leading `<?xml ...?>` declaration.
fn declared_encoding(bytes: &[u8]) -> Option<&str> {
    let rest = bytes.strip_prefix(b"<?xml")?;
    let end = rest.windows(2).position(|w| w == b"?>")?;
    let decl = std::str::from_utf8(&rest[..end]).ok()?;

    let (_, after) = decl.split_once("encoding")?;
    let after = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = after.chars().next().filter(|&c| c == '"' || c == '\'')?;
    let value = &after[1..];
    let close = value.find(quote)?;
    Some(value[..close].trim())
}
