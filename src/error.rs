use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("Invalid SVG: {0}")]
    InvalidSvg(String),

    #[error("Expected exactly one <svg> element, found {0}")]
    SvgRootCount(usize),

    #[error("Unknown character encoding: {0}")]
    UnknownEncoding(String),

    #[error("Input is not valid {0}")]
    Undecodable(&'static str),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
