//! XML decoding errors.

/// Errors that can occur while decoding an XML payload.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An error from the underlying quick-xml reader (syntax, mismatched tags, encoding).
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// A required XML element was missing.
    #[error("missing required XML element: {0}")]
    MissingElement(String),

    /// The document ended before an open element was closed.
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// Text, an attribute value, or a reference contains a character XML forbids.
    #[error("invalid XML character U+{:04X}", u32::from(*.0))]
    InvalidCharacter(char),

    /// Text or an entity reference could not be decoded.
    #[error("failed to parse value: {0}")]
    ParseError(String),
}
