//! Streaming XML deserialization built on quick-xml.
//!
//! Decoding is lenient about content and strict about syntax: the root
//! element may have any name, unknown children are skipped, and absent fields
//! keep their default value. Every event is checked for well-formedness as it
//! is read (attributes, encoding, and the XML character range), so a document
//! that is not well-formed up to the end of the root element is rejected even
//! where its content would otherwise be ignored.

use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};

use crate::error::XmlError;

/// Trait for types decoded from the children of an XML root element.
pub trait XmlDeserialize: Sized {
    /// Deserialize an instance from the given XML reader.
    ///
    /// The reader is positioned just after the opening tag of the root
    /// element. The implementation reads all child content and returns once
    /// the matching end tag is consumed.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the XML is malformed.
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError>;

    /// Build an instance from a self-closing root element (`<root/>`).
    fn from_empty_element() -> Result<Self, XmlError>;
}

/// Decode an XML document into a typed value.
///
/// Skips the declaration, comments, processing instructions, and any text
/// before the root element, then delegates to the type's
/// [`XmlDeserialize`] implementation. Content after the root element is not
/// inspected.
///
/// # Errors
///
/// Returns `XmlError` if the document has no root element or is malformed.
pub fn from_xml<T: XmlDeserialize>(xml: &[u8]) -> Result<T, XmlError> {
    let mut reader = Reader::from_reader(xml);

    loop {
        match read_checked_event(&mut reader)? {
            Event::Start(_) => return T::deserialize_xml(&mut reader),
            Event::Empty(_) => return T::from_empty_element(),
            Event::Eof => return Err(XmlError::MissingElement("root element".to_owned())),
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions for reading common XML patterns
// ---------------------------------------------------------------------------

/// Read the next event and reject it unless it is well-formed.
///
/// Start and empty tags must have UTF-8 names and valid attributes (quoted
/// values, no duplicates, known entities). Text, CDATA, and references must
/// decode to characters allowed by XML 1.0.
pub(crate) fn read_checked_event<'i>(reader: &mut Reader<&'i [u8]>) -> Result<Event<'i>, XmlError> {
    let event = reader.read_event()?;
    match &event {
        Event::Start(e) | Event::Empty(e) => check_start(reader, e)?,
        Event::Text(e) => {
            let decoded = e
                .decode()
                .map_err(|err| XmlError::ParseError(err.to_string()))?;
            check_chars(&decoded)?;
        }
        Event::CData(e) => {
            let decoded =
                std::str::from_utf8(e).map_err(|err| XmlError::ParseError(err.to_string()))?;
            check_chars(decoded)?;
        }
        Event::GeneralRef(e) => check_chars(&resolve_reference(e)?)?,
        _ => {}
    }
    Ok(event)
}

fn check_start(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<(), XmlError> {
    local_name(start.name().as_ref())?;
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
        local_name(attr.key.as_ref())?;
        let value = attr.decode_and_unescape_value(reader.decoder())?;
        check_chars(&value)?;
    }
    Ok(())
}

/// Reject characters outside the XML 1.0 `Char` production.
fn check_chars(text: &str) -> Result<(), XmlError> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(XmlError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Get the local (namespace-stripped) name of an element as a string.
pub(crate) fn local_name(raw: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| XmlError::ParseError(e.to_string()))
}

/// Read the character data of the current element and consume its end tag.
///
/// Expects the reader to be positioned right after a `Start` event. Only
/// text directly inside the element is kept; nested elements are skipped
/// together with their content. CDATA sections and entity references are
/// included in document order.
pub(crate) fn read_text_content(
    reader: &mut Reader<&[u8]>,
    element: &str,
) -> Result<String, XmlError> {
    let mut text = String::new();
    let mut depth: u32 = 1;
    loop {
        match read_checked_event(reader)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(text);
                }
            }
            Event::Text(e) if depth == 1 => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&decoded);
            }
            Event::CData(e) if depth == 1 => {
                let decoded =
                    std::str::from_utf8(&e).map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(decoded);
            }
            Event::GeneralRef(e) if depth == 1 => {
                text.push_str(&resolve_reference(&e)?);
            }
            Event::Eof => return Err(XmlError::UnexpectedEof(element.to_owned())),
            _ => {}
        }
    }
}

/// Skip over an element and all its children, still checking them.
pub(crate) fn skip_element(reader: &mut Reader<&[u8]>, element: &str) -> Result<(), XmlError> {
    let mut depth: u32 = 1;
    loop {
        match read_checked_event(reader)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => return Err(XmlError::UnexpectedEof(element.to_owned())),
            _ => {}
        }
    }
}

/// Resolve a character reference (`&#60;`) or one of the five predefined entities.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, XmlError> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|err| XmlError::ParseError(err.to_string()))?
    {
        return Ok(ch.to_string());
    }

    let name = reference
        .decode()
        .map_err(|err| XmlError::ParseError(err.to_string()))?;
    quick_xml::escape::resolve_predefined_entity(&name)
        .map(str::to_owned)
        .ok_or_else(|| XmlError::ParseError(format!("unknown entity reference &{name};")))
}
