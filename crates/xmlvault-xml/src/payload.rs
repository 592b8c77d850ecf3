//! The structured upload payload.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::deserialize::{
    XmlDeserialize, from_xml, local_name, read_checked_event, read_text_content, skip_element,
};
use crate::error::XmlError;

/// A message record carried by an upload.
///
/// No field is mandatory: a well-formed document lacking any of the three
/// elements decodes with that field left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlPayload {
    /// Content of `<UserFrom>`.
    pub user_from: String,
    /// Content of `<UserTo>`.
    pub user_to: String,
    /// Content of `<Message>`.
    pub message: String,
}

impl XmlPayload {
    /// Decode a payload from raw request bytes.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` when the bytes are not a well-formed XML document.
    pub fn decode(body: &[u8]) -> Result<Self, XmlError> {
        let payload = from_xml::<Self>(body)?;
        tracing::trace!(
            user_from = %payload.user_from,
            user_to = %payload.user_to,
            message_len = payload.message.len(),
            "decoded xml payload"
        );
        Ok(payload)
    }
}

impl XmlDeserialize for XmlPayload {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut payload = Self::default();

        loop {
            match read_checked_event(reader)? {
                Event::Start(e) => {
                    let name = local_name(e.local_name().as_ref())?;
                    match name.as_str() {
                        "UserFrom" => payload.user_from = read_text_content(reader, &name)?,
                        "UserTo" => payload.user_to = read_text_content(reader, &name)?,
                        "Message" => payload.message = read_text_content(reader, &name)?,
                        _ => skip_element(reader, &name)?,
                    }
                }
                Event::Empty(e) => {
                    let name = local_name(e.local_name().as_ref())?;
                    match name.as_str() {
                        "UserFrom" => payload.user_from.clear(),
                        "UserTo" => payload.user_to.clear(),
                        "Message" => payload.message.clear(),
                        _ => {}
                    }
                }
                Event::End(_) => break,
                Event::Eof => return Err(XmlError::UnexpectedEof("root element".to_owned())),
                _ => {}
            }
        }

        Ok(payload)
    }

    fn from_empty_element() -> Result<Self, XmlError> {
        Ok(Self::default())
    }
}
