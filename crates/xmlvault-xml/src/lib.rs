//! XML payload decoding for xmlvault.
//!
//! The validating upload variant accepts any well-formed document and maps
//! three leaf elements of its root into an [`XmlPayload`]:
//!
//! ```xml
//! <xmlPayload>
//!   <UserFrom>alice</UserFrom>
//!   <UserTo>bob</UserTo>
//!   <Message>hi</Message>
//! </xmlPayload>
//! ```
//!
//! # Key components
//!
//! - [`XmlDeserialize`] trait and [`from_xml`] for streaming decoding with quick-xml
//! - [`XmlPayload`], the three-field record
//! - [`XmlError`] for malformed input

pub mod deserialize;
pub mod error;
mod payload;

pub use deserialize::{XmlDeserialize, from_xml};
pub use error::XmlError;
pub use payload::XmlPayload;
