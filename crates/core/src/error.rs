//! Error types for publication operations.
//!
//! Only failures that must reach the caller live here. Recoverable conditions
//! (unreadable binaries, non-asset links, already processed stubs) are
//! logged where they happen and never become errors.

use crate::naming::NamingError;
use binpub_traits::HostError;
use binpub_types::AssetId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("File naming failed: {0}")]
    Naming(#[from] NamingError),

    #[error("Rich text is not well-formed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error while writing rich text: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rich text is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Rich text name is not valid UTF-8: {0}")]
    Utf8Str(#[from] std::str::Utf8Error),

    #[error("Asset '{0}' does not exist in the object store")]
    AssetNotFound(AssetId),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<quick_xml::events::attributes::AttrError> for PublishError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        PublishError::Xml(quick_xml::Error::InvalidAttr(e))
    }
}
