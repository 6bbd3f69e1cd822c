use crate::AssetId;
use serde::{Deserialize, Serialize};

/// Binary payload of a structured multimedia field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Multimedia {
    pub file_name: String,
    pub mime_type: String,
    /// Resolved URL, filled in by the multimedia publisher.
    #[serde(default)]
    pub url: Option<String>,
}

impl Multimedia {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            url: None,
        }
    }
}

/// A structured (non rich-text) reference to a multimedia item in the rendered content model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultimediaField {
    pub id: AssetId,
    #[serde(default)]
    pub multimedia: Option<Multimedia>,
    /// Stamp left by the external content library once the stub is processed.
    #[serde(default)]
    pub external_id: Option<String>,
}

impl MultimediaField {
    pub fn new(id: impl Into<AssetId>, multimedia: Option<Multimedia>) -> Self {
        Self {
            id: id.into(),
            multimedia,
            external_id: None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.multimedia.as_ref().and_then(|m| m.url.as_deref())
    }
}
