//! Assets as handed out by the object store and as recorded after publishing.

use crate::{AssetId, PUBLISHED_PATH_PROPERTY, VariantId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata of the binary attached to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryContent {
    /// Original file name as stored, possibly including directory components.
    pub filename: String,
    pub mime_type: String,
}

impl BinaryContent {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// A read-only view of an asset in the host object store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReference {
    pub id: AssetId,
    #[serde(default)]
    pub binary: Option<BinaryContent>,
    /// Identifier assigned by the external content library, once processed.
    #[serde(default)]
    pub external_id: Option<String>,
}

impl AssetReference {
    pub fn new(id: impl Into<AssetId>) -> Self {
        Self {
            id: id.into(),
            binary: None,
            external_id: None,
        }
    }

    pub fn with_binary(
        mut self,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        self.binary = Some(BinaryContent::new(filename, mime_type));
        self
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn is_multimedia(&self) -> bool {
        self.binary.is_some()
    }
}

pub type PropertyMap = BTreeMap<String, String>;

/// A materialized asset: the reference plus the property map placements write to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHandle {
    pub reference: AssetReference,
    pub properties: PropertyMap,
}

impl AssetHandle {
    pub fn new(reference: AssetReference) -> Self {
        Self {
            reference,
            properties: PropertyMap::new(),
        }
    }

    pub fn id(&self) -> &AssetId {
        &self.reference.id
    }

    pub fn published_path(&self) -> Option<&str> {
        self.properties
            .get(PUBLISHED_PATH_PROPERTY)
            .map(String::as_str)
    }

    pub fn set_published_path(&mut self, path: impl Into<String>) {
        self.properties
            .insert(PUBLISHED_PATH_PROPERTY.to_string(), path.into());
    }
}

/// The outcome of publishing one asset during one pass. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedAsset {
    pub id: AssetId,
    /// `None` when the binary could not be read and nothing was written.
    pub resolved_path: Option<String>,
    /// Variant passed to the host; absent for default placement.
    pub applied_variant: Option<VariantId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_published_path_property() {
        let mut handle = AssetHandle::new(AssetReference::new("tcm:1-42"));
        assert_eq!(handle.published_path(), None);
        handle.set_published_path("/media/a.png");
        assert_eq!(handle.published_path(), Some("/media/a.png"));
        assert_eq!(
            handle.properties.get(PUBLISHED_PATH_PROPERTY).map(String::as_str),
            Some("/media/a.png")
        );
    }

    #[test]
    fn test_reference_deserializes_with_defaults() {
        let r: AssetReference = serde_json::from_str(r#"{"id":"tcm:1-2"}"#).unwrap();
        assert!(!r.is_multimedia());
        assert!(r.external_id.is_none());
    }
}
