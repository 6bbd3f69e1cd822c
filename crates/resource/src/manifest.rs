//! An object store described by a JSON manifest.
//!
//! ```json
//! [
//!   { "id": "tcm:1-42", "file": "images/logo.png", "mimeType": "image/png" },
//!   { "id": "tcm:1-10" }
//! ]
//! ```
//!
//! Entries without a `file` are items without binary content. File paths are
//! relative to the manifest directory and may not leave it.

use crate::filesystem::SafeRoot;
use binpub_traits::{BinaryStream, HostError, ObjectStore};
use binpub_types::{AssetId, AssetReference, BinaryContent};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestAsset {
    pub id: AssetId,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

impl ManifestAsset {
    fn reference(&self) -> AssetReference {
        AssetReference {
            id: self.id.clone(),
            binary: self.file.as_ref().map(|file| {
                BinaryContent::new(
                    file.as_str(),
                    self.mime_type.as_deref().unwrap_or(FALLBACK_MIME_TYPE),
                )
            }),
            external_id: self.external_id.clone(),
        }
    }
}

#[derive(Debug)]
pub struct ManifestObjectStore {
    root: SafeRoot,
    assets: HashMap<AssetId, ManifestAsset>,
}

impl ManifestObjectStore {
    pub fn new<P: AsRef<Path>>(base_dir: P, assets: Vec<ManifestAsset>) -> Self {
        Self {
            root: SafeRoot::new(base_dir),
            assets: assets.into_iter().map(|a| (a.id.clone(), a)).collect(),
        }
    }

    /// Parses a JSON array of assets.
    pub fn from_json<P: AsRef<Path>>(base_dir: P, json: &str) -> Result<Self, HostError> {
        let assets: Vec<ManifestAsset> =
            serde_json::from_str(json).map_err(|e| HostError::InvalidData(e.to_string()))?;
        Ok(Self::new(base_dir, assets))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl ObjectStore for ManifestObjectStore {
    fn get(&self, id: &AssetId) -> Result<Option<AssetReference>, HostError> {
        Ok(self.assets.get(id).map(ManifestAsset::reference))
    }

    fn open_binary(&self, id: &AssetId) -> Result<Option<BinaryStream>, HostError> {
        let Some(file) = self.assets.get(id).and_then(|a| a.file.as_deref()) else {
            return Ok(None);
        };
        let Some(path) = self.root.resolve(file) else {
            log::warn!("Binary path '{}' of '{}' leaves the manifest directory", file, id);
            return Ok(None);
        };
        match File::open(&path) {
            Ok(f) => Ok(Some(Box::new(f))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "ManifestObjectStore"
    }
}
