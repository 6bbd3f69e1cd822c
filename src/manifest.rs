//! A JSON description of one rendering pass against a directory of binaries.
//!
//! ```json
//! {
//!   "publicationId": 1,
//!   "variant": "tcm:1-99-32",
//!   "config": { "targetLocation": "tcm:1-5-4" },
//!   "locations": { "tcm:1-5-4": "/media" },
//!   "assets": [{ "id": "tcm:1-42", "file": "logo.png", "mimeType": "image/png" }]
//! }
//! ```
//!
//! Location keys are matched after the target location has been localized to
//! `publicationId`, so they should use that publication.

use crate::error::AppError;
use binpub_core::{PublishConfig, PublishPass, RenderContext};
use binpub_resource::{
    DirectoryPublisher, ManifestAsset, ManifestObjectStore, StaticLocationResolver,
};
use binpub_traits::InMemoryExternalResolver;
use binpub_types::{ItemUri, VariantId};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassManifest {
    pub publication_id: u32,
    pub variant: VariantId,
    #[serde(default)]
    pub config: PublishConfig,
    #[serde(default)]
    pub locations: BTreeMap<String, String>,
    /// Base URL of the external content library, required when external handling is on.
    #[serde(default)]
    pub external_base_url: Option<String>,
    #[serde(default)]
    pub assets: Vec<ManifestAsset>,
    /// Directory asset files are relative to; the manifest's own directory when loaded from disk.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl PassManifest {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to read manifest '{}': {}", path.display(), e),
            )
        })?;
        let mut manifest = Self::from_json(&source)?;
        manifest.base_dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        Ok(manifest)
    }

    pub fn location_resolver(&self) -> Result<StaticLocationResolver, AppError> {
        let mut resolver = StaticLocationResolver::new();
        for (uri, path) in &self.locations {
            let uri: ItemUri = uri
                .parse()
                .map_err(|e| AppError::Manifest(format!("location key: {}", e)))?;
            resolver = resolver.with_location(uri, path.as_str());
        }
        Ok(resolver)
    }

    /// Starts a pass that reads binaries from the manifest directory and
    /// writes them to `output_dir`.
    pub fn start_pass<P: AsRef<Path>>(&self, output_dir: P) -> Result<PublishPass, AppError> {
        let store = Arc::new(ManifestObjectStore::new(&self.base_dir, self.assets.clone()));
        let publisher = Arc::new(DirectoryPublisher::new(output_dir, store.clone()));
        let context = RenderContext::new(self.variant.clone(), self.publication_id);

        let mut builder = PublishPass::builder(store, publisher, context)
            .with_config(self.config.clone())
            .with_location_resolver(Arc::new(self.location_resolver()?));
        if let Some(url) = &self.external_base_url {
            let library = InMemoryExternalResolver::new(url.as_str());
            builder = builder.with_external_resolver(Arc::new(library));
        }
        Ok(builder.build()?)
    }
}
