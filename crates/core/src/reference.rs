use binpub_types::PublishedAsset;
use std::fmt::Debug;

/// Turns a published asset into the path stored in rendered output.
pub trait ReferencePathStrategy: Send + Sync + Debug {
    fn reference_path(&self, asset: &PublishedAsset) -> Option<String>;
}

/// The published path, unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PublishedPath;

impl ReferencePathStrategy for PublishedPath {
    fn reference_path(&self, asset: &PublishedAsset) -> Option<String> {
        asset.resolved_path.clone()
    }
}

/// Serves binaries from another origin (e.g. a CDN) by prefixing a base URL.
#[derive(Debug, Clone)]
pub struct PrefixedReferencePath {
    base_url: String,
}

impl PrefixedReferencePath {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }
}

impl ReferencePathStrategy for PrefixedReferencePath {
    fn reference_path(&self, asset: &PublishedAsset) -> Option<String> {
        let path = asset.resolved_path.as_deref()?;
        if path.is_empty() {
            return Some(String::new());
        }
        let separator = if path.starts_with('/') { "" } else { "/" };
        Some(format!("{}{}{}", self.base_url, separator, path))
    }
}
