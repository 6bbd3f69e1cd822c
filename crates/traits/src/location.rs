//! Resolution of configured target locations to concrete placement handles.

use crate::HostError;
use binpub_types::ItemUri;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

/// A resolved output location, analogous to an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationHandle {
    pub uri: ItemUri,
    /// Publish path of the location, without a trailing slash.
    pub path: String,
}

pub trait LocationResolver: Send + Sync + Debug {
    /// Maps an already-localized location URI to a placement handle.
    fn resolve(&self, uri: ItemUri) -> Result<LocationHandle, HostError>;
}

/// A resolver backed by a fixed `uri -> path` table.
#[derive(Debug, Default)]
pub struct StaticLocationResolver {
    locations: RwLock<HashMap<ItemUri, String>>,
}

impl StaticLocationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(self, uri: ItemUri, path: impl Into<String>) -> Self {
        if let Ok(mut locations) = self.locations.write() {
            let path = path.into();
            locations.insert(uri, path.trim_end_matches('/').to_string());
        }
        self
    }
}

impl LocationResolver for StaticLocationResolver {
    fn resolve(&self, uri: ItemUri) -> Result<LocationHandle, HostError> {
        let locations = self.locations.read().map_err(|_| HostError::LockPoisoned)?;
        locations
            .get(&uri)
            .map(|path| LocationHandle {
                uri,
                path: path.clone(),
            })
            .ok_or_else(|| HostError::NotFound(uri.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_resolver_resolves_known_uri() {
        let uri: ItemUri = "tcm:1-5-4".parse().unwrap();
        let resolver = StaticLocationResolver::new().with_location(uri, "/media/");
        let handle = resolver.resolve(uri).unwrap();
        assert_eq!(handle.path, "/media");
    }

    #[test]
    fn test_static_resolver_unknown_uri() {
        let resolver = StaticLocationResolver::new();
        let result = resolver.resolve("tcm:1-5-4".parse().unwrap());
        assert!(matches!(result, Err(HostError::NotFound(_))));
    }
}
