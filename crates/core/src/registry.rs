//! Per-pass deduplication store.

use binpub_types::{AssetHandle, AssetId, PublishedAsset};
use indexmap::IndexMap;

#[derive(Debug, Clone)]
struct RegistryEntry {
    handle: AssetHandle,
    published: PublishedAsset,
}

/// Everything published during one rendering pass, keyed by asset identity.
///
/// Entries are never replaced: the first record for an identity wins, which is
/// what guarantees a single publish per identity per pass. Iteration follows
/// publish order.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    entries: IndexMap<AssetId, RegistryEntry>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &AssetId) -> Option<&PublishedAsset> {
        self.entries.get(id).map(|e| &e.published)
    }

    /// The materialized handle of a published asset, including its properties.
    pub fn handle(&self, id: &AssetId) -> Option<&AssetHandle> {
        self.entries.get(id).map(|e| &e.handle)
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PublishedAsset> {
        self.entries.values().map(|e| &e.published)
    }

    /// Stores the outcome for an identity and returns the stored record.
    ///
    /// If the identity is already present the existing record is kept and returned.
    pub(crate) fn record(
        &mut self,
        handle: AssetHandle,
        published: PublishedAsset,
    ) -> &PublishedAsset {
        &self
            .entries
            .entry(published.id.clone())
            .or_insert(RegistryEntry { handle, published })
            .published
    }
}
