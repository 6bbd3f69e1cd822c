//! ObjectStore trait for looking up assets and reading their binaries.
//!
//! The resolver only ever asks two things of the host's object model: what an
//! identity refers to, and the bytes behind it. Everything else about the
//! host's items stays on the host side of this trait.

use crate::HostError;
use binpub_types::{AssetId, AssetReference};
use std::collections::HashMap;
use std::fmt::Debug;
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Shared binary data (reference-counted bytes).
pub type SharedBinaryData = Arc<Vec<u8>>;

/// A readable binary stream. Dropping it releases the underlying handle.
pub type BinaryStream = Box<dyn Read + Send>;

/// Read access to the host object store.
///
/// # Implementations
///
/// - `InMemoryObjectStore`: pre-populated in-memory store (always available)
/// - `ManifestObjectStore` in `binpub-resource`: assets listed in a manifest, binaries on disk
pub trait ObjectStore: Send + Sync + Debug {
    /// Looks up an item by identity.
    ///
    /// Returns `Ok(None)` when nothing with that identity exists. Items without
    /// binary content are returned too; callers decide whether they care.
    fn get(&self, id: &AssetId) -> Result<Option<AssetReference>, HostError>;

    /// Opens the binary of an item for reading.
    ///
    /// Returns `Ok(None)` when the item has no readable binary.
    fn open_binary(&self, id: &AssetId) -> Result<Option<BinaryStream>, HostError>;

    /// Returns a human-readable name for this store (for logging/debugging).
    fn name(&self) -> &'static str;
}

#[derive(Debug)]
struct StoredAsset {
    reference: AssetReference,
    data: Option<SharedBinaryData>,
}

/// An in-memory object store.
///
/// Besides serving lookups it counts how many binary streams are currently
/// open, so callers can check that every stream was released.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    assets: RwLock<HashMap<AssetId, StoredAsset>>,
    open_streams: Arc<AtomicUsize>,
    lookups: AtomicUsize,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset, optionally with its binary data.
    ///
    /// # Errors
    ///
    /// Returns `HostError::LockPoisoned` if the internal lock is poisoned.
    pub fn add(&self, reference: AssetReference, data: Option<Vec<u8>>) -> Result<(), HostError> {
        let mut assets = self.assets.write().map_err(|_| HostError::LockPoisoned)?;
        assets.insert(
            reference.id.clone(),
            StoredAsset {
                reference,
                data: data.map(Arc::new),
            },
        );
        Ok(())
    }

    /// Number of binary streams handed out and not yet dropped.
    pub fn open_streams(&self) -> usize {
        self.open_streams.load(Ordering::SeqCst)
    }

    /// Number of `get` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.assets.read().map(|a| a.is_empty()).unwrap_or(true)
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn get(&self, id: &AssetId) -> Result<Option<AssetReference>, HostError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let assets = self.assets.read().map_err(|_| HostError::LockPoisoned)?;
        Ok(assets.get(id).map(|a| a.reference.clone()))
    }

    fn open_binary(&self, id: &AssetId) -> Result<Option<BinaryStream>, HostError> {
        let assets = self.assets.read().map_err(|_| HostError::LockPoisoned)?;
        let Some(data) = assets.get(id).and_then(|a| a.data.clone()) else {
            return Ok(None);
        };
        self.open_streams.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Box::new(CountedStream {
            inner: Cursor::new(data.to_vec()),
            open: Arc::clone(&self.open_streams),
        })))
    }

    fn name(&self) -> &'static str {
        "InMemoryObjectStore"
    }
}

struct CountedStream {
    inner: Cursor<Vec<u8>>,
    open: Arc<AtomicUsize>,
}

impl Read for CountedStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for CountedStream {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logo() -> AssetReference {
        AssetReference::new("tcm:1-42").with_binary("logo.png", "image/png")
    }

    #[test]
    fn test_in_memory_store_get() {
        let store = InMemoryObjectStore::new();
        store.add(logo(), Some(b"png".to_vec())).unwrap();

        let found = store.get(&AssetId::from("tcm:1-42")).unwrap();
        assert_eq!(found, Some(logo()));
        assert_eq!(store.lookups(), 1);
    }

    #[test]
    fn test_in_memory_store_not_found() {
        let store = InMemoryObjectStore::new();
        assert!(store.get(&AssetId::from("tcm:1-1")).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_binary_reads_data() {
        let store = InMemoryObjectStore::new();
        store.add(logo(), Some(b"Hello".to_vec())).unwrap();

        let mut stream = store.open_binary(&AssetId::from("tcm:1-42")).unwrap().unwrap();
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"Hello");
    }

    #[test]
    fn test_open_binary_without_data() {
        let store = InMemoryObjectStore::new();
        store.add(logo(), None).unwrap();
        assert!(store.open_binary(&AssetId::from("tcm:1-42")).unwrap().is_none());
        assert_eq!(store.open_streams(), 0);
    }

    #[test]
    fn test_dropping_stream_releases_it() {
        let store = InMemoryObjectStore::new();
        store.add(logo(), Some(vec![1, 2, 3])).unwrap();

        let stream = store.open_binary(&AssetId::from("tcm:1-42")).unwrap();
        assert_eq!(store.open_streams(), 1);
        drop(stream);
        assert_eq!(store.open_streams(), 0);
    }

    #[test]
    fn test_add_overwrites() {
        let store = InMemoryObjectStore::new();
        store.add(logo(), None).unwrap();
        store
            .add(logo().with_external_id("ecl:7"), None)
            .unwrap();
        assert_eq!(store.len(), 1);
        let found = store.get(&AssetId::from("tcm:1-42")).unwrap().unwrap();
        assert_eq!(found.external_id.as_deref(), Some("ecl:7"));
    }
}
