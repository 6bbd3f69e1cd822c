//! Exactly-once publishing of binaries within a rendering pass.

use crate::error::PublishError;
use crate::placement::{Placement, PlacementContext};
use crate::reference::ReferencePathStrategy;
use crate::registry::AssetRegistry;
use binpub_traits::{LocationHandle, ObjectStore, Publisher};
use binpub_types::{AssetHandle, AssetId, VariantId};
use std::sync::Arc;

/// Resolves asset identities to published paths, publishing each at most once.
///
/// One dispatcher lives for one pass and owns that pass's registry. Passes
/// run single-threaded, so the registry needs no locking.
#[derive(Debug)]
pub struct BinaryPublishDispatcher {
    store: Arc<dyn ObjectStore>,
    publisher: Arc<dyn Publisher>,
    placement: Box<dyn Placement>,
    reference_paths: Box<dyn ReferencePathStrategy>,
    variant: VariantId,
    registry: AssetRegistry,
}

impl BinaryPublishDispatcher {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        publisher: Arc<dyn Publisher>,
        placement: Box<dyn Placement>,
        reference_paths: Box<dyn ReferencePathStrategy>,
        variant: VariantId,
    ) -> Self {
        Self {
            store,
            publisher,
            placement,
            reference_paths,
            variant,
            registry: AssetRegistry::new(),
        }
    }

    /// Returns the reference path for `id`, publishing its binary on first use.
    ///
    /// Later calls for the same identity return the stored result without
    /// touching the host. `Ok(None)` means the binary could not be read; the
    /// failure was logged and is remembered for the rest of the pass.
    ///
    /// # Errors
    ///
    /// `AssetNotFound` if the object store has no such item; host and naming
    /// failures are passed through.
    pub fn resolve(&mut self, id: &AssetId) -> Result<Option<String>, PublishError> {
        if let Some(published) = self.registry.get(id) {
            log::debug!("Binary '{}' already published in this pass, not publishing again", id);
            return Ok(self.reference_paths.reference_path(published));
        }

        let reference = self
            .store
            .get(id)?
            .ok_or_else(|| PublishError::AssetNotFound(id.clone()))?;
        log::debug!(
            "Binary '{}' is new in this pass, publishing from {}",
            id,
            self.store.name()
        );

        let mut handle = AssetHandle::new(reference);
        let ctx = PlacementContext {
            store: self.store.as_ref(),
            publisher: self.publisher.as_ref(),
            variant: &self.variant,
        };
        let published = self.placement.place(&mut handle, &ctx)?;
        let published = self.registry.record(handle, published);
        Ok(self.reference_paths.reference_path(published))
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    pub fn variant(&self) -> &VariantId {
        &self.variant
    }

    pub fn location(&self) -> Option<&LocationHandle> {
        self.placement.location()
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> AssetRegistry {
        self.registry
    }
}
