//! Strategies deciding where a binary is written.
//!
//! [`DefaultPlacement`] leaves everything to the host. [`TargetedPlacement`]
//! writes into a configured location under a variant-qualified name. The
//! builder picks one from the configuration; the dispatcher never branches
//! on it.

use crate::error::PublishError;
use crate::naming::NamingStrategy;
use binpub_traits::{LocationHandle, ObjectStore, PlacementRequest, Publisher};
use binpub_types::{AssetHandle, PublishedAsset, VariantId};
use std::fmt::Debug;

/// Host collaborators and pass facts a placement may use.
pub struct PlacementContext<'a> {
    pub store: &'a dyn ObjectStore,
    pub publisher: &'a dyn Publisher,
    pub variant: &'a VariantId,
}

pub trait Placement: Send + Sync + Debug {
    /// Publishes the binary behind `handle` exactly once and records the path on it.
    fn place(
        &self,
        handle: &mut AssetHandle,
        ctx: &PlacementContext<'_>,
    ) -> Result<PublishedAsset, PublishError>;

    /// The location binaries end up in, if the placement pins one.
    fn location(&self) -> Option<&LocationHandle> {
        None
    }
}

/// Host-default placement.
///
/// No variant is passed here: publishing one binary from several templates
/// with different variant ids and no explicit location makes the host
/// register the same file under conflicting identities.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPlacement;

impl Placement for DefaultPlacement {
    fn place(
        &self,
        handle: &mut AssetHandle,
        ctx: &PlacementContext<'_>,
    ) -> Result<PublishedAsset, PublishError> {
        // The host reads the binary itself; only check that there is one to read.
        if ctx.store.open_binary(handle.id())?.is_none() {
            return Ok(unreadable(handle));
        }

        log::debug!("Publishing '{}' with default placement and no variant id", handle.id());
        let path = ctx.publisher.add_binary(&handle.reference)?;
        log::debug!("Binary '{}' published to '{}'", handle.id(), path);

        handle.set_published_path(path.as_str());
        Ok(PublishedAsset {
            id: handle.id().clone(),
            resolved_path: Some(path),
            applied_variant: None,
        })
    }
}

/// Record for an asset whose binary cannot be read. Nothing is published.
fn unreadable(handle: &AssetHandle) -> PublishedAsset {
    log::error!("Cannot read the binary of '{}' as a stream; it is not published", handle.id());
    PublishedAsset {
        id: handle.id().clone(),
        resolved_path: None,
        applied_variant: None,
    }
}

/// Explicit placement into a resolved target location.
#[derive(Debug)]
pub struct TargetedPlacement {
    location: LocationHandle,
    naming: Box<dyn NamingStrategy>,
}

impl TargetedPlacement {
    pub fn new(location: LocationHandle, naming: Box<dyn NamingStrategy>) -> Self {
        Self { location, naming }
    }
}

impl Placement for TargetedPlacement {
    fn place(
        &self,
        handle: &mut AssetHandle,
        ctx: &PlacementContext<'_>,
    ) -> Result<PublishedAsset, PublishError> {
        let file_name = self.naming.file_name(&handle.reference, ctx.variant)?;
        let mime_type = handle
            .reference
            .binary
            .as_ref()
            .map(|b| b.mime_type.clone())
            .unwrap_or_default();

        let Some(mut stream) = ctx.store.open_binary(handle.id())? else {
            return Ok(unreadable(handle));
        };

        log::debug!(
            "Publishing '{}' to location {} with variant id {} and file name {}",
            handle.id(),
            self.location.uri,
            ctx.variant,
            file_name
        );
        let path = ctx.publisher.add_binary_at(PlacementRequest {
            stream: &mut stream,
            file_name: &file_name,
            location: &self.location,
            variant: ctx.variant,
            asset: &handle.reference,
            mime_type: &mime_type,
        })?;
        drop(stream);
        log::debug!("Binary '{}' published to '{}'", handle.id(), path);

        handle.set_published_path(path.as_str());
        Ok(PublishedAsset {
            id: handle.id().clone(),
            resolved_path: Some(path),
            applied_variant: Some(ctx.variant.clone()),
        })
    }

    fn location(&self) -> Option<&LocationHandle> {
        Some(&self.location)
    }
}
