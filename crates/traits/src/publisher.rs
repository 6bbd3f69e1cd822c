//! Publisher trait: the host operation that actually writes a binary.

use crate::{HostError, LocationHandle};
use binpub_types::{AssetId, AssetReference, VariantId};
use std::fmt::Debug;
use std::io::Read;
use std::sync::Mutex;

/// Everything the host needs to place a binary explicitly.
pub struct PlacementRequest<'a> {
    pub stream: &'a mut dyn Read,
    pub file_name: &'a str,
    pub location: &'a LocationHandle,
    pub variant: &'a VariantId,
    pub asset: &'a AssetReference,
    pub mime_type: &'a str,
}

/// Adds binaries to the item being rendered and reports where they ended up.
pub trait Publisher: Send + Sync + Debug {
    /// Publishes with host-default placement. No name or variant is passed.
    fn add_binary(&self, asset: &AssetReference) -> Result<String, HostError>;

    /// Publishes a stream under an explicit name, location and variant.
    fn add_binary_at(&self, request: PlacementRequest<'_>) -> Result<String, HostError>;
}

/// One call observed by [`RecordingPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishCall {
    Default {
        id: AssetId,
    },
    Placed {
        id: AssetId,
        file_name: String,
        location: String,
        variant: VariantId,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

impl PublishCall {
    pub fn id(&self) -> &AssetId {
        match self {
            PublishCall::Default { id } | PublishCall::Placed { id, .. } => id,
        }
    }
}

/// A publisher that records every call and returns predictable paths.
///
/// Default placement yields `{default_root}/{file name}`, explicit placement
/// `{location path}/{file name}`.
#[derive(Debug)]
pub struct RecordingPublisher {
    default_root: String,
    calls: Mutex<Vec<PublishCall>>,
}

impl Default for RecordingPublisher {
    fn default() -> Self {
        Self::new("/binaries")
    }
}

impl RecordingPublisher {
    pub fn new(default_root: impl Into<String>) -> Self {
        Self {
            default_root: default_root.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of publish calls made for `id`.
    pub fn count_for(&self, id: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.id().as_str() == id)
            .count()
    }

    fn record(&self, call: PublishCall) -> Result<(), HostError> {
        self.calls
            .lock()
            .map_err(|_| HostError::LockPoisoned)?
            .push(call);
        Ok(())
    }
}

impl Publisher for RecordingPublisher {
    fn add_binary(&self, asset: &AssetReference) -> Result<String, HostError> {
        let file_name = asset
            .binary
            .as_ref()
            .map(|b| b.filename.clone())
            .ok_or_else(|| HostError::PublishFailed {
                id: asset.id.to_string(),
                message: "item has no binary content".to_string(),
            })?;
        self.record(PublishCall::Default {
            id: asset.id.clone(),
        })?;
        Ok(format!("{}/{}", self.default_root, file_name))
    }

    fn add_binary_at(&self, request: PlacementRequest<'_>) -> Result<String, HostError> {
        let mut bytes = Vec::new();
        request.stream.read_to_end(&mut bytes)?;
        self.record(PublishCall::Placed {
            id: request.asset.id.clone(),
            file_name: request.file_name.to_string(),
            location: request.location.path.clone(),
            variant: request.variant.clone(),
            mime_type: request.mime_type.to_string(),
            bytes,
        })?;
        Ok(format!("{}/{}", request.location.path, request.file_name))
    }
}
