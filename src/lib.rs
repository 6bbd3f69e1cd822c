//! # binpub
//!
//! Binary publication for content rendering passes.
//!
//! This crate ties the workspace together: the resolver core, the host
//! traits with their in-memory implementations, and the filesystem host used
//! by the command-line tool.

pub use binpub_core as core;
pub use binpub_resource as resource;
pub use binpub_traits as traits;
pub use binpub_types as types;

pub mod error;
pub mod manifest;

pub use binpub_core::{
    AssetRegistry, FileNamer, NamingStrategy, PrefixedReferencePath, PublishConfig, PublishError,
    PublishPass, PublishPassBuilder, ReferencePathStrategy, RenderContext,
};
pub use binpub_types::{AssetId, AssetReference, Multimedia, MultimediaField, VariantId};
pub use error::AppError;
pub use manifest::PassManifest;
