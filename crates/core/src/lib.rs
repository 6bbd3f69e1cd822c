//! # binpub-core
//!
//! Binary publication for a content rendering pass.
//!
//! Given rendered content that references binary assets, this crate makes sure
//! each asset is published exactly once per pass, rewrites rich-text links to
//! the published location, fills in the URL of structured multimedia fields,
//! and names binaries so that two variants of the same asset never collide.
//!
//! - **naming**: collision-free file names (`FileNamer`)
//! - **registry**: per-pass deduplication store
//! - **placement**: default versus targeted placement of binaries
//! - **dispatcher**: exactly-once publishing on top of the registry
//! - **external**: delegation to the external content library
//! - **richtext**: XHTML link rewriting
//! - **multimedia**: structured multimedia fields
//! - **pass**: the per-pass facade and its builder
//!
//! Host access goes exclusively through the traits in `binpub-traits`.

pub use binpub_traits as traits;
pub use binpub_types as types;

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod external;
pub mod multimedia;
pub mod naming;
pub mod pass;
pub mod placement;
pub mod reference;
pub mod registry;
pub mod richtext;

pub use config::{EXTERNAL_ASSETS_PARAM, PublishConfig, RenderContext, TARGET_LOCATION_PARAM};
pub use dispatcher::BinaryPublishDispatcher;
pub use error::PublishError;
pub use external::ExternalAssetProcessor;
pub use multimedia::MultimediaFieldPublisher;
pub use naming::{FileNamer, NamingError, NamingStrategy, split_file_name};
pub use pass::{PublishPass, PublishPassBuilder};
pub use placement::{DefaultPlacement, Placement, PlacementContext, TargetedPlacement};
pub use reference::{PrefixedReferencePath, PublishedPath, ReferencePathStrategy};
pub use registry::AssetRegistry;
pub use richtext::RichTextLinkRewriter;
