//! Plain data types shared by the binary publication crates.
//!
//! Nothing in here talks to a host. The types describe assets as the object
//! store hands them out, the records a rendering pass produces for them, and
//! the content-model fields the resolver rewrites.

pub mod asset;
pub mod field;
pub mod ids;
pub mod link;
pub mod uri;

pub use asset::{AssetHandle, AssetReference, BinaryContent, PropertyMap, PublishedAsset};
pub use field::{Multimedia, MultimediaField};
pub use ids::{AssetId, VariantId};
pub use link::LinkElement;
pub use uri::{ItemUri, ItemUriError};

/// MIME type marking a stub whose binary lives in an external content library.
pub const EXTERNAL_MIME_TYPE: &str = "application/externalcontentlibrary";

/// Scheme prefix of identifiers that point at content-managed items.
pub const ASSET_URI_SCHEME: &str = "tcm:";

/// Namespace of the `href` attribute that carries asset links in rich text.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Property set on an asset handle once its binary has been published.
pub const PUBLISHED_PATH_PROPERTY: &str = "PublishedPath";
