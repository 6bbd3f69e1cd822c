//! Filesystem host for the binary publication resolver.
//!
//! These implement the host traits from `binpub-traits` on top of plain
//! directories, for command-line use and tests:
//!
//! - [`ManifestObjectStore`]: assets listed in a JSON manifest, binaries read from disk
//! - [`DirectoryPublisher`]: writes published binaries below an output directory
//!
//! Location resolution needs nothing beyond a table, so the
//! `StaticLocationResolver` from `binpub-traits` is re-exported for convenience.

mod filesystem;
mod manifest;

pub use filesystem::{DirectoryPublisher, SafeRoot};
pub use manifest::{ManifestAsset, ManifestObjectStore};

pub use binpub_traits::StaticLocationResolver;
