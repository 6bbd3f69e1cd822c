//! Collision-free file names for binaries published under a variant.
//!
//! The same asset rendered by two templates ends up in the same location
//! twice, so the name carries both the asset identity and the variant:
//! `photo.jpg` for `tcm:1-42` under `tcm:1-99-32` becomes
//! `photo_1-42_1-99-32.jpg`.

use binpub_types::{AssetId, AssetReference, VariantId};
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("asset '{0}' has no file name to derive a published name from")]
    MissingFileName(AssetId),
}

/// Produces the file name a binary is published under.
pub trait NamingStrategy: Send + Sync + Debug {
    fn file_name(&self, asset: &AssetReference, variant: &VariantId) -> Result<String, NamingError>;
}

/// Default naming: `{stem}_{identity}_{variant}.{extension}` with colons removed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileNamer;

impl NamingStrategy for FileNamer {
    fn file_name(
        &self,
        asset: &AssetReference,
        variant: &VariantId,
    ) -> Result<String, NamingError> {
        let original = asset
            .binary
            .as_ref()
            .map(|b| b.filename.as_str())
            .unwrap_or_default();
        let (stem, extension) = split_file_name(original);
        if stem.is_empty() && extension.is_none() {
            return Err(NamingError::MissingFileName(asset.id.clone()));
        }

        let mut name = format!("{}_{}_{}", stem, asset.id.file_safe(), variant.file_safe());
        if let Some(ext) = extension {
            name.push('.');
            name.push_str(ext);
        }
        Ok(name)
    }
}

/// Splits a stored file name into stem and extension.
///
/// Directory components (`/` or `\`) are discarded first. The extension is
/// whatever follows the last dot. A name without a dot, one ending in a dot,
/// or a dot-file such as `.htaccess` has no extension and is returned whole
/// as the stem.
pub fn split_file_name(name: &str) -> (&str, Option<&str>) {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (base, None),
    }
}
