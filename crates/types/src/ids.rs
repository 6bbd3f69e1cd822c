//! Newtype wrappers for asset and variant identifiers
//!
//! Both are opaque strings on the wire. Keeping them apart at the type level
//! stops a variant id from ever being used as a registry key.

use crate::ASSET_URI_SCHEME;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable identity of a logical binary-bearing item, independent of variant.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(Arc<str>);

impl AssetId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identity without its `tcm:` scheme and colons, safe to embed in a file name.
    pub fn file_safe(&self) -> String {
        strip_separators(&self.0)
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the rendering template/variant active for a pass.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(Arc<str>);

impl VariantId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The variant id without its `tcm:` scheme and colons, safe to embed in a file name.
    pub fn file_safe(&self) -> String {
        strip_separators(&self.0)
    }
}

impl From<String> for VariantId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for VariantId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn strip_separators(s: &str) -> String {
    let body = s.strip_prefix(ASSET_URI_SCHEME).unwrap_or(s);
    body.chars().filter(|c| *c != ':').collect()
}
