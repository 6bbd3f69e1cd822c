//! Structured content-manager item URIs (`tcm:<publication>-<item>[-<type>][-v<version>]`).

use crate::ASSET_URI_SCHEME;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemUriError {
    #[error("'{0}' does not start with 'tcm:'")]
    MissingScheme(String),

    #[error("'{uri}' has an invalid {part} segment")]
    InvalidSegment { uri: String, part: &'static str },

    #[error("'{0}' has too many segments")]
    TooManySegments(String),
}

/// A parsed item URI.
///
/// Used for configuration values that must name a concrete item (the target
/// location). Asset identities stay opaque and are never parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemUri {
    pub publication_id: u32,
    pub item_id: u32,
    pub item_type: Option<u32>,
    pub version: Option<u32>,
}

impl ItemUri {
    /// Returns `true` if `s` is a well-formed item URI.
    pub fn is_valid(s: &str) -> bool {
        s.parse::<ItemUri>().is_ok()
    }

    /// The same item as seen from another publication.
    pub fn localize(self, publication_id: u32) -> ItemUri {
        ItemUri {
            publication_id,
            ..self
        }
    }
}

impl FromStr for ItemUri {
    type Err = ItemUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix(ASSET_URI_SCHEME)
            .ok_or_else(|| ItemUriError::MissingScheme(s.to_string()))?;

        let invalid = |part| ItemUriError::InvalidSegment {
            uri: s.to_string(),
            part,
        };
        let number = |seg: Option<&str>, part| -> Result<u32, ItemUriError> {
            seg.filter(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| invalid(part))
        };

        let mut segments = body.split('-');
        let publication_id = number(segments.next(), "publication")?;
        let item_id = number(segments.next(), "item")?;

        let mut item_type = None;
        let mut version = None;
        for seg in segments {
            if version.is_some() {
                return Err(ItemUriError::TooManySegments(s.to_string()));
            }
            if let Some(v) = seg.strip_prefix('v') {
                version = Some(number(Some(v), "version")?);
            } else if item_type.is_none() {
                item_type = Some(number(Some(seg), "type")?);
            } else {
                return Err(ItemUriError::TooManySegments(s.to_string()));
            }
        }

        Ok(ItemUri {
            publication_id,
            item_id,
            item_type,
            version,
        })
    }
}

impl fmt::Display for ItemUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}", ASSET_URI_SCHEME, self.publication_id, self.item_id)?;
        if let Some(t) = self.item_type {
            write!(f, "-{}", t)?;
        }
        if let Some(v) = self.version {
            write!(f, "-v{}", v)?;
        }
        Ok(())
    }
}
