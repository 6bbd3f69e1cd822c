//! Path handling and binary output on the local filesystem.
//!
//! # Security
//!
//! Every path that comes from a manifest or a published file name is resolved
//! against a root directory and rejected if it would escape it
//! (e.g. `../../../etc/passwd`).

use binpub_traits::{HostError, ObjectStore, PlacementRequest, Publisher};
use binpub_types::AssetReference;
use std::fs;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// A directory that relative paths are confined to.
#[derive(Debug, Clone)]
pub struct SafeRoot {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks
    canonical_base: Option<PathBuf>,
}

impl SafeRoot {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // May fail if the directory doesn't exist yet
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    /// Resolves `path` below the root, or `None` if it would escape it.
    ///
    /// Leading slashes are ignored so that publish paths like `/media/a.png`
    /// map into the root.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = path.trim_start_matches(['/', '\\']);
        if relative.is_empty() || Path::new(relative).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(relative);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        // Not on disk yet: fall back to a component check
        let escapes = Path::new(relative).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::Prefix(_) | Component::RootDir
            )
        });
        (!escapes).then_some(full_path)
    }
}

/// Writes published binaries below an output directory.
///
/// Default placement puts a binary at `/binaries/{original file name}`;
/// explicit placement at `{location path}/{file name}`. The returned publish
/// path is the file's path relative to the output directory, with a leading `/`.
#[derive(Debug)]
pub struct DirectoryPublisher {
    root: SafeRoot,
    store: Arc<dyn ObjectStore>,
}

impl DirectoryPublisher {
    /// The output directory is created on first write if it does not exist.
    pub fn new<P: AsRef<Path>>(output_dir: P, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            root: SafeRoot::new(output_dir),
            store,
        }
    }

    fn write(
        &self,
        id: &str,
        publish_path: &str,
        stream: &mut dyn Read,
    ) -> Result<String, HostError> {
        let blocked = || HostError::PublishFailed {
            id: id.to_string(),
            message: format!("publish path '{}' escapes the output directory", publish_path),
        };
        // Check containment before anything is created on disk
        if Path::new(publish_path.trim_start_matches('/'))
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(blocked());
        }
        let target = self.root.resolve(publish_path).ok_or_else(blocked)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes)?;
        fs::write(&target, &bytes)?;
        log::debug!("Wrote {} bytes for '{}' to {}", bytes.len(), id, target.display());

        Ok(format!("/{}", publish_path.trim_start_matches('/')))
    }
}

impl Publisher for DirectoryPublisher {
    fn add_binary(&self, asset: &AssetReference) -> Result<String, HostError> {
        let binary = asset.binary.as_ref().ok_or_else(|| HostError::PublishFailed {
            id: asset.id.to_string(),
            message: "item has no binary content".to_string(),
        })?;
        let file_name = Path::new(&binary.filename.replace('\\', "/"))
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| HostError::PublishFailed {
                id: asset.id.to_string(),
                message: format!("'{}' is not a usable file name", binary.filename),
            })?;

        let mut stream = self
            .store
            .open_binary(&asset.id)?
            .ok_or_else(|| HostError::NotFound(format!("binary of {}", asset.id)))?;
        self.write(
            asset.id.as_str(),
            &format!("binaries/{}", file_name),
            &mut stream,
        )
    }

    fn add_binary_at(&self, request: PlacementRequest<'_>) -> Result<String, HostError> {
        let publish_path = format!(
            "{}/{}",
            request.location.path.trim_end_matches('/'),
            request.file_name
        );
        self.write(request.asset.id.as_str(), &publish_path, request.stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binpub_traits::{InMemoryObjectStore, LocationHandle};
    use binpub_types::{AssetId, VariantId};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn store_with_logo() -> Arc<InMemoryObjectStore> {
        let store = Arc::new(InMemoryObjectStore::new());
        store
            .add(
                AssetReference::new("tcm:1-42").with_binary("uploads/logo.png", "image/png"),
                Some(b"PNG".to_vec()),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_safe_root_allows_nested_paths() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/a.txt"), b"a").unwrap();

        let root = SafeRoot::new(dir.path());
        assert!(root.resolve("sub/a.txt").is_some());
        assert!(root.resolve("/sub/a.txt").is_some());
        assert!(root.resolve("not/yet/there.txt").is_some());
    }

    #[test]
    fn test_safe_root_blocks_traversal() {
        let dir = tempdir().unwrap();
        let root = SafeRoot::new(dir.path());

        assert!(root.resolve("../../../etc/passwd").is_none());
        assert!(root.resolve("foo/../../../bar").is_none());
        assert!(root.resolve("..").is_none());
        assert!(root.resolve("").is_none());
    }

    #[test]
    fn test_default_placement_writes_original_name() {
        let dir = tempdir().unwrap();
        let store = store_with_logo();
        let publisher = DirectoryPublisher::new(dir.path(), store.clone());
        let asset = store.get(&AssetId::from("tcm:1-42")).unwrap().unwrap();

        let path = publisher.add_binary(&asset).unwrap();

        assert_eq!(path, "/binaries/logo.png");
        assert_eq!(fs::read(dir.path().join("binaries/logo.png")).unwrap(), b"PNG");
        assert_eq!(store.open_streams(), 0);
    }

    #[test]
    fn test_explicit_placement_writes_into_location() {
        let dir = tempdir().unwrap();
        let store = store_with_logo();
        let publisher = DirectoryPublisher::new(dir.path(), store.clone());
        let asset = store.get(&AssetId::from("tcm:1-42")).unwrap().unwrap();
        let location = LocationHandle {
            uri: "tcm:1-5-4".parse().unwrap(),
            path: "/media/images".to_string(),
        };
        let mut stream = Cursor::new(b"PNG".to_vec());

        let path = publisher
            .add_binary_at(PlacementRequest {
                stream: &mut stream,
                file_name: "logo_1-42_1-99-32.png",
                location: &location,
                variant: &VariantId::from("tcm:1-99-32"),
                asset: &asset,
                mime_type: "image/png",
            })
            .unwrap();

        assert_eq!(path, "/media/images/logo_1-42_1-99-32.png");
        assert!(dir.path().join("media/images/logo_1-42_1-99-32.png").exists());
    }

    #[test]
    fn test_explicit_placement_cannot_escape_output() {
        let dir = tempdir().unwrap();
        let store = store_with_logo();
        let publisher = DirectoryPublisher::new(dir.path().join("out"), store.clone());
        let asset = store.get(&AssetId::from("tcm:1-42")).unwrap().unwrap();
        let location = LocationHandle {
            uri: "tcm:1-5-4".parse().unwrap(),
            path: "/../escape".to_string(),
        };
        let mut stream = Cursor::new(Vec::new());

        let result = publisher.add_binary_at(PlacementRequest {
            stream: &mut stream,
            file_name: "x.png",
            location: &location,
            variant: &VariantId::from("tcm:1-99-32"),
            asset: &asset,
            mime_type: "image/png",
        });

        assert!(matches!(result, Err(HostError::PublishFailed { .. })));
        assert!(!dir.path().join("escape").exists());
    }
}
