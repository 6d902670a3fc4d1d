//! Workspace fingerprinting and the optional index cache.
//!
//! A fingerprint digests the discovered manifest set (paths, sizes,
//! modification times) without parsing any manifest. The [`IndexCache`] uses
//! it to reuse a previously built [`WorkspaceIndex`] across incremental
//! rebuilds while the workspace layout is unchanged. The cache is a
//! performance optimization only; correctness never depends on it.

use crate::discovery;
use crate::error::{Error, Result};
use crate::index::WorkspaceIndex;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;

/// Content/modification digest of a workspace's manifest set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFingerprint(String);

impl WorkspaceFingerprint {
    /// Computes the fingerprint of the manifest set that discovery would see
    /// under `root` for `patterns`.
    ///
    /// Adding, removing, moving, or editing any member manifest changes the
    /// digest.
    ///
    /// # Errors
    ///
    /// Returns pattern errors from glob resolution and I/O errors from
    /// reading manifest metadata.
    pub fn compute(root: &Path, patterns: &[String]) -> Result<Self> {
        let mut hasher = Sha256::new();

        for path in discovery::manifest_paths(root, patterns)? {
            let metadata = std::fs::metadata(&path).map_err(|source| Error::Io {
                source,
                path: Some(path.clone()),
                operation: "reading manifest metadata".to_string(),
            })?;

            hasher.update(path.as_os_str().as_encoded_bytes());
            hasher.update([0u8]); // separator
            hasher.update(metadata.len().to_le_bytes());

            let mtime = metadata
                .modified()
                .map_err(|source| Error::Io {
                    source,
                    path: Some(path.clone()),
                    operation: "reading manifest mtime".to_string(),
                })?
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            hasher.update(mtime.as_secs().to_le_bytes());
            hasher.update(mtime.subsec_nanos().to_le_bytes());
        }

        use std::fmt::Write as _;
        let digest = hasher.finalize();
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            let _ = write!(hex, "{byte:02x}");
        }
        Ok(Self(hex))
    }

    /// The digest as lowercase hex.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

struct CachedIndex {
    fingerprint: WorkspaceFingerprint,
    index: Arc<WorkspaceIndex>,
}

/// Reuses built indexes across rebuilds, keyed by workspace root.
///
/// Intended to live on the single coordinating thread that owns index
/// construction; the `Arc<WorkspaceIndex>` it hands out is what gets shared
/// with workers.
#[derive(Default)]
pub struct IndexCache {
    entries: HashMap<PathBuf, CachedIndex>,
}

impl IndexCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached index for `root` if its manifest set is unchanged,
    /// otherwise rediscovers and caches a fresh one.
    ///
    /// # Errors
    ///
    /// Propagates discovery and fingerprinting errors; a failed rebuild
    /// leaves no stale entry behind.
    pub fn get_or_discover(
        &mut self,
        root: &Path,
        patterns: &[String],
    ) -> Result<Arc<WorkspaceIndex>> {
        let fingerprint = WorkspaceFingerprint::compute(root, patterns)?;

        if let Some(cached) = self.entries.get(root) {
            if cached.fingerprint == fingerprint {
                tracing::debug!(root = %root.display(), "workspace index cache hit");
                return Ok(Arc::clone(&cached.index));
            }
            tracing::debug!(root = %root.display(), "workspace manifests changed, rebuilding index");
        }

        self.entries.remove(root);
        let index = Arc::new(WorkspaceIndex::discover(root, patterns)?);
        self.entries.insert(
            root.to_path_buf(),
            CachedIndex {
                fingerprint,
                index: Arc::clone(&index),
            },
        );
        Ok(index)
    }

    /// Drops the cached index for `root`, if any.
    pub fn invalidate(&mut self, root: &Path) {
        self.entries.remove(root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, contents: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(discovery::MANIFEST_FILE), contents).unwrap();
    }

    #[test]
    fn test_fingerprint_stable_for_unchanged_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_manifest(&root.join("packages/app"), r#"{"name": "app"}"#);

        let patterns = vec!["packages/*".to_string()];
        let first = WorkspaceFingerprint::compute(root, &patterns).unwrap();
        let second = WorkspaceFingerprint::compute(root, &patterns).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_fingerprint_changes_when_package_added() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_manifest(&root.join("packages/app"), r#"{"name": "app"}"#);

        let patterns = vec!["packages/*".to_string()];
        let before = WorkspaceFingerprint::compute(root, &patterns).unwrap();

        write_manifest(&root.join("packages/common"), r#"{"name": "common"}"#);
        let after = WorkspaceFingerprint::compute(root, &patterns).unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn test_cache_returns_same_index_for_unchanged_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_manifest(&root.join("packages/app"), r#"{"name": "app"}"#);

        let patterns = vec!["packages/*".to_string()];
        let mut cache = IndexCache::new();

        let first = cache.get_or_discover(root, &patterns).unwrap();
        let second = cache.get_or_discover(root, &patterns).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cache_rebuilds_when_package_added() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_manifest(&root.join("packages/app"), r#"{"name": "app"}"#);

        let patterns = vec!["packages/*".to_string()];
        let mut cache = IndexCache::new();

        let first = cache.get_or_discover(root, &patterns).unwrap();
        assert_eq!(first.len(), 1);

        write_manifest(&root.join("packages/common"), r#"{"name": "common"}"#);
        let second = cache.get_or_discover(root, &patterns).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
        assert!(second.contains("common"));
    }

    #[test]
    fn test_cache_invalidate_forces_rebuild() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_manifest(&root.join("packages/app"), r#"{"name": "app"}"#);

        let patterns = vec!["packages/*".to_string()];
        let mut cache = IndexCache::new();

        let first = cache.get_or_discover(root, &patterns).unwrap();
        cache.invalidate(root);
        let second = cache.get_or_discover(root, &patterns).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
    }
}
