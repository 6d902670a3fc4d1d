//! The workspace index: an immutable name-to-package mapping.
//!
//! A [`WorkspaceIndex`] is built exactly once per build session, before any
//! file transformation begins, and is then shared read-only across however
//! many workers the host pipeline runs. It holds no interior mutability, so
//! concurrent lookups need no locking.

use crate::discovery;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Directory under a package root that holds its source tree.
pub const SOURCE_DIR: &str = "src";

/// One publishable unit in the monorepo.
///
/// Immutable after construction. `name` is the declared `package.json` name
/// and is unique within a [`WorkspaceIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePackage {
    /// Declared package name.
    pub name: String,
    /// Absolute path to the package root directory.
    pub root_dir: PathBuf,
    /// Absolute path to the package source tree (`<root_dir>/src`).
    pub source_dir: PathBuf,
}

impl WorkspacePackage {
    /// Creates a package record, applying the `src/` source-dir convention.
    #[must_use]
    pub fn new(name: impl Into<String>, root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        let source_dir = root_dir.join(SOURCE_DIR);
        Self {
            name: name.into(),
            root_dir,
            source_dir,
        }
    }

    /// Absolute path to this package's manifest file.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root_dir.join(discovery::MANIFEST_FILE)
    }
}

/// Immutable mapping from logical package name to workspace package.
///
/// Lookups and iteration are in name order.
#[derive(Debug, Clone)]
pub struct WorkspaceIndex {
    root: PathBuf,
    packages: BTreeMap<String, WorkspacePackage>,
}

impl WorkspaceIndex {
    /// Scans `root` for packages matching `patterns` and builds the index.
    ///
    /// This is the single serialization point of a build session: it performs
    /// all filesystem reads up front so that later per-specifier resolution
    /// is pure path arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPackagesFound`] when the patterns match no usable
    /// packages, [`Error::DuplicatePackageName`] when two packages declare
    /// the same name, and I/O or JSON errors when a manifest cannot be read.
    pub fn discover(root: &Path, patterns: &[String]) -> Result<Self> {
        let packages = discovery::discover_packages(root, patterns)?;
        if packages.is_empty() {
            return Err(Error::NoPackagesFound {
                root: root.to_path_buf(),
                patterns: patterns.to_vec(),
            });
        }
        let index = Self::from_packages(root, packages)?;
        tracing::debug!(
            root = %index.root.display(),
            packages = index.len(),
            "built workspace index"
        );
        Ok(index)
    }

    /// Builds an index from already-discovered packages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePackageName`] when two packages declare the
    /// same name.
    pub fn from_packages(root: &Path, packages: Vec<WorkspacePackage>) -> Result<Self> {
        let mut map: BTreeMap<String, WorkspacePackage> = BTreeMap::new();
        for package in packages {
            if let Some(existing) = map.get(&package.name) {
                return Err(Error::DuplicatePackageName {
                    name: package.name,
                    first_root: existing.root_dir.clone(),
                    second_root: package.root_dir,
                });
            }
            map.insert(package.name.clone(), package);
        }
        Ok(Self {
            root: root.to_path_buf(),
            packages: map,
        })
    }

    /// The workspace root this index was built from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Looks up a package by its declared name. Matching is exact.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WorkspacePackage> {
        self.packages.get(name)
    }

    /// Whether a package with this exact name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Package names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Packages in name order.
    pub fn iter(&self) -> impl Iterator<Item = &WorkspacePackage> {
        self.packages.values()
    }

    /// Number of indexed packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the index holds no packages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
