//! Workspace package discovery and indexing for monopath.
//!
//! This crate builds the read-only model of a monorepo that alias resolution
//! runs against: it scans a workspace root once, reads the declarative `name`
//! field of each member's `package.json`, and exposes an immutable mapping
//! from logical package name to the package's source directory.
//!
//! # Build-session lifecycle
//!
//! A [`WorkspaceIndex`] is constructed exactly once, before any file
//! transformation begins. All filesystem interaction happens here; after
//! construction the index is read-only and safe to share across concurrent
//! resolution calls without locking.
//!
//! ```rust,ignore
//! use monopath_workspaces::WorkspaceIndex;
//! use std::path::Path;
//!
//! let root = Path::new("/path/to/workspace");
//! let patterns = vec!["packages/*".to_string()];
//! let index = WorkspaceIndex::discover(root, &patterns)?;
//!
//! for package in index.iter() {
//!     println!("{} at {}", package.name, package.source_dir.display());
//! }
//! ```
//!
//! # Incremental rebuilds
//!
//! [`IndexCache`] keys built indexes by workspace root and a
//! [`WorkspaceFingerprint`] of the manifest set, so unchanged workspaces skip
//! re-parsing on incremental rebuilds:
//!
//! ```rust,ignore
//! use monopath_workspaces::IndexCache;
//!
//! let mut cache = IndexCache::new();
//! let index = cache.get_or_discover(root, &patterns)?;
//! ```
//!
//! # Core Types
//!
//! - [`WorkspacePackage`] - one publishable unit: name, root, source dir
//! - [`WorkspaceIndex`] - immutable name-to-package mapping
//! - [`WorkspaceFingerprint`] - digest of the manifest set for cache keying
//! - [`IndexCache`] - optional reuse of indexes across rebuilds

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod discovery;
pub mod error;
pub mod fingerprint;
pub mod index;

// Re-export core types
pub use error::{Error, Result};
pub use fingerprint::{IndexCache, WorkspaceFingerprint};
pub use index::{SOURCE_DIR, WorkspaceIndex, WorkspacePackage};
