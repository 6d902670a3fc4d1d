//! Alias specifier resolution for monopath.
//!
//! Turns one aliased import specifier (`@/common/foo`) into the relative path
//! from the importing file to a sibling package's source tree
//! (`../../common/src/foo`), or rejects it with a classified failure.
//!
//! Resolution is a pure function of three immutable inputs: the
//! [`WorkspaceIndex`](monopath_workspaces::WorkspaceIndex) built at
//! build-session start, the configured [`AllowList`], and the per-specifier
//! [`ResolutionRequest`]. It performs no I/O and keeps no state between
//! calls, which is what makes it safe to invoke from parallel per-file
//! transform workers.
//!
//! ```rust,ignore
//! use monopath_resolver::{resolve, AllowList, Resolution, ResolutionRequest, DEFAULT_MARKER};
//! use monopath_workspaces::WorkspaceIndex;
//! use std::path::Path;
//!
//! let index = WorkspaceIndex::discover(root, &patterns)?;
//! let allow_list: AllowList = ["common"].into_iter().collect();
//!
//! let request = ResolutionRequest::new(
//!     Path::new("/ws/packages/app/src/App.tsx"),
//!     "@/common/foo",
//! );
//! match resolve(&index, &allow_list, DEFAULT_MARKER, &request)? {
//!     Resolution::Rewritten(path) => println!("-> {path}"),
//!     Resolution::Unaliased => {}
//! }
//! ```
//!
//! # Policy
//!
//! The allow-list is a hard boundary checked before the index: only
//! explicitly sanctioned package names may be referenced through the marker,
//! so accidental coupling between arbitrary packages fails the build rather
//! than resolving. `..` sub-paths may move around inside the target package's
//! source tree but never out of it.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod paths;
pub mod resolve;
pub mod specifier;

pub use error::{ResolveError, Result};
pub use resolve::{Resolution, ResolutionRequest, resolve};
pub use specifier::{AliasSpecifier, AllowList, DEFAULT_MARKER};
