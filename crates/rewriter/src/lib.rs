//! Per-file import specifier rewriting for monopath.
//!
//! This crate is the integration shim between a transpilation pipeline and
//! the [`monopath_resolver`] core. Given validated [`RewriteOptions`], it
//! builds the workspace index once, then rewrites aliased specifiers —
//! static `import`/`export … from`, side-effect imports, and dynamic
//! `import()` arguments — file by file, across parallel workers if the host
//! wants them.
//!
//! ```rust,ignore
//! use monopath_rewriter::{RewriteContext, RewriteOptions};
//!
//! let options = RewriteOptions::new("/path/to/workspace")
//!     .with_allowed_segments(["common"]);
//! let ctx = RewriteContext::new(options)?;
//!
//! // Whole files:
//! let rewritten = ctx.rewrite_file("/path/to/workspace/packages/app/src/App.tsx".as_ref())?;
//!
//! // Or one specifier at a time from a host that walks its own AST:
//! let outcome = ctx.resolve_specifier(importer, "@/common/foo")?;
//! ```
//!
//! # Failure policy
//!
//! A rejected specifier fails the file it appears in: the error names the
//! file, the specifier text, and the classified rejection, and no partially
//! transformed output is emitted. Sibling files keep their own outcomes, so
//! the surrounding pipeline chooses between fail-fast and collect-all
//! semantics. An unresolvable alias is never passed through silently; it
//! would only resurface later as a module-not-found failure far from its
//! cause.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod options;
pub mod rewrite;
pub mod scan;

pub use error::{Result, RewriteError};
pub use options::RewriteOptions;
pub use rewrite::{FileRewrite, RewriteContext};
pub use scan::{SpecifierKind, SpecifierMatch, scan_specifiers};

// The per-specifier contract types hosts program against.
pub use monopath_resolver::{AllowList, Resolution, ResolutionRequest};
