//! The resolution algorithm.
//!
//! A pure function of the immutable workspace index, the allow-list, and one
//! resolution request. No state persists between calls and no I/O happens
//! here, so the surrounding pipeline may invoke it from as many workers as it
//! likes once the index is built.

use crate::error::{ResolveError, Result};
use crate::paths;
use crate::specifier::{AliasSpecifier, AllowList};
use monopath_workspaces::WorkspaceIndex;
use std::path::Path;

/// One specifier to resolve: the absolute path of the importing file and the
/// raw specifier text as written.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRequest<'a> {
    /// Absolute path of the file containing the specifier.
    pub importer_file: &'a Path,
    /// The specifier literal as it appears in the source.
    pub raw_specifier: &'a str,
}

impl<'a> ResolutionRequest<'a> {
    /// Creates a request.
    #[must_use]
    pub fn new(importer_file: &'a Path, raw_specifier: &'a str) -> Self {
        Self {
            importer_file,
            raw_specifier,
        }
    }
}

/// Successful outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The specifier does not carry the alias marker; leave it untouched.
    Unaliased,
    /// The specifier was rewritten to this relative path.
    Rewritten(String),
}

/// Resolves one specifier against the index and allow-list.
///
/// The algorithm, in order:
///
/// 1. Specifiers without `<marker>/` prefix resolve to
///    [`Resolution::Unaliased`].
/// 2. The segment must be allow-listed, regardless of whether such a package
///    exists ([`ResolveError::DisallowedSegment`] otherwise).
/// 3. The segment must name an indexed package
///    ([`ResolveError::UnknownPackage`] otherwise).
/// 4. The sub-path is joined lexically onto the package's source directory
///    and must stay inside it ([`ResolveError::PathEscape`] otherwise).
/// 5. The result is the forward-slash relative path from the importer's
///    directory to the target.
///
/// No existence check is performed on the target: extension and index-file
/// resolution stay with the host transpiler.
///
/// # Errors
///
/// The three rejection kinds above. Each is deterministic for fixed inputs.
pub fn resolve(
    index: &WorkspaceIndex,
    allow_list: &AllowList,
    marker: &str,
    request: &ResolutionRequest<'_>,
) -> Result<Resolution> {
    let Some(spec) = AliasSpecifier::parse(request.raw_specifier, marker) else {
        return Ok(Resolution::Unaliased);
    };

    if !allow_list.permits(&spec.segment) {
        return Err(ResolveError::DisallowedSegment {
            segment: spec.segment,
            specifier: request.raw_specifier.to_string(),
            allowed: allow_list.snapshot(),
        });
    }

    let Some(package) = index.get(&spec.segment) else {
        return Err(ResolveError::UnknownPackage {
            segment: spec.segment,
            specifier: request.raw_specifier.to_string(),
        });
    };

    let Some(target) = paths::join_within(&package.source_dir, &spec.sub_path) else {
        return Err(ResolveError::PathEscape {
            segment: spec.segment,
            specifier: request.raw_specifier.to_string(),
        });
    };

    let importer_dir = request
        .importer_file
        .parent()
        .unwrap_or(request.importer_file);
    let relative = paths::relative_from(importer_dir, &target);

    tracing::trace!(
        importer = %request.importer_file.display(),
        specifier = request.raw_specifier,
        relative = %relative,
        "resolved alias"
    );
    Ok(Resolution::Rewritten(relative))
}
