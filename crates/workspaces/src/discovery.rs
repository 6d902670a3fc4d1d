//! Package discovery over a workspace root.
//!
//! Discovery resolves glob patterns against the directory tree under the
//! workspace root, then reads the declarative `name` field from each matched
//! directory's `package.json`. Manifests are never executed or evaluated,
//! only deserialized.

use crate::error::{Error, Result};
use crate::index::WorkspacePackage;
use glob::Pattern;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Manifest file name looked for in each candidate package directory.
pub const MANIFEST_FILE: &str = "package.json";

/// The declarative manifest fields discovery reads. Everything else in the
/// manifest is ignored.
#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    name: Option<String>,
}

/// Resolves glob patterns to candidate package directories under `root`.
///
/// Patterns starting with `!` are treated as exclusions. Heavy directories
/// (`node_modules`, `.git`, `target`, `dist`) are pruned from the walk.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] for a pattern that fails to compile. A
/// typo'd pattern would otherwise surface later as a misleading
/// `NoPackagesFound`.
pub fn resolve_glob_patterns(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut inclusion_patterns = Vec::new();
    let mut exclusion_patterns = Vec::new();

    for p in patterns {
        if let Some(stripped) = p.strip_prefix('!') {
            exclusion_patterns.push(compile_pattern(stripped)?);
        } else {
            inclusion_patterns.push(compile_pattern(p)?);
        }
    }

    let mut matched_paths = HashSet::new();

    let walker = WalkDir::new(root).follow_links(false);
    for entry in walker
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            // Standard directory ignores to prune the search tree
            !matches!(name, "node_modules" | ".git" | "target" | "dist")
        })
        .filter_map(std::result::Result::ok)
    {
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        // Skip root itself
        if path == root {
            continue;
        }

        // Relativize path for matching
        let Ok(rel_path) = path.strip_prefix(root) else {
            continue;
        };

        if exclusion_patterns.iter().any(|p| p.matches_path(rel_path)) {
            continue;
        }

        if inclusion_patterns.iter().any(|p| p.matches_path(rel_path)) {
            matched_paths.insert(path.to_path_buf());
        }
    }

    let mut result: Vec<PathBuf> = matched_paths.into_iter().collect();
    result.sort();
    Ok(result)
}

fn compile_pattern(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Discovers workspace packages under `root` matching `patterns`.
///
/// A matched directory without a manifest is skipped (layout conventions
/// routinely match asset or fixture directories); a manifest that fails to
/// parse is a hard error; a manifest without a `name` is skipped with a
/// warning since it does not identify a publishable unit.
///
/// # Errors
///
/// Returns pattern, I/O, and JSON errors. Duplicate-name detection happens
/// when the packages are assembled into a [`crate::WorkspaceIndex`].
pub fn discover_packages(root: &Path, patterns: &[String]) -> Result<Vec<WorkspacePackage>> {
    let mut packages = Vec::new();

    for dir in resolve_glob_patterns(root, patterns)? {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            tracing::trace!(dir = %dir.display(), "no package manifest, skipping");
            continue;
        }

        let manifest: PackageManifest = read_json_file(&manifest_path)?;
        let Some(name) = manifest.name else {
            tracing::warn!(
                manifest = %manifest_path.display(),
                "package manifest has no 'name' field, skipping"
            );
            continue;
        };

        tracing::trace!(name = %name, dir = %dir.display(), "discovered package");
        packages.push(WorkspacePackage::new(name, dir));
    }

    Ok(packages)
}

/// Manifest paths of the packages that would be discovered, in sorted order.
///
/// Used for fingerprinting a workspace without parsing any manifest.
///
/// # Errors
///
/// Returns pattern errors; filesystem problems on individual directories
/// surface later when the manifest set is read.
pub fn manifest_paths(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    Ok(resolve_glob_patterns(root, patterns)?
        .into_iter()
        .map(|dir| dir.join(MANIFEST_FILE))
        .filter(|path| path.is_file())
        .collect())
}

/// Reads and parses a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed as valid JSON.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| Error::Io {
        source: e,
        path: Some(path.to_path_buf()),
        operation: "reading json file".to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| Error::Json {
        source: e,
        path: Some(path.to_path_buf()),
    })
}
