//! Rewrite configuration.
//!
//! The host build tool hands the rewriter an explicit options structure,
//! deserialized from the same camelCase shape the original plugin options
//! object used, then validated once before any index construction. No
//! reflection over free-form option maps.

use crate::error::{Result, RewriteError};
use monopath_resolver::DEFAULT_MARKER;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for one rewrite session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RewriteOptions {
    /// Prefix identifying an aliased specifier. Default is `@`.
    #[serde(default = "default_marker", alias = "prefix")]
    pub marker: String,

    /// Logical package names permitted after the marker. Empty means no
    /// aliasing is permitted at all.
    #[serde(default, alias = "allowedPathnames")]
    pub allowed_segments: Vec<String>,

    /// Absolute path of the workspace root.
    pub workspace_root: PathBuf,

    /// Glob patterns, relative to the workspace root, naming where package
    /// directories live. Default is `packages/*`.
    #[serde(default = "default_package_globs")]
    pub package_globs: Vec<String>,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_package_globs() -> Vec<String> {
    vec!["packages/*".to_string()]
}

impl RewriteOptions {
    /// Creates options with defaults for everything but the workspace root.
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            marker: default_marker(),
            allowed_segments: Vec::new(),
            workspace_root: workspace_root.into(),
            package_globs: default_package_globs(),
        }
    }

    /// Sets the permitted alias segments.
    #[must_use]
    pub fn with_allowed_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_segments = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the alias marker.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Sets the package glob patterns.
    #[must_use]
    pub fn with_package_globs<I, S>(mut self, globs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_globs = globs.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::InvalidMarker`] for an empty or
    /// slash-containing marker and [`RewriteError::WorkspaceRootNotAbsolute`]
    /// for a relative root.
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() || self.marker.contains('/') {
            return Err(RewriteError::InvalidMarker {
                marker: self.marker.clone(),
            });
        }
        if !self.workspace_root.is_absolute() {
            return Err(RewriteError::WorkspaceRootNotAbsolute {
                path: self.workspace_root.clone(),
            });
        }
        Ok(())
    }
}
