//! Error types for the specifier rewriter.

use miette::Diagnostic;
use monopath_resolver::ResolveError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for rewrite operations.
pub type Result<T> = std::result::Result<T, RewriteError>;

/// Errors that can occur while rewriting a file's specifiers.
#[derive(Error, Debug, Diagnostic)]
pub enum RewriteError {
    /// The configured marker cannot identify alias specifiers.
    #[error("Invalid alias marker '{marker}'")]
    #[diagnostic(
        code(monopath::rewriter::invalid_marker),
        help("The marker must be non-empty and must not contain '/'; the default is '@'")
    )]
    InvalidMarker {
        /// The rejected marker value.
        marker: String,
    },

    /// The workspace root must be an absolute path.
    #[error("Workspace root is not an absolute path: {}", path.display())]
    #[diagnostic(
        code(monopath::rewriter::workspace_root_not_absolute),
        help("Pass the workspace root as an absolute path so rewritten paths are well-defined")
    )]
    WorkspaceRootNotAbsolute {
        /// The rejected root path.
        path: PathBuf,
    },

    /// A specifier in the file was rejected by the resolver.
    ///
    /// Fatal to the file being transformed: no partial output is emitted.
    #[error("Failed to rewrite '{specifier}' in {}: {source}", file.display())]
    #[diagnostic(
        code(monopath::rewriter::rejected_specifier),
        help("Fix the import or the alias configuration; unresolved aliases are never emitted")
    )]
    Rejected {
        /// The file being transformed.
        file: PathBuf,
        /// The specifier literal as written in the source.
        specifier: String,
        /// The classified rejection.
        #[source]
        source: ResolveError,
    },

    /// Workspace index construction failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Workspace(#[from] monopath_workspaces::Error),

    /// I/O error occurred.
    #[error("I/O error during {operation} at {}: {source}", path.display())]
    #[diagnostic(
        code(monopath::rewriter::io_error),
        help("Check that the source file exists and is readable")
    )]
    Io {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Path where the error occurred.
        path: PathBuf,
        /// Description of the operation being performed.
        operation: String,
    },
}
