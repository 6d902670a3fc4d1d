//! Error types for workspace discovery and indexing.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for workspace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering and indexing workspace packages.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Two discovered packages declare the same name.
    #[error(
        "Duplicate package name '{name}' declared by {} and {}",
        first_root.display(),
        second_root.display()
    )]
    #[diagnostic(
        code(monopath::workspaces::duplicate_package_name),
        help("Rename one of the packages so every workspace member has a unique name")
    )]
    DuplicatePackageName {
        /// The name declared by both packages.
        name: String,
        /// Root directory of the package discovered first.
        first_root: PathBuf,
        /// Root directory of the package discovered second.
        second_root: PathBuf,
    },

    /// The package glob patterns matched no usable packages.
    #[error("No packages found under {} for patterns {patterns:?}", root.display())]
    #[diagnostic(
        code(monopath::workspaces::no_packages_found),
        help(
            "Check that the workspace root is correct and the glob patterns match directories containing a package.json with a 'name' field"
        )
    )]
    NoPackagesFound {
        /// The workspace root that was scanned.
        root: PathBuf,
        /// The glob patterns that were applied.
        patterns: Vec<String>,
    },

    /// A package glob pattern failed to compile.
    #[error("Invalid package glob pattern '{pattern}': {source}")]
    #[diagnostic(
        code(monopath::workspaces::invalid_pattern),
        help("Package patterns use glob syntax, for example 'packages/*' or '!packages/legacy'")
    )]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying glob error.
        #[source]
        source: glob::PatternError,
    },

    /// I/O error occurred.
    #[error("I/O error during {operation}{}: {source}", path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    #[diagnostic(
        code(monopath::workspaces::io_error),
        help("Check that the referenced paths exist and that you have permission to read them")
    )]
    Io {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Optional path where the error occurred.
        path: Option<PathBuf>,
        /// Description of the operation being performed.
        operation: String,
    },

    /// A package manifest could not be parsed.
    #[error("JSON parsing error{}: {source}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    #[diagnostic(
        code(monopath::workspaces::json_error),
        help("Ensure the package.json has valid JSON syntax")
    )]
    Json {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
        /// Optional path to the file being parsed.
        path: Option<PathBuf>,
    },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: None,
            operation: "file operation".to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source, path: None }
    }
}
