//! Rejection kinds for alias resolution.
//!
//! All three rejections are deterministic for fixed inputs and signal a
//! configuration or source defect. None are retried and none are silently
//! recovered; the rewriter turns each into a build error annotated with the
//! importing file.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Classified failures of resolving one aliased specifier.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The segment is not in the allow-list, whether or not such a package
    /// exists.
    #[error("Alias segment '{segment}' in '{specifier}' is not allowed (allowed: {allowed:?})")]
    #[diagnostic(
        code(monopath::resolver::disallowed_segment),
        help(
            "Only allow-listed packages may be referenced through the alias marker. Add '{segment}' to allowedSegments if this cross-package import is intentional"
        )
    )]
    DisallowedSegment {
        /// The logical package name that was refused.
        segment: String,
        /// The raw specifier as written in the source.
        specifier: String,
        /// Snapshot of the allow-list at the time of resolution.
        allowed: Vec<String>,
    },

    /// The segment is allowed but no such package exists in the index.
    #[error("Alias segment '{segment}' in '{specifier}' matches no workspace package")]
    #[diagnostic(
        code(monopath::resolver::unknown_package),
        help(
            "The allow-list and the workspace have drifted apart. Check that a package named '{segment}' still exists and is matched by the package glob patterns"
        )
    )]
    UnknownPackage {
        /// The logical package name that was not found.
        segment: String,
        /// The raw specifier as written in the source.
        specifier: String,
    },

    /// The sub-path climbs out of the target package's source tree.
    #[error("Alias '{specifier}' escapes the source tree of package '{segment}'")]
    #[diagnostic(
        code(monopath::resolver::path_escape),
        help(
            "'..' segments in an aliased specifier must stay inside the target package's src directory"
        )
    )]
    PathEscape {
        /// The logical package name being targeted.
        segment: String,
        /// The raw specifier as written in the source.
        specifier: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn test_disallowed_segment_display() {
        let error = ResolveError::DisallowedSegment {
            segment: "app".to_string(),
            specifier: "@/app/widget".to_string(),
            allowed: vec!["common".to_string()],
        };

        let message = error.to_string();
        assert!(message.contains("'app'"));
        assert!(message.contains("@/app/widget"));
        assert!(message.contains("common"));
    }

    #[test]
    fn test_unknown_package_display() {
        let error = ResolveError::UnknownPackage {
            segment: "shared".to_string(),
            specifier: "@/shared/util".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("'shared'"));
        assert!(message.contains("matches no workspace package"));
    }

    #[test]
    fn test_path_escape_display() {
        let error = ResolveError::PathEscape {
            segment: "common".to_string(),
            specifier: "@/common/../../../etc/passwd".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("escapes the source tree"));
        assert!(message.contains("@/common/../../../etc/passwd"));
    }

    #[test]
    fn test_diagnostic_codes() {
        let error = ResolveError::DisallowedSegment {
            segment: "app".to_string(),
            specifier: "@/app".to_string(),
            allowed: vec![],
        };
        assert_eq!(
            error.code().map(|c| c.to_string()),
            Some("monopath::resolver::disallowed_segment".to_string())
        );
        assert!(error.help().is_some());

        let error = ResolveError::PathEscape {
            segment: "common".to_string(),
            specifier: "@/common/..".to_string(),
        };
        assert_eq!(
            error.code().map(|c| c.to_string()),
            Some("monopath::resolver::path_escape".to_string())
        );
    }
}
