//! Parsed alias specifiers and the segment allow-list.

use std::collections::BTreeSet;

/// Default alias marker.
pub const DEFAULT_MARKER: &str = "@";

/// The parsed form of a raw specifier that carries the alias marker.
///
/// Transient: created per specifier and discarded after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSpecifier {
    /// The marker the specifier was parsed with.
    pub marker: String,
    /// The logical package name candidate: first path component after the
    /// marker.
    pub segment: String,
    /// Path components after the segment. Empty components from doubled
    /// slashes are dropped; `.` and `..` are kept for the resolver to judge.
    pub sub_path: Vec<String>,
}

impl AliasSpecifier {
    /// Parses `raw` as an aliased specifier.
    ///
    /// Returns `None` when `raw` does not start with `marker` immediately
    /// followed by `/` — such specifiers are not aliases and pass through the
    /// rewriter untouched.
    #[must_use]
    pub fn parse(raw: &str, marker: &str) -> Option<Self> {
        let rest = raw.strip_prefix(marker)?.strip_prefix('/')?;

        let mut components = rest.split('/').filter(|c| !c.is_empty());
        let segment = components.next().unwrap_or_default().to_string();
        let sub_path = components.map(ToString::to_string).collect();

        Some(Self {
            marker: marker.to_string(),
            segment,
            sub_path,
        })
    }
}

/// The set of segments permitted to be resolved via aliasing.
///
/// Configured once per build session and immutable afterwards. An empty
/// allow-list permits nothing: every marker-carrying specifier is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    segments: BTreeSet<String>,
}

impl AllowList {
    /// Builds an allow-list from the configured segment names.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `segment` may be resolved via aliasing. Matching is exact.
    #[must_use]
    pub fn permits(&self, segment: &str) -> bool {
        self.segments.contains(segment)
    }

    /// Whether the allow-list permits nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sorted copy of the permitted segments, for error reporting.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.segments.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
