//! Lexical path arithmetic.
//!
//! Resolution never touches the filesystem: targets are joined and
//! relativized purely on path components, and output always uses forward
//! slashes regardless of the host separator.

use std::path::{Component, Path, PathBuf};

/// Joins `components` onto `base`, resolving `.` and `..` lexically.
///
/// Returns `None` when a `..` would climb above `base`. Climbing back down is
/// fine; the constraint is that the result stays inside `base`.
#[must_use]
pub fn join_within(base: &Path, components: &[String]) -> Option<PathBuf> {
    let mut result = base.to_path_buf();
    let mut depth: usize = 0;

    for component in components {
        match component.as_str() {
            "." => {}
            ".." => {
                if depth == 0 {
                    return None;
                }
                result.pop();
                depth -= 1;
            }
            other => {
                result.push(other);
                depth += 1;
            }
        }
    }

    Some(result)
}

/// Computes the relative path from directory `from_dir` to `target`, both
/// absolute, with forward-slash separators.
///
/// A result that does not ascend is prefixed with `./` so it is never
/// mistaken for a bare package specifier; the degenerate same-directory case
/// yields `"."`.
#[must_use]
pub fn relative_from(from_dir: &Path, target: &Path) -> String {
    let from: Vec<Component<'_>> = from_dir.components().collect();
    let to: Vec<Component<'_>> = target.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".to_string());
    }
    for component in &to[common..] {
        parts.push(component.as_os_str().to_string_lossy().into_owned());
    }

    if parts.is_empty() {
        return ".".to_string();
    }

    let ascends = parts[0] == "..";
    let joined = parts.join("/");
    if ascends { joined } else { format!("./{joined}") }
}
