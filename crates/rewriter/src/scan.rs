//! Specifier scanning over source text.
//!
//! Finds the string literals that act as module specifiers: static
//! `import`/`export … from` clauses, side-effect imports, and the argument
//! of dynamic `import()` calls. Only plain string literals are reported;
//! template literals and computed arguments are left to the host, which is
//! the same set of positions the upstream AST-based transform rewrote.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Which import form a specifier literal appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// `import … from '…'` or `export … from '…'`.
    Static,
    /// `import '…'` with no bindings.
    SideEffect,
    /// `import('…')`.
    Dynamic,
}

/// One specifier literal found in a source file.
///
/// `start..end` is the byte range of the literal's contents, quotes
/// excluded, so a rewrite can splice a replacement while preserving the
/// original quote style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierMatch {
    /// Byte offset of the first content byte.
    pub start: usize,
    /// Byte offset one past the last content byte.
    pub end: usize,
    /// The specifier text.
    pub text: String,
    /// The import form the literal appeared in.
    pub kind: SpecifierKind,
}

fn static_import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\b(?:import|export)\b[^'"();]*?\bfrom\s*(?:"([^"\n]*)"|'([^'\n]*)')"#)
            .expect("valid literal regex")
    })
}

fn side_effect_import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\bimport\s*(?:"([^"\n]*)"|'([^'\n]*)')"#).expect("valid literal regex")
    })
}

fn dynamic_import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\bimport\s*\(\s*(?:"([^"\n]*)"|'([^'\n]*)')"#).expect("valid literal regex")
    })
}

/// Scans `source` for specifier literals, in source order.
#[must_use]
pub fn scan_specifiers(source: &str) -> Vec<SpecifierMatch> {
    // Key by literal start so a position matched by more than one pattern is
    // reported once.
    let mut found: BTreeMap<usize, SpecifierMatch> = BTreeMap::new();

    let passes = [
        (static_import_regex(), SpecifierKind::Static),
        (dynamic_import_regex(), SpecifierKind::Dynamic),
        (side_effect_import_regex(), SpecifierKind::SideEffect),
    ];

    for (regex, kind) in passes {
        for captures in regex.captures_iter(source) {
            let Some(literal) = captures.get(1).or_else(|| captures.get(2)) else {
                continue;
            };
            found.entry(literal.start()).or_insert_with(|| SpecifierMatch {
                start: literal.start(),
                end: literal.end(),
                text: literal.as_str().to_string(),
                kind,
            });
        }
    }

    found.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<(String, SpecifierKind)> {
        scan_specifiers(source)
            .into_iter()
            .map(|m| (m.text, m.kind))
            .collect()
    }

    #[test]
    fn test_static_import_forms() {
        let source = r#"
            import { foo } from './foo';
            import bar from "bar";
            import * as ns from '@/common/ns';
            import type { T } from './types';
        "#;

        let found = texts(source);
        assert_eq!(found.len(), 4);
        assert!(found.contains(&("./foo".to_string(), SpecifierKind::Static)));
        assert!(found.contains(&("bar".to_string(), SpecifierKind::Static)));
        assert!(found.contains(&("@/common/ns".to_string(), SpecifierKind::Static)));
    }

    #[test]
    fn test_export_forms() {
        let source = r#"
            export { foo } from '@/foo';
            export * from './bar';
            export const local = 1;
        "#;

        let found = texts(source);
        assert_eq!(found.len(), 2);
        assert!(found.contains(&("@/foo".to_string(), SpecifierKind::Static)));
        assert!(found.contains(&("./bar".to_string(), SpecifierKind::Static)));
    }

    #[test]
    fn test_side_effect_import() {
        let found = texts(r#"import "./App.css";"#);
        assert_eq!(
            found,
            vec![("./App.css".to_string(), SpecifierKind::SideEffect)]
        );
    }

    #[test]
    fn test_dynamic_import() {
        let source = r#"
            const loader = async () => {
                const result = await import('@/bar/bar');
                return result;
            };
        "#;

        let found = texts(source);
        assert_eq!(
            found,
            vec![("@/bar/bar".to_string(), SpecifierKind::Dynamic)]
        );
    }

    #[test]
    fn test_dynamic_import_with_non_literal_argument_is_skipped() {
        let found = texts("const m = import(moduleName);");
        assert!(found.is_empty());
    }

    #[test]
    fn test_multiline_static_import() {
        let source = "import {\n    foo,\n    bar,\n} from '@/common/foo';\n";
        let found = texts(source);
        assert_eq!(
            found,
            vec![("@/common/foo".to_string(), SpecifierKind::Static)]
        );
    }

    #[test]
    fn test_matches_are_in_source_order() {
        let source = "import a from 'first';\nimport b from 'second';\n";
        let found = scan_specifiers(source);
        assert_eq!(found[0].text, "first");
        assert_eq!(found[1].text, "second");
        assert!(found[0].end <= found[1].start);
    }

    #[test]
    fn test_ranges_exclude_quotes() {
        let source = "import a from './x';";
        let found = scan_specifiers(source);
        assert_eq!(&source[found[0].start..found[0].end], "./x");
        assert_eq!(&source[found[0].start - 1..found[0].start], "'");
    }

    #[test]
    fn test_export_without_source_is_ignored() {
        let found = texts("export { a, b };\nexport default c;\n");
        assert!(found.is_empty());
    }
}
