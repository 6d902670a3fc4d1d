//! Per-file specifier rewriting and the parallel driver.
//!
//! A [`RewriteContext`] is built once per build session: options are
//! validated and the workspace index is constructed (or accepted pre-built
//! from a cache) before any file is touched. That is the only serialization
//! point; the per-file work that follows is stateless and fans out across
//! rayon workers with no locking.

use crate::error::{Result, RewriteError};
use crate::options::RewriteOptions;
use crate::scan::{self, SpecifierMatch};
use monopath_resolver::{AllowList, Resolution, ResolutionRequest, resolve};
use monopath_workspaces::WorkspaceIndex;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The transformed form of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRewrite {
    /// The file that was transformed.
    pub path: PathBuf,
    /// The full transformed source.
    pub output: String,
    /// How many specifiers were rewritten.
    pub rewrites: usize,
}

/// Immutable per-session state shared by every file transform.
#[derive(Debug, Clone)]
pub struct RewriteContext {
    options: RewriteOptions,
    allow_list: AllowList,
    index: Arc<WorkspaceIndex>,
}

impl RewriteContext {
    /// Validates `options` and builds the workspace index.
    ///
    /// # Errors
    ///
    /// Returns option-validation errors and any index-construction failure
    /// (duplicate package names, no packages found, unreadable manifests).
    pub fn new(options: RewriteOptions) -> Result<Self> {
        options.validate()?;
        let index = Arc::new(WorkspaceIndex::discover(
            &options.workspace_root,
            &options.package_globs,
        )?);
        Ok(Self::assemble(options, index))
    }

    /// Like [`RewriteContext::new`], but reuses an index the host already
    /// built, typically via
    /// [`IndexCache`](monopath_workspaces::IndexCache) across incremental
    /// rebuilds.
    ///
    /// # Errors
    ///
    /// Returns option-validation errors.
    pub fn with_index(options: RewriteOptions, index: Arc<WorkspaceIndex>) -> Result<Self> {
        options.validate()?;
        Ok(Self::assemble(options, index))
    }

    fn assemble(options: RewriteOptions, index: Arc<WorkspaceIndex>) -> Self {
        let allow_list = AllowList::new(options.allowed_segments.iter().cloned());
        Self {
            options,
            allow_list,
            index,
        }
    }

    /// The validated options this context was built with.
    #[must_use]
    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// The workspace index shared by all file transforms.
    #[must_use]
    pub fn index(&self) -> &WorkspaceIndex {
        &self.index
    }

    /// Resolves one specifier on behalf of a host transpiler.
    ///
    /// This is the synchronous per-specifier entry point: hosts that walk
    /// their own AST call it once per encountered specifier literal and
    /// substitute the rewritten path themselves.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::Rejected`] carrying the importing file, the
    /// specifier text, and the classified resolver failure.
    pub fn resolve_specifier(&self, importer: &Path, raw_specifier: &str) -> Result<Resolution> {
        let request = ResolutionRequest::new(importer, raw_specifier);
        resolve(&self.index, &self.allow_list, &self.options.marker, &request).map_err(|source| {
            RewriteError::Rejected {
                file: importer.to_path_buf(),
                specifier: raw_specifier.to_string(),
                source,
            }
        })
    }

    /// Rewrites every aliased specifier in `source`.
    ///
    /// Unaliased specifiers pass through untouched and the import form and
    /// quote style of rewritten ones are preserved. The first rejection
    /// aborts the whole file; no partial output is produced.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::Rejected`] for the first rejected specifier.
    pub fn rewrite_source(&self, file: &Path, source: &str) -> Result<FileRewrite> {
        let mut output = String::with_capacity(source.len());
        let mut cursor = 0;
        let mut rewrites = 0;

        for SpecifierMatch {
            start, end, text, ..
        } in scan::scan_specifiers(source)
        {
            match self.resolve_specifier(file, &text)? {
                Resolution::Unaliased => {}
                Resolution::Rewritten(relative) => {
                    output.push_str(&source[cursor..start]);
                    output.push_str(&relative);
                    cursor = end;
                    rewrites += 1;
                }
            }
        }
        output.push_str(&source[cursor..]);

        tracing::debug!(
            file = %file.display(),
            rewrites,
            "rewrote file specifiers"
        );
        Ok(FileRewrite {
            path: file.to_path_buf(),
            output,
            rewrites,
        })
    }

    /// Reads `file` and rewrites its specifiers.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from reading the file and rejection errors from
    /// [`RewriteContext::rewrite_source`].
    pub fn rewrite_file(&self, file: &Path) -> Result<FileRewrite> {
        let source = fs::read_to_string(file).map_err(|source| RewriteError::Io {
            source,
            path: file.to_path_buf(),
            operation: "reading source file".to_string(),
        })?;
        self.rewrite_source(file, &source)
    }

    /// Rewrites many files on parallel workers.
    ///
    /// The index was built before this call, so workers share only immutable
    /// state. A rejected file does not poison its siblings: every file gets
    /// its own outcome, and a fail-fast pipeline can simply stop on the
    /// first `Err` it finds in the returned list.
    #[must_use]
    pub fn rewrite_files(&self, files: &[PathBuf]) -> Vec<(PathBuf, Result<FileRewrite>)> {
        files
            .par_iter()
            .map(|file| (file.clone(), self.rewrite_file(file)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monopath_workspaces::WorkspacePackage;

    fn fixture_context(allowed: &[&str]) -> RewriteContext {
        let index = WorkspaceIndex::from_packages(
            Path::new("/ws"),
            vec![
                WorkspacePackage::new("app", PathBuf::from("/ws/packages/app")),
                WorkspacePackage::new("common", PathBuf::from("/ws/packages/common")),
            ],
        )
        .unwrap();

        let options =
            RewriteOptions::new("/ws").with_allowed_segments(allowed.iter().copied());
        RewriteContext::with_index(options, Arc::new(index)).unwrap()
    }

    #[test]
    fn test_rewrite_source_static_import() {
        let ctx = fixture_context(&["common"]);
        let source = "import { foo } from '@/common/foo';\n";

        let result = ctx
            .rewrite_source(Path::new("/ws/packages/app/src/App.tsx"), source)
            .unwrap();

        assert_eq!(
            result.output,
            "import { foo } from '../../common/src/foo';\n"
        );
        assert_eq!(result.rewrites, 1);
    }

    #[test]
    fn test_rewrite_source_preserves_quote_style_and_forms() {
        let ctx = fixture_context(&["common"]);
        let source = concat!(
            "export { foo } from \"@/common/foo\";\n",
            "export * from '@/common/bar/bar';\n",
            "const load = () => import('@/common/lazy');\n",
        );

        let result = ctx
            .rewrite_source(Path::new("/ws/packages/app/src/index.ts"), source)
            .unwrap();

        assert_eq!(
            result.output,
            concat!(
                "export { foo } from \"../../common/src/foo\";\n",
                "export * from '../../common/src/bar/bar';\n",
                "const load = () => import('../../common/src/lazy');\n",
            )
        );
        assert_eq!(result.rewrites, 3);
    }

    #[test]
    fn test_rewrite_source_leaves_plain_specifiers_alone() {
        let ctx = fixture_context(&["common"]);
        let source = concat!(
            "import { useEffect } from \"react\";\n",
            "import { foo } from \"subpackage\";\n",
            "import \"./App.css\";\n",
        );

        let result = ctx
            .rewrite_source(Path::new("/ws/packages/app/src/App.tsx"), source)
            .unwrap();

        assert_eq!(result.output, source);
        assert_eq!(result.rewrites, 0);
    }

    #[test]
    fn test_rewrite_source_rejection_aborts_file() {
        let ctx = fixture_context(&["common"]);
        let source = concat!(
            "import { foo } from '@/common/foo';\n",
            "import { widget } from '@/app/widget';\n",
        );

        let error = ctx
            .rewrite_source(Path::new("/ws/packages/common/src/bar.ts"), source)
            .unwrap_err();

        match error {
            RewriteError::Rejected {
                file, specifier, ..
            } => {
                assert_eq!(file, PathBuf::from("/ws/packages/common/src/bar.ts"));
                assert_eq!(specifier, "@/app/widget");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_specifier_passthrough() {
        let ctx = fixture_context(&["common"]);
        let outcome = ctx
            .resolve_specifier(Path::new("/ws/packages/app/src/App.tsx"), "react")
            .unwrap();
        assert_eq!(outcome, Resolution::Unaliased);
    }

    #[test]
    fn test_scoped_package_names_are_not_aliases() {
        let ctx = fixture_context(&["common"]);
        let source = "import { Button } from '@acme/ui';\n";

        let result = ctx
            .rewrite_source(Path::new("/ws/packages/app/src/App.tsx"), source)
            .unwrap();

        assert_eq!(result.output, source);
    }
}
