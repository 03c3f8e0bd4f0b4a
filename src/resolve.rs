//! Recursive import expansion: one root document in, a flat provenance-tagged
//! directive stream out.
//!
//! The resolver is constructed with an **explicit** imports directory and file
//! extension — nothing is discovered from ambient workspace state, so the full
//! pipeline is testable against a synthetic tree.
//!
//! Expansion is depth-first: an import line is replaced, in place, by the
//! directives of the file it names, each tagged with its own file, its own
//! 1-based line number, and `depth + 1`. Structural problems are collected as
//! issues rather than aborting:
//!
//! - a missing import target yields a [`MissingImport`](IssueKind::MissingImport)
//!   hint at the import line and expansion continues — a single absent ancestor
//!   must not block editing of the current file;
//! - re-entering a file that is still being expanded yields a
//!   [`CyclicImport`](IssueKind::CyclicImport) error at the re-entering import
//!   line and cuts that branch only; sibling branches still resolve.
//!
//! Only real I/O failures (the root file unreadable, a located import
//! unreadable) abort the run.

use std::path::{Path, PathBuf};

use crate::error::MetaconfError;
use crate::line::{self, RawLine};
use crate::types::{Directive, Issue, IssueKind, Resolution};

/// Default file extension for importable metaconfig fragments.
pub const DEFAULT_EXTENSION: &str = "mconf";

/// Expands a root metaconfig document into its full directive stream.
#[derive(Debug, Clone)]
pub struct Resolver {
    imports_dir: PathBuf,
    extension: String,
}

impl Resolver {
    /// Create a resolver that looks up imports under `imports_dir`.
    pub fn new(imports_dir: impl Into<PathBuf>) -> Self {
        Self {
            imports_dir: imports_dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Override the fragment extension (default `"mconf"`). A leading dot is
    /// accepted and ignored.
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Locate the file an import directive names.
    ///
    /// Tries `<imports_dir>/<name>.<extension>` first, then the bare
    /// `<imports_dir>/<name>`. Returns `None` if neither exists. Candidates
    /// are always relative to the imports directory, never to the importing
    /// file.
    ///
    /// Exposed so the editor layer can implement jump-to-import without
    /// duplicating the extension fallback.
    pub fn locate_import_target(&self, name: &str) -> Option<PathBuf> {
        let with_ext = self
            .imports_dir
            .join(format!("{name}.{}", self.extension));
        if with_ext.is_file() {
            return Some(with_ext);
        }
        let bare = self.imports_dir.join(name);
        bare.is_file().then_some(bare)
    }

    /// Resolve `path` into its flattened directive stream.
    ///
    /// The stream is rebuilt from scratch on every call; per-file line order
    /// is preserved and imported directives are spliced in at the position of
    /// their import line.
    pub fn resolve(&self, path: &Path) -> Result<Resolution, MetaconfError> {
        let mut out = Resolution {
            directives: Vec::new(),
            issues: Vec::new(),
        };
        let mut in_progress = Vec::new();
        self.expand(path, 0, &mut in_progress, &mut out)?;
        Ok(out)
    }

    /// Expand one file into `out`. `in_progress` is the stack of canonical
    /// paths currently being expanded — the cycle guard.
    fn expand(
        &self,
        path: &Path,
        depth: u32,
        in_progress: &mut Vec<PathBuf>,
        out: &mut Resolution,
    ) -> Result<(), MetaconfError> {
        let content = std::fs::read_to_string(path).map_err(|e| MetaconfError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        in_progress.push(file_identity(path));

        for (index, raw) in content.lines().enumerate() {
            let source_line = index + 1;
            match line::classify(raw) {
                RawLine::Blank => {}
                RawLine::Import { target } => match self.locate_import_target(&target) {
                    Some(file) => {
                        if in_progress.contains(&file_identity(&file)) {
                            out.issues.push(Issue::new(
                                IssueKind::CyclicImport,
                                format!(
                                    "Import cycle: '{target}' is already being expanded \
                                     on this import chain"
                                ),
                                path,
                                source_line,
                                None,
                            ));
                        } else {
                            self.expand(&file, depth + 1, in_progress, out)?;
                        }
                    }
                    None => {
                        out.issues.push(Issue::new(
                            IssueKind::MissingImport,
                            format!(
                                "Imported file '{target}' not found in {}",
                                self.imports_dir.display()
                            ),
                            path,
                            source_line,
                            None,
                        ));
                    }
                },
                RawLine::Entry { kind, key, value } => {
                    out.directives.push(Directive {
                        source_file: path.to_path_buf(),
                        source_line,
                        depth,
                        kind,
                        key,
                        value,
                        raw: raw.trim().to_string(),
                    });
                }
            }
        }

        in_progress.pop();
        Ok(())
    }
}

/// Canonical identity of a file for cycle detection. Falls back to the given
/// path when canonicalization fails (the file is then unreadable anyway).
fn file_identity(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::Tree;

    #[test]
    fn resolves_a_file_without_imports() {
        let tree = Tree::new();
        let root = tree.root("app.mconf", "CONFIG_A=1\n\nCONFIG_B=2\n");

        let resolution = tree.resolver().resolve(&root).unwrap();
        assert!(resolution.issues.is_empty());
        assert_eq!(resolution.directives.len(), 2);
        assert_eq!(resolution.directives[0].key, "CONFIG_A");
        assert_eq!(resolution.directives[0].source_line, 1);
        assert_eq!(resolution.directives[1].key, "CONFIG_B");
        assert_eq!(resolution.directives[1].source_line, 3);
        assert!(resolution.directives.iter().all(|d| d.depth == 0));
    }

    #[test]
    fn import_splices_at_position() {
        let tree = Tree::new();
        tree.fragment("base", "CONFIG_BASE=y\n");
        let root = tree.root("app.mconf", "CONFIG_FIRST=1\n!base\nCONFIG_LAST=2\n");

        let resolution = tree.resolver().resolve(&root).unwrap();
        let keys: Vec<&str> = resolution
            .directives
            .iter()
            .map(|d| d.key.as_str())
            .collect();
        assert_eq!(keys, vec!["CONFIG_FIRST", "CONFIG_BASE", "CONFIG_LAST"]);
    }

    #[test]
    fn depth_increases_with_nesting() {
        let tree = Tree::new();
        tree.fragment("family", "CONFIG_FAMILY=y\n");
        tree.fragment("chip", "!family\nCONFIG_CHIP=y\n");
        let root = tree.root("board.mconf", "!chip\nCONFIG_BOARD=y\n");

        let resolution = tree.resolver().resolve(&root).unwrap();
        let by_key = |k: &str| {
            resolution
                .directives
                .iter()
                .find(|d| d.key == k)
                .unwrap()
                .depth
        };
        assert_eq!(by_key("CONFIG_BOARD"), 0);
        assert_eq!(by_key("CONFIG_CHIP"), 1);
        assert_eq!(by_key("CONFIG_FAMILY"), 2);
    }

    #[test]
    fn source_file_is_the_physical_file() {
        let tree = Tree::new();
        let fragment = tree.fragment("base", "CONFIG_BASE=y\n");
        let root = tree.root("app.mconf", "!base\n");

        let resolution = tree.resolver().resolve(&root).unwrap();
        assert_eq!(resolution.directives[0].source_file, fragment);
        assert_ne!(resolution.directives[0].source_file, root);
    }

    #[test]
    fn extension_candidate_preferred_over_bare() {
        let tree = Tree::new();
        tree.fragment("base", "CONFIG_WITH_EXT=y\n");
        tree.bare_fragment("base", "CONFIG_BARE=y\n");
        let root = tree.root("app.mconf", "!base\n");

        let resolution = tree.resolver().resolve(&root).unwrap();
        assert_eq!(resolution.directives[0].key, "CONFIG_WITH_EXT");
    }

    #[test]
    fn bare_candidate_used_as_fallback() {
        let tree = Tree::new();
        tree.bare_fragment("legacy", "CONFIG_LEGACY=y\n");
        let root = tree.root("app.mconf", "!legacy\n");

        let resolution = tree.resolver().resolve(&root).unwrap();
        assert_eq!(resolution.directives[0].key, "CONFIG_LEGACY");
    }

    #[test]
    fn missing_import_is_a_hint_not_an_error() {
        let tree = Tree::new();
        let root = tree.root("app.mconf", "!does-not-exist\nCONFIG_A=1\n");

        let resolution = tree.resolver().resolve(&root).unwrap();
        assert_eq!(resolution.directives.len(), 1);
        assert_eq!(resolution.issues.len(), 1);
        let issue = &resolution.issues[0];
        assert_eq!(issue.kind, IssueKind::MissingImport);
        assert_eq!(issue.file, root);
        assert_eq!(issue.line, 1);
        assert!(issue.message.contains("does-not-exist"));
    }

    #[test]
    fn cycle_terminates_and_reports() {
        let tree = Tree::new();
        tree.fragment("a", "CONFIG_A=1\n!b\n");
        tree.fragment("b", "CONFIG_B=2\n!a\n");
        let root = tree.imports_dir().join("a.mconf");

        let resolution = tree.resolver().resolve(&root).unwrap();
        // Both files' directives arrive exactly once.
        let keys: Vec<&str> = resolution
            .directives
            .iter()
            .map(|d| d.key.as_str())
            .collect();
        assert_eq!(keys, vec!["CONFIG_A", "CONFIG_B"]);
        assert_eq!(resolution.issues.len(), 1);
        assert_eq!(resolution.issues[0].kind, IssueKind::CyclicImport);
    }

    #[test]
    fn self_import_is_a_cycle() {
        let tree = Tree::new();
        tree.fragment("selfish", "CONFIG_SELF=1\n!selfish\n");
        let root = tree.imports_dir().join("selfish.mconf");

        let resolution = tree.resolver().resolve(&root).unwrap();
        assert_eq!(resolution.directives.len(), 1);
        assert_eq!(resolution.issues[0].kind, IssueKind::CyclicImport);
    }

    #[test]
    fn cycle_cuts_branch_but_siblings_resolve() {
        let tree = Tree::new();
        tree.fragment("loop", "!loop\n");
        tree.fragment("ok", "CONFIG_OK=y\n");
        let root = tree.root("app.mconf", "!loop\n!ok\n");

        let resolution = tree.resolver().resolve(&root).unwrap();
        assert_eq!(resolution.directives.len(), 1);
        assert_eq!(resolution.directives[0].key, "CONFIG_OK");
        assert_eq!(resolution.issues.len(), 1);
        assert_eq!(resolution.issues[0].kind, IssueKind::CyclicImport);
    }

    #[test]
    fn diamond_imports_are_not_cycles() {
        // a imports b and c; both import d. d's directives splice twice —
        // only true cycles are cut.
        let tree = Tree::new();
        tree.fragment("d", "CONFIG_D=y\n");
        tree.fragment("b", "!d\nCONFIG_B=y\n");
        tree.fragment("c", "!d\nCONFIG_C=y\n");
        let root = tree.root("a.mconf", "!b\n!c\n");

        let resolution = tree.resolver().resolve(&root).unwrap();
        assert!(resolution.issues.is_empty());
        let d_count = resolution
            .directives
            .iter()
            .filter(|d| d.key == "CONFIG_D")
            .count();
        assert_eq!(d_count, 2);
    }

    #[test]
    fn missing_root_is_a_hard_error() {
        let tree = Tree::new();
        let result = tree
            .resolver()
            .resolve(&tree.imports_dir().join("nope.mconf"));
        assert!(matches!(result, Err(MetaconfError::Io { .. })));
    }

    #[test]
    fn resolution_is_idempotent() {
        let tree = Tree::new();
        tree.fragment("base", "CONFIG_BASE=y\nCONFIG_OTHER=n\n");
        let root = tree.root("app.mconf", "!base\nCONFIG_LOCAL=1\n");

        let resolver = tree.resolver();
        let first = resolver.resolve(&root).unwrap();
        let second = resolver.resolve(&root).unwrap();
        assert_eq!(first, second);
    }

    // --- locate_import_target ---

    #[test]
    fn locate_finds_extension_candidate() {
        let tree = Tree::new();
        let fragment = tree.fragment("chip-esp32", "CONFIG_X=y\n");
        assert_eq!(
            tree.resolver().locate_import_target("chip-esp32"),
            Some(fragment)
        );
    }

    #[test]
    fn locate_falls_back_to_bare_name() {
        let tree = Tree::new();
        let fragment = tree.bare_fragment("chip-esp32", "CONFIG_X=y\n");
        assert_eq!(
            tree.resolver().locate_import_target("chip-esp32"),
            Some(fragment)
        );
    }

    #[test]
    fn locate_missing_is_none() {
        let tree = Tree::new();
        assert_eq!(tree.resolver().locate_import_target("ghost"), None);
    }

    #[test]
    fn custom_extension_with_leading_dot() {
        let tree = Tree::new();
        let path = tree.imports_dir().join("base.cfg");
        std::fs::write(&path, "CONFIG_X=y\n").unwrap();

        let resolver = Resolver::new(tree.imports_dir()).with_extension(".cfg");
        assert_eq!(resolver.locate_import_target("base"), Some(path));
    }
}
