//! Public entry point: configure a [`Metaconf`] and run the pipeline.
//!
//! The pipeline behind [`Metaconf::analyze`]:
//!
//! 1. Recursively expand imports ([`resolve`](crate::resolve)) — flat
//!    directive stream plus structural issues (missing imports, cycles)
//! 2. Precedence-sort the stream ([`order`](crate::order)) — deepest
//!    ancestors first
//! 3. Walk it once for override violations ([`analyze`](crate::analyze))
//!
//! [`Metaconf::duplicate_lines`] is the separate fallback mode: verbatim
//! duplicate detection over the same flattened stream.
//!
//! Every run rebuilds everything from the file system; there is no caching,
//! so each call owns its stream and history exclusively and concurrent calls
//! for different documents need no coordination.

use std::path::{Path, PathBuf};

use crate::analyze;
use crate::error::MetaconfError;
use crate::order;
use crate::resolve::{DEFAULT_EXTENSION, Resolver};
use crate::types::{Issue, Resolution};

/// Entry point for building a configured [`Metaconf`].
pub struct Metaconf {
    resolver: Resolver,
}

impl Metaconf {
    pub fn builder() -> MetaconfBuilder {
        MetaconfBuilder::new()
    }

    /// Expand `path` into its flattened, provenance-tagged directive stream.
    ///
    /// The returned [`Resolution`] also carries the structural issues found
    /// during expansion. Only I/O failures are errors.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<Resolution, MetaconfError> {
        self.resolver.resolve(path.as_ref())
    }

    /// Full analysis of `path`: resolver issues first, then override
    /// violations from the precedence-sorted stream.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<Vec<Issue>, MetaconfError> {
        let mut resolution = self.resolve(path)?;
        order::sort_for_analysis(&mut resolution.directives);

        let mut issues = resolution.issues;
        issues.extend(analyze::analyze_overrides(&resolution.directives));
        Ok(issues)
    }

    /// Exact-duplicate detection — the simpler fallback mode. Runs over the
    /// flattened stream with no override analysis; repeated exclusion lines
    /// that are a normal part of the override discipline would be noise here,
    /// which is why the two modes stay separate.
    pub fn duplicate_lines(&self, path: impl AsRef<Path>) -> Result<Vec<Issue>, MetaconfError> {
        let resolution = self.resolve(path)?;
        Ok(analyze::find_duplicate_lines(&resolution.directives))
    }

    /// Locate the file an import directive names (extension candidate first,
    /// bare name as fallback). For the editor layer's jump-to-import.
    pub fn locate_import_target(&self, name: &str) -> Option<PathBuf> {
        self.resolver.locate_import_target(name)
    }
}

/// Builder for [`Metaconf`].
///
/// The imports directory is a required, explicit input — it is never
/// discovered from ambient workspace state.
pub struct MetaconfBuilder {
    imports_dir: Option<PathBuf>,
    extension: String,
}

impl MetaconfBuilder {
    fn new() -> Self {
        Self {
            imports_dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Set the directory import targets are resolved against. Required.
    pub fn imports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.imports_dir = Some(dir.into());
        self
    }

    /// Override the fragment extension (default `"mconf"`).
    pub fn extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    pub fn build(self) -> Result<Metaconf, MetaconfError> {
        let imports_dir = self.imports_dir.ok_or(MetaconfError::ImportsDirRequired)?;
        Ok(Metaconf {
            resolver: Resolver::new(imports_dir).with_extension(&self.extension),
        })
    }
}
