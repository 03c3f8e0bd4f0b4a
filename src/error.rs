use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetaconfError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Imports directory is required — call .imports_dir() on the builder")]
    ImportsDirRequired,
}
