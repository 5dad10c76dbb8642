//! Error types for story parsing.

use std::path::PathBuf;

/// Errors that can occur while reading and parsing story documents.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("failed to read story file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stories directory not found: {0}")]
    DirectoryNotFound(PathBuf),

}
