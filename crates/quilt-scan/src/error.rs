//! Error types for workspace scanning.

use std::path::PathBuf;

/// Fatal scan failures. Per-file problems are reported as warnings on the
/// scan result instead.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("workspace root not found: {0}")]
    WorkspaceRootNotFound(PathBuf),

    #[error("invalid exclude pattern {pattern}: {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

}
