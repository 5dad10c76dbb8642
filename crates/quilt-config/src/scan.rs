//! Workspace scan configuration.

use serde::{Deserialize, Serialize};

fn default_backend_path() -> String {
    "backend".to_string()
}

fn default_frontend_path() -> String {
    "frontend".to_string()
}

const fn default_true() -> bool {
    true
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
        "**/build/**".to_string(),
        "**/dist/**".to_string(),
    ]
}

/// Configuration for one workspace scan.
///
/// Exclusion patterns are globs applied to directory paths before recursing,
/// so excluded subtrees are never visited.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Backend module path relative to the workspace root.
    #[serde(default = "default_backend_path")]
    pub backend_path: String,

    /// Frontend module path relative to the workspace root.
    #[serde(default = "default_frontend_path")]
    pub frontend_path: String,

    #[serde(default = "default_true")]
    pub scan_backend: bool,

    #[serde(default = "default_true")]
    pub scan_frontend: bool,

    /// Whether to extract method signatures from backend classes.
    #[serde(default = "default_true")]
    pub extract_methods: bool,

    /// Whether to extract HTTP endpoints from controller classes.
    #[serde(default = "default_true")]
    pub extract_endpoints: bool,

    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            backend_path: default_backend_path(),
            frontend_path: default_frontend_path(),
            scan_backend: true,
            scan_frontend: true,
            extract_methods: true,
            extract_endpoints: true,
            exclude_patterns: default_exclude_patterns(),
        }
    }
}
