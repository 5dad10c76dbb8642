//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_stories_dir() -> String {
    "user-stories".to_string()
}

fn default_output_dir() -> String {
    "test-plans".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory (relative to the workspace root) holding story documents.
    #[serde(default = "default_stories_dir")]
    pub stories_dir: String,

    /// Directory where exported plans and reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Whether to infer services for stories missing a declaration section.
    #[serde(default)]
    pub enable_inference: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            stories_dir: default_stories_dir(),
            output_dir: default_output_dir(),
            enable_inference: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.stories_dir, "user-stories");
        assert_eq!(config.output_dir, "test-plans");
        assert!(!config.enable_inference);
    }
}
