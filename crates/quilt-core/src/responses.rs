//! CLI response types returned as JSON by `qlt` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::plan::TestPlanStatistics;
use crate::story::ParsedStory;
use crate::workspace::WorkspaceScanStats;

/// Response from `qlt parse`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParseReport {
    pub stories_parsed: usize,
    pub stories_valid: usize,
    pub stories_invalid: usize,
    pub by_service: BTreeMap<String, usize>,
    pub by_epic: BTreeMap<String, usize>,
    pub results: Vec<ParsedStory>,
}

/// Response from `qlt scan`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScanReport {
    pub success: bool,
    pub stats: WorkspaceScanStats,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub duration_ms: u64,
}

/// One planned story in a `qlt plan` response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PlanSummary {
    pub story_id: String,
    pub title: String,
    pub services: Vec<String>,
    pub tests_by_service: BTreeMap<String, Vec<String>>,
    pub requires_flow_tests: bool,
    pub recommended_test_count: usize,
    pub complexity: String,
}

/// Response from `qlt plan`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PlanReport {
    pub plans: Vec<PlanSummary>,
    pub statistics: TestPlanStatistics,
}

/// One generated file in a `qlt generate` response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GeneratedFileSummary {
    pub path: String,
    pub service: String,
    pub test_cases: usize,
}

/// Response from `qlt generate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenerateReport {
    pub story_id: String,
    pub dry_run: bool,
    pub files: Vec<GeneratedFileSummary>,
    pub warnings: Vec<String>,
}

/// Response from `qlt export`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportReport {
    pub output_dir: String,
    pub plans_exported: usize,
    pub files_written: Vec<String>,
}
