//! The `Story` record and its validation result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ServiceName, ServicesStatus};

/// One parsed requirement document.
///
/// Created once per document by the story parser and immutable after
/// validation. `services_involved` preserves declaration (or inference)
/// order with duplicates removed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Story {
    /// Human-readable id, e.g. "Story 3.2".
    pub story_id: String,
    /// Identifier-safe id, e.g. "STORY_3_2".
    pub normalized_id: String,
    pub title: String,
    pub file_path: String,

    /// "As a ..." narrative actor, when the document carries one.
    pub actor: Option<String>,
    /// "I want ..." capability.
    pub capability: Option<String>,
    /// "So that ..." benefit.
    pub benefit: Option<String>,

    pub acceptance_criteria: Vec<String>,
    pub test_scenarios: Vec<String>,

    pub services_involved: Vec<ServiceName>,
    pub services_status: ServicesStatus,

    pub implementation_guidance: Option<Vec<String>>,
    pub deliverables: Option<Vec<String>>,
    pub dependencies: Option<Vec<String>>,

    /// Epic folder segment from the path, e.g. "epic_3_credit_events".
    pub epic_path: Option<String>,
    /// Title-cased epic name, e.g. "Credit Events".
    pub epic_title: Option<String>,
}

impl Story {
    /// Whether the story declares (or was inferred to touch) `service`.
    #[must_use]
    pub fn involves(&self, service: ServiceName) -> bool {
        self.services_involved.contains(&service)
    }

    /// Concatenated title + criteria text, used by relevance matching.
    #[must_use]
    pub fn full_text(&self) -> String {
        let mut text = self.title.clone();
        for criterion in &self.acceptance_criteria {
            text.push(' ');
            text.push_str(criterion);
        }
        text
    }
}

/// Severity of a single validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// One validation error or warning attached to a parsed story.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    /// The story field the issue concerns, e.g. "services_involved".
    pub field: String,
    pub message: String,
    pub file_path: Option<String>,
}

impl ValidationIssue {
    #[must_use]
    pub fn error(field: &str, message: impl Into<String>, file_path: &str) -> Self {
        Self {
            severity: IssueSeverity::Error,
            field: field.to_string(),
            message: message.into(),
            file_path: Some(file_path.to_string()),
        }
    }

    #[must_use]
    pub fn warning(field: &str, message: impl Into<String>, file_path: &str) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            field: field.to_string(),
            message: message.into(),
            file_path: Some(file_path.to_string()),
        }
    }
}

/// Validation outcome for one parsed story.
///
/// Errors exclude the story from cataloging and planning; warnings do not.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A story paired with its validation result, as returned by the parser.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParsedStory {
    pub story: Story,
    pub validation: ValidationResult,
}
