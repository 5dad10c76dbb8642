//! Test plan records produced by the planner.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::{ServiceName, TestType};
use crate::story::Story;

/// Tests planned for one service of one story.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PlannedTest {
    pub service: ServiceName,
    pub test_types: Vec<TestType>,
    /// Fixed test root for the service, e.g. "backend/src/test/java".
    pub target_path: String,
    /// Indices into the story's acceptance criteria this service must cover.
    /// The planner never subdivides criteria: every service covers all of them.
    pub acceptance_criteria: Vec<usize>,
    /// Indices into the story's test scenarios this service must cover.
    pub test_scenarios: Vec<usize>,
}

/// The per-story mapping from services to required test categories.
///
/// Plans are only populated for stories whose services status is PRESENT;
/// everything else yields an empty plan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TestPlan {
    pub story_id: String,
    pub normalized_id: String,
    pub title: String,
    pub planned_services: Vec<ServiceName>,
    pub planned_tests: Vec<PlannedTest>,
    /// True iff more than one service is planned.
    pub requires_flow_tests: bool,
    /// The source story, carried for exporters and estimators.
    pub story: Story,
}

impl TestPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planned_services.is_empty()
    }
}

/// Aggregate statistics over a test plan catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TestPlanStatistics {
    pub total_plans: usize,
    pub by_service: BTreeMap<String, usize>,
    pub flow_tests_required: usize,
    pub multi_service_plans: usize,
}
