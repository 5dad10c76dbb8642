//! The planning policy: a fixed service-to-test-type mapping plus the
//! cross-service flow rule.

use tracing::debug;

use quilt_core::enums::{ServiceName, ServicesStatus, TestType};
use quilt_core::plan::{PlannedTest, TestPlan};
use quilt_core::story::Story;

/// Builds [`TestPlan`]s from stories.
///
/// Planning is a pure function of the story: only stories whose services
/// status is PRESENT produce a non-empty plan, and running the planner twice
/// on the same story yields the same plan.
#[derive(Debug, Default)]
pub struct TestPlanner;

impl TestPlanner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn plan(&self, story: &Story) -> TestPlan {
        let planned_services: Vec<ServiceName> = if story.services_status == ServicesStatus::Present
        {
            story.services_involved.clone()
        } else {
            Vec::new()
        };
        let requires_flow_tests = planned_services.len() > 1;

        // Every planned service covers the full criterion and scenario lists;
        // the planner does not attribute individual criteria to services.
        let criterion_indices: Vec<usize> = (0..story.acceptance_criteria.len()).collect();
        let scenario_indices: Vec<usize> = (0..story.test_scenarios.len()).collect();

        let planned_tests = planned_services
            .iter()
            .map(|&service| {
                let mut test_types = base_test_types(service);
                if requires_flow_tests {
                    test_types.push(TestType::Flow);
                }
                PlannedTest {
                    service,
                    test_types,
                    target_path: target_path(service).to_string(),
                    acceptance_criteria: criterion_indices.clone(),
                    test_scenarios: scenario_indices.clone(),
                }
            })
            .collect();

        debug!(
            story_id = %story.story_id,
            services = planned_services.len(),
            flow = requires_flow_tests,
            "planned story"
        );

        TestPlan {
            story_id: story.story_id.clone(),
            normalized_id: story.normalized_id.clone(),
            title: story.title.clone(),
            planned_services,
            planned_tests,
            requires_flow_tests,
            story: story.clone(),
        }
    }
}

/// The test categories a service owes any story it appears in.
fn base_test_types(service: ServiceName) -> Vec<TestType> {
    match service {
        ServiceName::Frontend => vec![TestType::Component, TestType::Unit],
        ServiceName::Backend => vec![TestType::Unit, TestType::Integration, TestType::Api],
        ServiceName::Gateway => vec![TestType::Unit, TestType::Api],
        ServiceName::RiskEngine => vec![TestType::Unit, TestType::Integration],
    }
}

/// Fixed test root per service.
fn target_path(service: ServiceName) -> &'static str {
    match service {
        ServiceName::Frontend => "frontend/src/__tests__",
        ServiceName::Backend => "backend/src/test/java",
        ServiceName::Gateway => "gateway/src/test/java",
        ServiceName::RiskEngine => "risk-engine/src/test/java",
    }
}
