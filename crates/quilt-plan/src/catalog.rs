//! In-memory index over test plans.

use std::collections::BTreeMap;

use quilt_core::enums::ServiceName;
use quilt_core::plan::{TestPlan, TestPlanStatistics};

/// Keyed plan store, mirroring the story catalog's query surface.
#[derive(Debug, Default)]
pub struct TestPlanCatalog {
    plans: BTreeMap<String, TestPlan>,
}

impl TestPlanCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a plan, replacing any plan for the same story.
    pub fn insert(&mut self, plan: TestPlan) {
        self.plans.insert(plan.story_id.clone(), plan);
    }

    pub fn insert_all(&mut self, plans: impl IntoIterator<Item = TestPlan>) {
        for plan in plans {
            self.insert(plan);
        }
    }

    #[must_use]
    pub fn get(&self, story_id: &str) -> Option<&TestPlan> {
        self.plans.get(story_id)
    }

    /// All plans, ordered by numeric story id.
    #[must_use]
    pub fn list(&self) -> Vec<&TestPlan> {
        let mut plans: Vec<&TestPlan> = self.plans.values().collect();
        plans.sort_by_key(|plan| numeric_id(&plan.story_id));
        plans
    }

    /// Plans that schedule tests for `service`.
    #[must_use]
    pub fn by_service(&self, service: ServiceName) -> Vec<&TestPlan> {
        self.list()
            .into_iter()
            .filter(|plan| plan.planned_services.contains(&service))
            .collect()
    }

    /// Plans requiring cross-service flow tests.
    #[must_use]
    pub fn flow_plans(&self) -> Vec<&TestPlan> {
        self.list()
            .into_iter()
            .filter(|plan| plan.requires_flow_tests)
            .collect()
    }

    #[must_use]
    pub fn statistics(&self) -> TestPlanStatistics {
        let mut by_service: BTreeMap<String, usize> = BTreeMap::new();
        let mut flow_tests_required = 0;
        let mut multi_service_plans = 0;
        for plan in self.plans.values() {
            for service in &plan.planned_services {
                *by_service.entry(service.as_str().to_string()).or_default() += 1;
            }
            if plan.requires_flow_tests {
                flow_tests_required += 1;
            }
            if plan.planned_services.len() > 1 {
                multi_service_plans += 1;
            }
        }
        TestPlanStatistics {
            total_plans: self.plans.len(),
            by_service,
            flow_tests_required,
            multi_service_plans,
        }
    }

    pub fn clear(&mut self) {
        self.plans.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// "Story 10.2" -> (10, 2); unknown ids sort last.
fn numeric_id(story_id: &str) -> (u32, u32) {
    story_id
        .strip_prefix("Story ")
        .and_then(|rest| {
            let (major, minor) = rest.split_once('.')?;
            Some((major.parse().ok()?, minor.parse().ok()?))
        })
        .unwrap_or((u32::MAX, u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::TestPlanner;
    use pretty_assertions::assert_eq;
    use quilt_story::StoryParser;

    fn plan(file: &str, services: &str) -> TestPlan {
        let mut body = String::from("# Story - Sample\n\n## Acceptance Criteria\n\n- One\n\n## Services Involved\n\n");
        for service in services.split(',') {
            body.push_str(&format!("- {service}\n"));
        }
        let story = StoryParser::new().parse_content(&body, file).story;
        TestPlanner::new().plan(&story)
    }

    fn sample_catalog() -> TestPlanCatalog {
        let mut catalog = TestPlanCatalog::new();
        catalog.insert_all([
            plan("story_1_1.md", "frontend,gateway,backend"),
            plan("story_1_2.md", "backend"),
            plan("story_12_1.md", "backend,risk-engine"),
        ]);
        catalog
    }

    #[test]
    fn list_orders_numerically() {
        let catalog = sample_catalog();
        let ids: Vec<&str> = catalog.list().iter().map(|p| p.story_id.as_str()).collect();
        assert_eq!(ids, vec!["Story 1.1", "Story 1.2", "Story 12.1"]);
    }

    #[test]
    fn by_service_and_flow_queries() {
        let catalog = sample_catalog();
        assert_eq!(catalog.by_service(ServiceName::Backend).len(), 3);
        assert_eq!(catalog.by_service(ServiceName::RiskEngine).len(), 1);
        assert_eq!(catalog.flow_plans().len(), 2);
    }

    #[test]
    fn statistics_aggregate() {
        let stats = sample_catalog().statistics();
        assert_eq!(stats.total_plans, 3);
        assert_eq!(stats.by_service.get("backend"), Some(&3));
        assert_eq!(stats.by_service.get("frontend"), Some(&1));
        assert_eq!(stats.flow_tests_required, 2);
        assert_eq!(stats.multi_service_plans, 2);
    }
}
