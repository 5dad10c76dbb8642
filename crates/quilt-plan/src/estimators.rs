//! Reporting-only effort estimators over a test plan.

use quilt_core::enums::Complexity;
use quilt_core::plan::TestPlan;

/// One test per criterion, one per scenario, plus one flow test when the
/// plan spans services.
#[must_use]
pub fn recommended_test_count(plan: &TestPlan) -> usize {
    plan.story.acceptance_criteria.len()
        + plan.story.test_scenarios.len()
        + usize::from(plan.requires_flow_tests)
}

/// Weighted size score: services are the dominant cost driver, scenarios
/// weigh more than criteria.
#[must_use]
pub fn complexity_score(plan: &TestPlan) -> usize {
    plan.planned_services.len() * 10
        + plan.story.acceptance_criteria.len() * 2
        + plan.story.test_scenarios.len() * 3
}

/// Score tiers: below 20 low, below 50 medium, otherwise high.
#[must_use]
pub fn complexity(plan: &TestPlan) -> Complexity {
    match complexity_score(plan) {
        0..20 => Complexity::Low,
        20..50 => Complexity::Medium,
        _ => Complexity::High,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::TestPlanner;
    use pretty_assertions::assert_eq;
    use quilt_story::StoryParser;
    use rstest::rstest;

    fn plan_for(services: &str, criteria: usize, scenarios: usize) -> TestPlan {
        let mut body = String::from("# Story 9.9 - Sized\n\n## Acceptance Criteria\n\n");
        for i in 0..criteria {
            body.push_str(&format!("- Criterion {i}\n"));
        }
        body.push_str("\n## Services Involved\n\n");
        for service in services.split(',') {
            body.push_str(&format!("- {service}\n"));
        }
        body.push_str("\n## Test Scenarios\n\n");
        for i in 0..scenarios {
            body.push_str(&format!("{}. Scenario {i}\n", i + 1));
        }
        let story = StoryParser::new().parse_content(&body, "story_9_9.md").story;
        TestPlanner::new().plan(&story)
    }

    #[test]
    fn recommended_count_includes_flow() {
        let plan = plan_for("frontend,backend", 3, 2);
        assert_eq!(recommended_test_count(&plan), 6);

        let plan = plan_for("backend", 3, 2);
        assert_eq!(recommended_test_count(&plan), 5);
    }

    #[rstest]
    #[case::single_small("backend", 2, 1, 17, Complexity::Low)]
    #[case::multi_medium("frontend,gateway,backend", 3, 2, 42, Complexity::Medium)]
    #[case::multi_large("frontend,gateway,backend,risk-engine", 4, 2, 54, Complexity::High)]
    fn complexity_tiers(
        #[case] services: &str,
        #[case] criteria: usize,
        #[case] scenarios: usize,
        #[case] expected_score: usize,
        #[case] expected_tier: Complexity,
    ) {
        let plan = plan_for(services, criteria, scenarios);
        assert_eq!(complexity_score(&plan), expected_score);
        assert_eq!(complexity(&plan), expected_tier);
    }
}
