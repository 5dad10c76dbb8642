use std::collections::BTreeMap;

use anyhow::bail;

use quilt_core::plan::TestPlan;
use quilt_core::responses::{PlanReport, PlanSummary};
use quilt_plan::{TestPlanCatalog, TestPlanner, complexity, recommended_test_count};

use crate::cli::PlanArgs;
use crate::output;

use super::{CommandContext, build_catalog, load_stories};

pub fn handle(args: &PlanArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let stories = load_stories(ctx, args.stories_dir.as_deref(), args.infer)?;
    let catalog = build_catalog(stories);
    let plans = plan_stories(&catalog, args.story.as_deref())?;

    let summaries = plans.iter().map(summarize).collect();
    let mut plan_catalog = TestPlanCatalog::new();
    plan_catalog.insert_all(plans);

    let report = PlanReport {
        plans: summaries,
        statistics: plan_catalog.statistics(),
    };
    output::output(&report, ctx.format)
}

/// Plan every valid story, or just the one named by `story_id`.
pub(super) fn plan_stories(
    catalog: &quilt_story::StoryCatalog,
    story_id: Option<&str>,
) -> anyhow::Result<Vec<TestPlan>> {
    let planner = TestPlanner::new();
    match story_id {
        Some(id) => {
            let Some(parsed) = catalog.get(id).or_else(|| catalog.get_by_normalized_id(id))
            else {
                bail!("story not found: {id}");
            };
            if !parsed.validation.is_valid() {
                bail!("story {id} has validation errors and cannot be planned");
            }
            Ok(vec![planner.plan(&parsed.story)])
        }
        None => Ok(catalog
            .plannable()
            .into_iter()
            .map(|parsed| planner.plan(&parsed.story))
            .collect()),
    }
}

fn summarize(plan: &TestPlan) -> PlanSummary {
    let mut tests_by_service = BTreeMap::new();
    for test in &plan.planned_tests {
        tests_by_service.insert(
            test.service.as_str().to_string(),
            test.test_types.iter().map(|t| t.as_str().to_string()).collect(),
        );
    }
    PlanSummary {
        story_id: plan.story_id.clone(),
        title: plan.title.clone(),
        services: plan
            .planned_services
            .iter()
            .map(|s| s.as_str().to_string())
            .collect(),
        tests_by_service,
        requires_flow_tests: plan.requires_flow_tests,
        recommended_test_count: recommended_test_count(plan),
        complexity: complexity(plan).as_str().to_string(),
    }
}
