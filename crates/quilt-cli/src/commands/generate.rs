use quilt_core::responses::{GenerateReport, GeneratedFileSummary};
use quilt_core::workspace::WorkspaceContext;
use quilt_gen::{ProductionTestGenerator, write_generated_files};

use crate::cli::GenerateArgs;
use crate::output;

use super::plan::plan_stories;
use super::{CommandContext, build_catalog, load_stories, scan_workspace};

pub fn handle(args: &GenerateArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let stories = load_stories(ctx, args.stories_dir.as_deref(), args.infer)?;
    let catalog = build_catalog(stories);
    let plans = plan_stories(&catalog, args.story.as_deref())?;

    let context: Option<WorkspaceContext> = if args.no_scan {
        None
    } else {
        Some(scan_workspace(ctx)?.context)
    };

    let generator = ProductionTestGenerator::new();
    let mut reports = Vec::with_capacity(plans.len());
    for plan in &plans {
        if plan.is_empty() {
            continue;
        }
        let generated = generator.generate(plan, context.as_ref());
        let written = write_generated_files(&ctx.root, &generated.files, args.dry_run)?;

        let files = generated
            .files
            .iter()
            .zip(written)
            .map(|(file, path)| GeneratedFileSummary {
                path,
                service: file
                    .service
                    .map_or_else(|| "flow".to_string(), |s| s.as_str().to_string()),
                test_cases: file.test_cases,
            })
            .collect();
        reports.push(GenerateReport {
            story_id: plan.story_id.clone(),
            dry_run: args.dry_run,
            files,
            warnings: generated.warnings,
        });
    }

    output::output(&reports, ctx.format)
}
