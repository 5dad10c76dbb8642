use quilt_core::workspace::WorkspaceContext;
use quilt_gen::PlanExporter;

use crate::cli::ExportArgs;
use crate::output;

use super::plan::plan_stories;
use super::{CommandContext, build_catalog, load_stories, scan_workspace};

pub fn handle(args: &ExportArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let stories = load_stories(ctx, args.stories_dir.as_deref(), args.infer)?;
    let catalog = build_catalog(stories);
    let plans = plan_stories(&catalog, None)?;
    let exportable: Vec<&_> = plans.iter().filter(|plan| !plan.is_empty()).collect();

    let context: Option<WorkspaceContext> = if args.no_scan {
        None
    } else {
        Some(scan_workspace(ctx)?.context)
    };

    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        ctx.root.join(&ctx.config.general.output_dir)
    });
    let report = PlanExporter::new(output_dir).export(&exportable, context.as_ref())?;
    output::output(&report, ctx.format)
}
