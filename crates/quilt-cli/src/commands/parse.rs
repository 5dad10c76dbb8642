use quilt_core::responses::ParseReport;

use crate::cli::ParseArgs;
use crate::output;

use super::{CommandContext, build_catalog, load_stories};

pub fn handle(args: &ParseArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let stories = load_stories(ctx, args.stories_dir.as_deref(), args.infer)?;
    let catalog = build_catalog(stories);
    let stats = catalog.statistics();

    let report = ParseReport {
        stories_parsed: stats.total,
        stories_valid: stats.valid,
        stories_invalid: stats.invalid,
        by_service: stats.by_service,
        by_epic: stats.by_epic,
        results: catalog.list().into_iter().cloned().collect(),
    };
    output::output(&report, ctx.format)
}
