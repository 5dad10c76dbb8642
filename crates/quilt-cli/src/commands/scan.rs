use quilt_core::responses::ScanReport;

use crate::cli::ScanArgs;
use crate::output;

use super::{CommandContext, scan_workspace};

pub fn handle(_args: &ScanArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let result = scan_workspace(ctx)?;
    let report = ScanReport {
        success: result.success,
        stats: result.stats,
        errors: result.errors,
        warnings: result.warnings,
        duration_ms: result.duration_ms,
    };
    output::output(&report, ctx.format)
}
