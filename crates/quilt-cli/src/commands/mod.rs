//! Command handlers for the `qlt` binary.

pub mod export;
pub mod generate;
pub mod parse;
pub mod plan;
pub mod scan;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use indicatif::{ProgressBar, ProgressStyle};

use quilt_config::QuiltConfig;
use quilt_core::story::ParsedStory;
use quilt_scan::{WorkspaceScanResult, WorkspaceScanner};
use quilt_story::{StoryCatalog, StoryParser};

use crate::cli::OutputFormat;

/// Everything a command handler needs.
pub struct CommandContext {
    pub config: QuiltConfig,
    pub root: PathBuf,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl CommandContext {
    fn stories_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir.map_or_else(
            || self.root.join(&self.config.general.stories_dir),
            Path::to_path_buf,
        )
    }

    fn parser(&self, infer_flag: bool) -> StoryParser {
        if infer_flag || self.config.general.enable_inference {
            StoryParser::with_inference()
        } else {
            StoryParser::new()
        }
    }
}

/// Parse all stories under the effective stories directory.
fn load_stories(
    ctx: &CommandContext,
    override_dir: Option<&Path>,
    infer: bool,
) -> anyhow::Result<Vec<ParsedStory>> {
    let dir = ctx.stories_dir(override_dir);
    ctx.parser(infer)
        .parse_directory(&dir)
        .with_context(|| format!("failed to parse stories under {}", dir.display()))
}

fn build_catalog(stories: Vec<ParsedStory>) -> StoryCatalog {
    let mut catalog = StoryCatalog::new();
    catalog.insert_all(stories);
    catalog
}

/// Run the workspace scan with a spinner unless quiet.
fn scan_workspace(ctx: &CommandContext) -> anyhow::Result<WorkspaceScanResult> {
    let spinner = if ctx.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message("scanning workspace...");
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    };

    let result = WorkspaceScanner::new(ctx.config.scan.clone())
        .context("invalid scan configuration")?
        .scan(&ctx.root)
        .context("workspace scan failed")?;
    spinner.finish_and_clear();
    Ok(result)
}
