use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `qlt` binary.
#[derive(Debug, Parser)]
#[command(name = "qlt", version, about = "Quilt - story-driven test planning and generation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, text
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse and validate story documents
    Parse(ParseArgs),
    /// Scan the workspace and summarize extracted symbols
    Scan(ScanArgs),
    /// Build test plans from parsed stories
    Plan(PlanArgs),
    /// Generate production test sources from plans
    Generate(GenerateArgs),
    /// Export test plans as JSON and Markdown reports
    Export(ExportArgs),
}

#[derive(Debug, clap::Args)]
pub struct ParseArgs {
    /// Stories directory (defaults to the configured stories_dir)
    #[arg(long)]
    pub stories_dir: Option<PathBuf>,

    /// Infer services when a story declares none
    #[arg(long)]
    pub infer: bool,
}

#[derive(Debug, clap::Args)]
pub struct ScanArgs {}

#[derive(Debug, clap::Args)]
pub struct PlanArgs {
    /// Plan a single story by id (e.g. "Story 3.2"); all stories otherwise
    #[arg(long)]
    pub story: Option<String>,

    #[arg(long)]
    pub stories_dir: Option<PathBuf>,

    #[arg(long)]
    pub infer: bool,
}

#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// Generate for a single story by id; all stories otherwise
    #[arg(long)]
    pub story: Option<String>,

    #[arg(long)]
    pub stories_dir: Option<PathBuf>,

    #[arg(long)]
    pub infer: bool,

    /// Skip the workspace scan (payloads degrade to empty objects)
    #[arg(long)]
    pub no_scan: bool,

    /// Report what would be written without touching the disk
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, clap::Args)]
pub struct ExportArgs {
    #[arg(long)]
    pub stories_dir: Option<PathBuf>,

    /// Export directory (defaults to the configured output_dir)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[arg(long)]
    pub infer: bool,

    /// Skip the workspace scan (no sample payloads in exports)
    #[arg(long)]
    pub no_scan: bool,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["qlt", "--format", "text", "--verbose", "scan"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Scan(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["qlt", "parse", "--infer", "--quiet"])
            .expect("cli should parse");
        assert!(cli.quiet);
        match cli.command {
            Commands::Parse(args) => assert!(args.infer),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn generate_accepts_story_and_dry_run() {
        let cli = Cli::try_parse_from([
            "qlt",
            "generate",
            "--story",
            "Story 3.2",
            "--dry-run",
            "--no-scan",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.story.as_deref(), Some("Story 3.2"));
                assert!(args.dry_run);
                assert!(args.no_scan);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
