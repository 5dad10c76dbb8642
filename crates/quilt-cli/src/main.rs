use std::path::PathBuf;

use clap::Parser;

mod cli;
mod commands;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("qlt error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = quilt_config::QuiltConfig::load_with_dotenv()?;
    let root: PathBuf = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };

    let ctx = commands::CommandContext {
        config,
        root,
        format: cli.format,
        quiet: cli.quiet,
    };

    match &cli.command {
        cli::Commands::Parse(args) => commands::parse::handle(args, &ctx),
        cli::Commands::Scan(args) => commands::scan::handle(args, &ctx),
        cli::Commands::Plan(args) => commands::plan::handle(args, &ctx),
        cli::Commands::Generate(args) => commands::generate::handle(args, &ctx),
        cli::Commands::Export(args) => commands::export::handle(args, &ctx),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("QUILT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
