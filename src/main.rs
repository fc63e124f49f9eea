//! Webmap main entry point
//!
//! This is the command-line interface for the Webmap site mapper.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use webmap::config::{load_config_with_hash, validate, Config};
use webmap::crawler::Crawler;
use webmap::output::{generate_markdown_summary, print_statistics, print_tree, CrawlStatistics};

/// Webmap: a speedy concurrent site mapper
///
/// Webmap crawls a website from a seed URL, following links on the same host
/// up to a maximum depth, and prints the tree of pages found together with the
/// images and scripts each page references.
#[derive(Parser, Debug)]
#[command(name = "webmap")]
#[command(version)]
#[command(about = "A speedy concurrent site mapper", long_about = None)]
struct Cli {
    /// URL to start crawl on
    #[arg(short = 'u', long = "url", value_name = "URL")]
    url: Option<String>,

    /// How deep the recursive crawler should search
    #[arg(short = 'd', long = "depth", value_name = "DEPTH")]
    depth: Option<u32>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Cap the number of simultaneous fetches (unbounded by default)
    #[arg(long, value_name = "N")]
    max_concurrent_fetches: Option<usize>,

    /// Write a markdown summary to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Print crawl statistics after the site map
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_settings(&cli)?;

    let crawler = Crawler::new(&config).context("Failed to build HTTP client")?;
    let mut report = crawler.run().await.context("Crawl could not start")?;
    report.root.sort();

    if !cli.quiet {
        print_tree(&report.root);
    }

    if cli.stats {
        print_statistics(&CrawlStatistics::from_report(&report));
    }

    if let Some(path) = &config.output.summary_path {
        generate_markdown_summary(&report, config_hash.as_deref(), Path::new(path))
            .with_context(|| format!("Failed to write summary to {}", path))?;
        tracing::info!("Summary written to {}", path);
    }

    Ok(())
}

/// Loads the configuration file (if any) and applies CLI overrides
fn load_settings(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(url) = &cli.url {
        config.crawler.seed_url = url.clone();
    }
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if cli.max_concurrent_fetches.is_some() {
        config.crawler.max_concurrent_fetches = cli.max_concurrent_fetches;
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.display().to_string());
    }

    validate(&config).context("Invalid settings")?;

    Ok((config, config_hash))
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webmap=info,warn"),
            1 => EnvFilter::new("webmap=debug,info"),
            2 => EnvFilter::new("webmap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
