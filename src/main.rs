//! HMV Achievements main entry point
//!
//! This is the command-line interface for the achievement ledger crawler.

use anyhow::Context;
use clap::Parser;
use hmv_achievements::config::{load_config, validate, Config};
use hmv_achievements::crawler::{crawl, resolve_start_id};
use hmv_achievements::ledger::{CsvLedger, Ledger};
use hmv_achievements::output::{
    load_statistics, print_statistics, ActionLog, CrawlStats, Observers, ProgressReporter,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// HMV Achievements: a resumable achievement crawler
///
/// Walks achievement pages by ID and appends every earned achievement to a
/// CSV ledger. Each run continues after the last ID already in the ledger.
#[derive(Parser, Debug)]
#[command(name = "hmv-achievements")]
#[command(version)]
#[command(about = "Achievement scraper with a resumable CSV ledger", long_about = None)]
struct Cli {
    /// Start ID to crawl from (overrides the ledger's resume point)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    start: Option<u64>,

    /// Output CSV path
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Stop after attempting this many IDs
    #[arg(long, value_name = "N")]
    max_ids: Option<u64>,

    /// Verbose output (-v progress lines, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress the action log and non-error diagnostics
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration and start ID without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the ledger and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config, cli.start);
        Ok(ExitCode::SUCCESS)
    } else if cli.stats {
        handle_stats(&config)?;
        Ok(ExitCode::SUCCESS)
    } else {
        handle_crawl(&config, &cli).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 | 1 => EnvFilter::new("hmv_achievements=info,warn"),
            2 => EnvFilter::new("hmv_achievements=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (or defaults) and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.ledger_path = output.clone();
    }
    if let Some(max_ids) = cli.max_ids {
        config.crawler.max_ids = Some(max_ids);
    }
    if cli.quiet {
        config.output.action_log = false;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, start: Option<u64>) {
    let ledger = CsvLedger::open(&config.output.ledger_path);
    let start_id = resolve_start_id(start, ledger.resume_point());

    println!("=== HMV Achievements Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  URL template: {}", config.crawler.url_template);
    println!("  Max retry: {}", config.crawler.max_retry);
    println!("  Empty limit: {}", config.crawler.empty_limit);
    println!("  Batch size: {}", config.crawler.batch_size);
    println!("  Exhaustion floor: {}", config.crawler.exhaustion_floor);
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    match config.crawler.max_ids {
        Some(max_ids) => println!("  Max IDs: {}", max_ids),
        None => println!("  Max IDs: unlimited"),
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Ledger: {}", config.output.ledger_path.display());
    println!("  Action log: {}", config.output.action_log);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling at {}",
        config.crawler.page_url(start_id)
    );
}

/// Handles the --stats mode: shows statistics from the ledger
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let ledger = CsvLedger::open(&config.output.ledger_path);
    println!("Ledger: {}\n", ledger.path().display());

    let stats = load_statistics(&ledger)
        .with_context(|| format!("Failed to read {}", ledger.path().display()))?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, cli: &Cli) -> anyhow::Result<ExitCode> {
    let shutdown = setup_shutdown_handler();

    let mut action_log = ActionLog::stdout();
    let mut progress = ProgressReporter::stdout();
    let mut stats = CrawlStats::default();

    let summary = {
        let mut observers = Observers::new();
        if config.output.action_log {
            observers.push(&mut action_log);
        }
        if cli.verbose > 0 {
            observers.push(&mut progress);
        }
        observers.push(&mut stats);

        crawl(config, cli.start, &shutdown, &mut observers).await?
    };

    if cli.verbose > 0 {
        println!();
        stats.print();
    }

    if summary.interrupted() {
        println!("\n[!] Interrupted by user");
        return Ok(ExitCode::from(1));
    }

    println!("New records added: {}", summary.new_records);
    Ok(ExitCode::SUCCESS)
}

/// First Ctrl+C asks the crawl to stop after the in-flight request. Second Ctrl+C exits immediately.
fn setup_shutdown_handler() -> watch::Receiver<bool> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nReceived Ctrl+C, saving buffered records...");
            eprintln!("Press Ctrl+C again to force quit");
            let _ = shutdown_tx.send(true);

            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nForce quit requested, exiting immediately...");
                std::process::exit(1);
            }
        }
    });

    shutdown_rx
}
