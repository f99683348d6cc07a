//! Laptop-Scout main entry point
//!
//! This is the command-line interface for the Laptop-Scout listing crawler.

use anyhow::Context;
use clap::Parser;
use laptop_scout::config::{load_config_with_hash, revalidate, Config};
use laptop_scout::crawler::run_crawl;
use laptop_scout::output::print_report;
use laptop_scout::url::page_url;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Laptop-Scout: a polite laptop listing crawler
///
/// Laptop-Scout walks a shop's paginated search results, keeps the laptops
/// matching the configured GPU, CPU and price limits, and appends them to a
/// CSV file.
#[derive(Parser, Debug)]
#[command(name = "laptop-scout")]
#[command(version = "1.0.0")]
#[command(about = "A polite laptop listing crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Only keep laptops whose GPU contains this text (overrides config)
    #[arg(long, value_name = "TEXT")]
    gpu: Option<String>,

    /// Only keep laptops whose CPU contains this text (overrides config)
    #[arg(long, value_name = "TEXT")]
    cpu: Option<String>,

    /// Inclusive price ceiling (overrides config)
    #[arg(long, value_name = "PRICE")]
    max_price: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    apply_overrides(&mut config, &cli).context("invalid command-line override")?;

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_crawl(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("laptop_scout=info,warn"),
            1 => EnvFilter::new("laptop_scout=debug,info"),
            2 => EnvFilter::new("laptop_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies filter overrides from the command line, then re-validates
fn apply_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if let Some(gpu) = &cli.gpu {
        config.filter.target_gpu = gpu.clone();
    }
    if let Some(cpu) = &cli.cpu {
        config.filter.target_cpu = cpu.clone();
    }
    if let Some(max_price) = cli.max_price {
        config.filter.max_price = max_price;
    }
    revalidate(config)?;
    Ok(())
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Laptop-Scout Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  First page: {}", page_url(&config.site.search_url, 1)?);
    println!("  User agent: {}", config.site.user_agent);
    println!("  Timeout: {}s", config.site.request_timeout_secs);

    println!("\nCache:");
    println!("  Directory: {}", config.cache.directory);
    println!("  Freshness: {} minutes", config.cache.freshness_minutes);

    println!("\nFilter:");
    println!("  GPU: {}", display_target(&config.filter.target_gpu));
    println!("  CPU: {}", display_target(&config.filter.target_cpu));
    println!("  Max price: {:.2}", config.filter.max_price);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Flush each page: {}", config.output.flush_each_page);

    println!("\n✓ Configuration is valid");

    Ok(())
}

fn display_target(target: &str) -> &str {
    if target.is_empty() {
        "(any)"
    } else {
        target
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl (GPU: {}, CPU: {}, max price: {:.2})",
        display_target(&config.filter.target_gpu),
        display_target(&config.filter.target_cpu),
        config.filter.max_price
    );

    let report = match run_crawl(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e).context("crawl aborted");
        }
    };

    print_report(&report);

    if report.rows_saved > 0 {
        println!(
            "{} laptops saved to {}",
            report.rows_saved, config.output.csv_path
        );
    } else {
        println!("No matching laptops found.");
    }

    Ok(())
}
