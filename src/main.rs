//! Docsite-Indexer main entry point
//!
//! This is the command-line interface for the documentation site search
//! indexer.

use anyhow::Context;
use clap::Parser;
use docsite_indexer::config::{load_config_with_hash, CredentialMap};
use docsite_indexer::index::AnalyzerProfile;
use docsite_indexer::pipeline::{IndexingPipeline, RunMode};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Docsite-Indexer: full-text search indexing for documentation sites
///
/// Crawls the sitemaps named in the configuration file, extracts page
/// content, and upserts it into an OpenSearch-compatible index. By default
/// every discovered page is reindexed; with --incremental only pages whose
/// sitemap lastmod falls within the recent day-window are considered.
#[derive(Parser, Debug)]
#[command(name = "docsite-indexer")]
#[command(version = "1.0.0")]
#[command(about = "Index documentation sites for full-text search", long_about = None)]
struct Cli {
    /// Path to the index configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Only index pages changed within the day-window
    #[arg(long)]
    incremental: bool,

    /// Day-window size for incremental runs
    #[arg(long, default_value_t = 3, requires = "incremental")]
    days: i64,

    /// Delete and recreate the index (with mapping) before indexing
    #[arg(long)]
    recreate_index: bool,

    /// Base URL of the search engine
    #[arg(long, default_value = "http://localhost:9200")]
    search_url: String,

    /// Delay between page fetches, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Basic auth for a private sitemap host, as HOST=USER:PASS (repeatable)
    #[arg(long, value_name = "HOST=USER:PASS")]
    basic_auth: Vec<String>,

    /// Analyzer name declared in the index mapping
    #[arg(long, default_value = "my_japanese_analyzer")]
    analyzer: String,

    /// Analyzer type (tokenizer) backing the analyzer
    #[arg(long, default_value = "kuromoji")]
    tokenizer: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be indexed without indexing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let credentials =
        CredentialMap::from_specs(&cli.basic_auth).context("invalid --basic-auth value")?;

    if cli.dry_run {
        handle_dry_run(&config, &credentials, &cli);
        return Ok(());
    }

    let pipeline = IndexingPipeline::new(config, credentials, &cli.search_url)
        .context("failed to initialize the indexing pipeline")?
        .with_fetch_delay(Duration::from_millis(cli.delay_ms));

    if cli.recreate_index {
        let profile = AnalyzerProfile::new(&cli.analyzer, &cli.tokenizer);
        let index_name = pipeline.config().index_name.clone();
        tracing::info!("Recreating index '{}'", index_name);
        pipeline
            .index_client()
            .delete_index_if_exists(&index_name)
            .await
            .with_context(|| format!("failed to delete index '{index_name}'"))?;
        pipeline
            .index_client()
            .create_index(&index_name, &profile)
            .await
            .with_context(|| format!("failed to create index '{index_name}'"))?;
    }

    let mode = if cli.incremental {
        RunMode::Incremental {
            window_days: cli.days,
        }
    } else {
        RunMode::Full
    };

    let stats = pipeline.run(mode).await.context("indexing run failed")?;
    println!("{stats}");
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docsite_indexer=info,warn"),
            1 => EnvFilter::new("docsite_indexer=debug,info"),
            2 => EnvFilter::new("docsite_indexer=trace,debug"),
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

/// Handles --dry-run: validates config and shows what would be indexed
fn handle_dry_run(
    config: &docsite_indexer::config::Config,
    credentials: &CredentialMap,
    cli: &Cli,
) {
    println!("=== Docsite-Indexer Dry Run ===\n");

    println!("Index: {}", config.index_name);
    println!("Search engine: {}", cli.search_url);
    println!(
        "Mode: {}",
        if cli.incremental {
            format!("incremental ({} days)", cli.days)
        } else {
            "full".to_string()
        }
    );
    println!("Fetch delay: {}ms", cli.delay_ms);
    println!("Authenticated hosts: {}", credentials.len());

    println!("\nSitemap sources ({}):", config.sitemap_urls.len());
    for url in &config.sitemap_urls {
        println!("  - {}", url);
    }

    println!("\n✓ Configuration is valid");
}
