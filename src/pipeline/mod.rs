//! Indexing pipeline - main run orchestration logic
//!
//! This module drives one indexing run end to end:
//! - Crawling each configured sitemap source, in config order
//! - Incremental filtering by modification-date window
//! - Skip decisions via the incremental guard
//! - Throttled fetch + extract + upsert per entry
//! - Failure isolation: a failed source or entry never stops the run

mod stats;

pub use stats::RunStats;

use crate::config::{Config, CredentialMap};
use crate::content::ContentFetcher;
use crate::identity::document_id;
use crate::index::{IncrementalGuard, IndexedDocument, SearchIndexClient};
use crate::sitemap::{SitemapCrawler, SitemapEntry};
use crate::window::is_within_window;
use crate::IndexerError;
use chrono::{Local, NaiveDate};
use std::time::Duration;

/// Pause between successive page fetches, a rate limit on the content server
const DEFAULT_FETCH_DELAY: Duration = Duration::from_secs(1);

/// Run mode: reindex everything, or only what changed recently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Fetch and index every discovered entry
    Full,

    /// Restrict to entries whose lastmod falls within the last N days,
    /// skipping those the index already holds unchanged
    Incremental { window_days: i64 },
}

/// Orchestrates crawl, filter, guard, fetch, and upsert for one run
///
/// The pipeline owns no persistent state; all state of record lives in the
/// search engine, addressed purely by document ID. Entries are processed
/// strictly sequentially within a source, and sources strictly sequentially
/// in configuration order, which makes the per-entry fetch delay a correct
/// rate limit without any scheduler.
pub struct IndexingPipeline {
    config: Config,
    crawler: SitemapCrawler,
    fetcher: ContentFetcher,
    index: SearchIndexClient,
    fetch_delay: Duration,
}

impl IndexingPipeline {
    /// Creates a pipeline from resolved configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Index name and ordered sitemap sources
    /// * `credentials` - Per-host Basic auth for private sitemap hosts
    /// * `search_url` - Base URL of the search engine
    pub fn new(
        config: Config,
        credentials: CredentialMap,
        search_url: &str,
    ) -> Result<Self, IndexerError> {
        Ok(Self {
            config,
            crawler: SitemapCrawler::new(credentials)?,
            fetcher: ContentFetcher::new()?,
            index: SearchIndexClient::new(search_url)?,
            fetch_delay: DEFAULT_FETCH_DELAY,
        })
    }

    /// Overrides the inter-fetch delay (tests use zero)
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Overrides the content fetcher (e.g. custom content selectors)
    pub fn with_fetcher(mut self, fetcher: ContentFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// The search engine client, for index lifecycle operations
    pub fn index_client(&self) -> &SearchIndexClient {
        &self.index
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the pipeline over every configured source
    ///
    /// A source that fails to crawl contributes zero entries and the run
    /// continues; a page that fails to fetch or index is logged and the
    /// source's remaining entries are unaffected.
    pub async fn run(&self, mode: RunMode) -> Result<RunStats, IndexerError> {
        let today = Local::now().date_naive();
        self.run_with_today(mode, today).await
    }

    /// Same as [`run`](Self::run) with an injectable "today" for the window
    pub async fn run_with_today(
        &self,
        mode: RunMode,
        today: NaiveDate,
    ) -> Result<RunStats, IndexerError> {
        let mut stats = RunStats::new();
        let index_name = &self.config.index_name;

        tracing::info!(
            "Starting {} run into '{}' over {} source(s)",
            match mode {
                RunMode::Full => "full".to_string(),
                RunMode::Incremental { window_days } => {
                    format!("incremental ({window_days}-day window)")
                }
            },
            index_name,
            self.config.sitemap_urls.len()
        );

        for source in &self.config.sitemap_urls {
            let entries = match self.crawler.crawl(source).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::error!("Skipping source {}: {}", source, e);
                    stats.sources_failed += 1;
                    continue;
                }
            };
            stats.sources_crawled += 1;
            stats.discovered += entries.len() as u64;

            let entries = match mode {
                RunMode::Full => entries,
                RunMode::Incremental { window_days } => {
                    let before = entries.len();
                    let entries: Vec<SitemapEntry> = entries
                        .into_iter()
                        .filter(|entry| match entry.lastmod.as_deref() {
                            Some(date) => is_within_window(date, window_days, today),
                            None => false,
                        })
                        .collect();
                    stats.out_of_window += (before - entries.len()) as u64;
                    entries
                }
            };

            for entry in entries {
                self.process_entry(&entry, mode, index_name, &mut stats)
                    .await;
            }
        }

        tracing::info!("Run complete:\n{}", stats);
        Ok(stats)
    }

    /// Drives one entry through skip-check, fetch, and upsert
    async fn process_entry(
        &self,
        entry: &SitemapEntry,
        mode: RunMode,
        index_name: &str,
        stats: &mut RunStats,
    ) {
        if matches!(mode, RunMode::Incremental { .. }) {
            let guard = IncrementalGuard::new(&self.index);
            if guard
                .should_skip(&entry.url, entry.lastmod.as_deref(), index_name)
                .await
            {
                stats.skipped += 1;
                return;
            }
        }

        tokio::time::sleep(self.fetch_delay).await;

        let content = match self.fetcher.fetch(&entry.url).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Fetch failed, skipping entry: {}", e);
                stats.failed += 1;
                return;
            }
        };

        let document = IndexedDocument {
            title: content.title,
            text: content.text,
            url: entry.url.clone(),
            lastmod: entry.lastmod.clone(),
        };
        let id = document_id(&entry.url);

        match self.index.upsert(index_name, &id, &document).await {
            Ok(()) => {
                tracing::info!("Indexed {} ({})", entry.url, id);
                stats.indexed += 1;
            }
            Err(e) => {
                tracing::error!("Upsert into '{}' failed for {}: {}", index_name, entry.url, e);
                stats.failed += 1;
            }
        }
    }
}
