//! Docsite-Indexer: a full-text search indexer for documentation sites
//!
//! This crate crawls a configured set of documentation sites, discovers
//! changed pages through their `sitemap.xml` metadata, extracts page content,
//! and upserts it into an OpenSearch-compatible full-text index. It supports
//! both full reindex runs and incremental runs restricted to pages modified
//! within a recent day-window.

pub mod config;
pub mod content;
pub mod identity;
pub mod index;
pub mod pipeline;
pub mod sitemap;
pub mod window;

use thiserror::Error;

/// Main error type for indexer operations
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sitemap crawl error: {0}")]
    Crawl(#[from] CrawlError),

    #[error("Content fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// A config with zero sitemap URLs is valid (it yields a no-op run), so the
/// only parse-time failure mode is an unreadable source.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid credential spec (expected HOST=USER:PASS): {0}")]
    InvalidCredential(String),
}

/// Errors while crawling one sitemap source
///
/// Fatal for that source only; the pipeline treats a failed source as zero
/// entries and proceeds with the remaining configured sources.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Sitemap unreachable at {url}: {source}")]
    Unreachable { url: String, source: reqwest::Error },

    #[error("Sitemap at {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Malformed sitemap XML at {url}: {message}")]
    Malformed { url: String, message: String },
}

/// Errors while fetching one page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Errors from the search engine client
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Search engine unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Index operation on '{index}' rejected with HTTP {status}: {body}")]
    Rejected {
        index: String,
        status: u16,
        body: String,
    },
}

/// Result type alias for indexer operations
pub type Result<T> = std::result::Result<T, IndexerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CredentialMap};
pub use content::ExtractedContent;
pub use identity::document_id;
pub use index::{AnalyzerProfile, IncrementalGuard, SearchIndexClient};
pub use pipeline::{IndexingPipeline, RunMode, RunStats};
pub use sitemap::{SitemapCrawler, SitemapEntry};
