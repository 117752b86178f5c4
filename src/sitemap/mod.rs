//! Sitemap crawling module
//!
//! This module discovers pages by streaming a site's `sitemap.xml`:
//! - Fetching the sitemap over HTTP, with per-host Basic auth for private
//!   hosts
//! - Event-based XML parsing that emits one entry per `<url>` block

mod parser;

pub use parser::parse_sitemap;

use crate::config::CredentialMap;
use crate::CrawlError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// One entry from a sitemap
///
/// The order entries arrive in carries no meaning; a sitemap is treated as
/// an unordered change feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Canonical page address; never empty
    pub url: String,

    /// Sitemap-reported modification date (`yyyy-MM-dd`), if present
    pub lastmod: Option<String>,
}

/// Crawls sitemap sources and yields their page entries
pub struct SitemapCrawler {
    client: Client,
    credentials: CredentialMap,
}

impl SitemapCrawler {
    /// Creates a crawler with the given per-host credential table
    ///
    /// # Returns
    ///
    /// * `Ok(SitemapCrawler)` - Successfully built HTTP client
    /// * `Err(reqwest::Error)` - Failed to build client
    pub fn new(credentials: CredentialMap) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            credentials,
        })
    }

    /// Fetches and parses one sitemap
    ///
    /// When the sitemap's host has registered credentials, the fetch carries
    /// HTTP Basic auth; all other hosts are fetched anonymously.
    ///
    /// # Arguments
    ///
    /// * `sitemap_url` - Address of the `sitemap.xml` document
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SitemapEntry>)` - One entry per well-formed `<url>` block
    /// * `Err(CrawlError)` - Source unreachable or XML malformed
    pub async fn crawl(&self, sitemap_url: &str) -> Result<Vec<SitemapEntry>, CrawlError> {
        let mut request = self.client.get(sitemap_url);

        if let Some(creds) = self.host_credentials(sitemap_url) {
            tracing::debug!("Using Basic auth for sitemap host of {}", sitemap_url);
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = request.send().await.map_err(|e| CrawlError::Unreachable {
            url: sitemap_url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: sitemap_url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| CrawlError::Unreachable {
            url: sitemap_url.to_string(),
            source: e,
        })?;

        let entries = parse_sitemap(&body).map_err(|message| CrawlError::Malformed {
            url: sitemap_url.to_string(),
            message,
        })?;

        tracing::info!("Crawled {}: {} entries", sitemap_url, entries.len());
        Ok(entries)
    }

    fn host_credentials(&self, sitemap_url: &str) -> Option<&crate::config::HostCredentials> {
        let parsed = Url::parse(sitemap_url).ok()?;
        self.credentials.lookup(parsed.host_str()?)
    }
}
