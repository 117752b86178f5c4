use crate::content::extractor::{extract_content, ExtractedContent, DEFAULT_CONTENT_SELECTORS};
use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use std::time::Duration;

/// Browser-like User-Agent; documentation hosts commonly refuse obvious bots
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "ja,en-US;q=0.9,en;q=0.8";
const REFERER_VALUE: &str = "https://www.google.com/";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches pages and extracts their indexable content
pub struct ContentFetcher {
    client: Client,
    content_selectors: Vec<String>,
}

impl ContentFetcher {
    /// Creates a fetcher with the default docs-layout content selectors
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_selectors(
            DEFAULT_CONTENT_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    /// Creates a fetcher with a custom content-selector list
    ///
    /// Selectors are tried in order; the first non-empty match supplies the
    /// page text, and the document body is the final fallback.
    pub fn with_selectors(content_selectors: Vec<String>) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
        );
        headers.insert(REFERER, HeaderValue::from_static(REFERER_VALUE));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(FETCH_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            content_selectors,
        })
    }

    /// Fetches one page and extracts its title and text
    ///
    /// Redirects are followed; any non-200 terminal response or transport
    /// failure is a [`FetchError`] for this entry alone — the caller skips
    /// the entry without retrying.
    ///
    /// # Arguments
    ///
    /// * `page_url` - The page address, used literally
    ///
    /// # Returns
    ///
    /// * `Ok(ExtractedContent)` - Title and body text
    /// * `Err(FetchError)` - Page unreachable or non-200
    pub async fn fetch(&self, page_url: &str) -> Result<ExtractedContent, FetchError> {
        let response =
            self.client
                .get(page_url)
                .send()
                .await
                .map_err(|e| FetchError::Transport {
                    url: page_url.to_string(),
                    source: e,
                })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                url: page_url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Transport {
            url: page_url.to_string(),
            source: e,
        })?;

        Ok(extract_content(&body, &self.content_selectors))
    }
}
