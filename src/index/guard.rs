use crate::identity::document_id;
use crate::index::client::SearchIndexClient;

/// Skip decision for incremental runs
///
/// Avoids redundant fetch and index work for pages whose stored document
/// already carries the same sitemap-reported modification date.
pub struct IncrementalGuard<'a> {
    client: &'a SearchIndexClient,
}

impl<'a> IncrementalGuard<'a> {
    pub fn new(client: &'a SearchIndexClient) -> Self {
        Self { client }
    }

    /// Returns true when reindexing `page_url` would be redundant
    ///
    /// True only if a document under `document_id(page_url)` exists and its
    /// stored `lastmod` is string-equal to the candidate's; dates are treated
    /// as opaque strings, never parsed. A sitemap that changes its date
    /// format therefore stops matching and every entry gets reindexed — the
    /// accepted cost of preferring completeness. Any other condition,
    /// including a lookup failure, answers false so the entry proceeds to
    /// fetch and index.
    ///
    /// # Arguments
    ///
    /// * `page_url` - Literal page URL, as used for the original write
    /// * `lastmod` - Candidate modification date from the sitemap
    /// * `index_name` - Index to consult
    pub async fn should_skip(
        &self,
        page_url: &str,
        lastmod: Option<&str>,
        index_name: &str,
    ) -> bool {
        let Some(candidate) = lastmod else {
            return false;
        };

        let id = document_id(page_url);
        match self.client.get_document(index_name, &id).await {
            Ok(Some(stored)) => match stored.lastmod.as_deref() {
                Some(existing) if existing == candidate => {
                    tracing::debug!("Unchanged since {}, skipping {}", existing, page_url);
                    true
                }
                _ => false,
            },
            Ok(None) => false,
            Err(e) => {
                // Assume stale on lookup failure rather than miss an update
                tracing::warn!(
                    "Guard lookup failed for {} in '{}', reindexing: {}",
                    page_url,
                    index_name,
                    e
                );
                false
            }
        }
    }
}
