use crate::index::mapping::AnalyzerProfile;
use crate::IndexError;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Document shape written to the index
///
/// Every write replaces the whole document; there are no partial updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedDocument {
    pub title: String,
    pub text: String,
    pub url: String,
    pub lastmod: Option<String>,
}

/// Document shape read back from the index
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub lastmod: Option<String>,
}

/// REST client for an OpenSearch-compatible search engine
///
/// Connections are scoped per call; the underlying pool is released when the
/// client is dropped, whatever the outcome of the last operation.
pub struct SearchIndexClient {
    client: Client,
    base_url: String,
}

impl SearchIndexClient {
    /// Creates a client for the engine at `base_url`, e.g. `http://localhost:9200`
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn index_url(&self, index_name: &str) -> String {
        format!("{}/{}", self.base_url, index_name)
    }

    fn doc_url(&self, index_name: &str, id: &str) -> String {
        format!("{}/{}/_doc/{}", self.base_url, index_name, id)
    }

    /// Checks whether an index exists
    pub async fn exists(&self, index_name: &str) -> Result<bool, IndexError> {
        let response = self.client.head(self.index_url(index_name)).send().await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(IndexError::Rejected {
                index: index_name.to_string(),
                status: status.as_u16(),
                body: String::new(),
            }),
        }
    }

    /// Creates an index with the mapping derived from `profile`
    ///
    /// The mapping analyzes `title`/`text` with the profile's analyzer and
    /// declares `url` as a keyword field.
    pub async fn create_index(
        &self,
        index_name: &str,
        profile: &AnalyzerProfile,
    ) -> Result<(), IndexError> {
        let response = self
            .client
            .put(self.index_url(index_name))
            .json(&profile.mapping())
            .send()
            .await?;
        self.check_response(index_name, response).await?;
        tracing::info!("Created index '{}'", index_name);
        Ok(())
    }

    /// Deletes an index when it exists; absent indexes are not an error
    pub async fn delete_index_if_exists(&self, index_name: &str) -> Result<(), IndexError> {
        if !self.exists(index_name).await? {
            tracing::debug!("Index '{}' does not exist, nothing to delete", index_name);
            return Ok(());
        }
        let response = self
            .client
            .delete(self.index_url(index_name))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        self.check_response(index_name, response).await?;
        tracing::info!("Deleted index '{}'", index_name);
        Ok(())
    }

    /// Writes a document under the caller-supplied ID
    ///
    /// Repeated calls with the same ID converge to one document: the write
    /// creates it when absent and fully replaces it when present.
    pub async fn upsert(
        &self,
        index_name: &str,
        id: &str,
        document: &IndexedDocument,
    ) -> Result<(), IndexError> {
        let response = self
            .client
            .put(self.doc_url(index_name, id))
            .json(document)
            .send()
            .await?;
        self.check_response(index_name, response).await?;
        Ok(())
    }

    /// Reads a document back by ID
    ///
    /// # Returns
    ///
    /// * `Ok(Some(StoredDocument))` - The document exists
    /// * `Ok(None)` - No document under this ID
    /// * `Err(IndexError)` - Engine unreachable or lookup rejected
    pub async fn get_document(
        &self,
        index_name: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, IndexError> {
        let response = self
            .client
            .get(self.doc_url(index_name, id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = self.check_response(index_name, response).await?;

        let envelope: GetDocResponse = response.json().await?;
        if envelope.found {
            Ok(envelope.source)
        } else {
            Ok(None)
        }
    }

    /// Maps a non-success response to `IndexError::Rejected` with its body
    async fn check_response(
        &self,
        index_name: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, IndexError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(IndexError::Rejected {
            index: index_name.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

/// Envelope of a `GET /{index}/_doc/{id}` response
#[derive(Debug, Deserialize)]
struct GetDocResponse {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source", default)]
    source: Option<StoredDocument>,
}
