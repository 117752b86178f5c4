//! Integration tests for the indexing pipeline
//!
//! These tests use wiremock to stand in for both the documentation site
//! (sitemap + pages) and the search engine, and exercise full and
//! incremental runs end-to-end.

use chrono::NaiveDate;
use docsite_indexer::config::{Config, CredentialMap};
use docsite_indexer::identity::document_id;
use docsite_indexer::pipeline::{IndexingPipeline, RunMode};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(index_name: &str, sitemap_urls: Vec<String>) -> Config {
    Config {
        index_name: index_name.to_string(),
        sitemap_urls,
    }
}

fn pipeline(config: Config, engine_uri: &str) -> IndexingPipeline {
    IndexingPipeline::new(config, CredentialMap::new(), engine_uri)
        .expect("failed to build pipeline")
        .with_fetch_delay(Duration::ZERO)
}

/// Mounts a sitemap document at /sitemap.xml
async fn mount_sitemap(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mounts an HTML page at the given path
async fn mount_page(server: &MockServer, page_path: &str, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><head><title>{title}</title></head><body><p>{body}</p></body></html>"
        )))
        .mount(server)
        .await;
}

/// Mounts a search engine that accepts any document write
async fn mount_engine_accepts_writes(server: &MockServer, index_name: &str) {
    Mock::given(method("PUT"))
        .and(path_regex(format!("^/{index_name}/_doc/[0-9a-f]{{32}}$")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"result": "created"})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_run_indexes_every_discovered_entry() {
    let site = MockServer::start().await;
    let engine = MockServer::start().await;

    mount_sitemap(
        &site,
        format!(
            r#"<urlset>
  <url><loc>{0}/intro</loc><lastmod>2024-01-10</lastmod></url>
  <url><loc>{0}/guide</loc></url>
</urlset>"#,
            site.uri()
        ),
    )
    .await;
    mount_page(&site, "/intro", "Intro", "intro text").await;
    mount_page(&site, "/guide", "Guide", "guide text").await;
    mount_engine_accepts_writes(&engine, "docs_idx").await;

    let config = test_config("docs_idx", vec![format!("{}/sitemap.xml", site.uri())]);
    let stats = pipeline(config, &engine.uri())
        .run(RunMode::Full)
        .await
        .unwrap();

    assert_eq!(stats.sources_crawled, 1);
    assert_eq!(stats.discovered, 2);
    assert_eq!(stats.indexed, 2);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.skipped, 0);

    // Each page was written under its deterministic ID, with lastmod carried
    // through (or null when the sitemap had none)
    let writes: Vec<_> = engine
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method == wiremock::http::Method::PUT)
        .collect();
    assert_eq!(writes.len(), 2);

    let intro_url = format!("{}/intro", site.uri());
    let intro_write = writes
        .iter()
        .find(|r| r.url.path().ends_with(&document_id(&intro_url)))
        .expect("no write for /intro");
    let doc: serde_json::Value = serde_json::from_slice(&intro_write.body).unwrap();
    assert_eq!(doc["title"], "Intro");
    assert_eq!(doc["text"], "intro text");
    assert_eq!(doc["url"], intro_url.as_str());
    assert_eq!(doc["lastmod"], "2024-01-10");

    let guide_url = format!("{}/guide", site.uri());
    let guide_write = writes
        .iter()
        .find(|r| r.url.path().ends_with(&document_id(&guide_url)))
        .expect("no write for /guide");
    let doc: serde_json::Value = serde_json::from_slice(&guide_write.body).unwrap();
    assert_eq!(doc["lastmod"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_failed_source_does_not_stop_later_sources() {
    let broken_site = MockServer::start().await;
    let site = MockServer::start().await;
    let engine = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken_site)
        .await;

    mount_sitemap(
        &site,
        format!(
            "<urlset><url><loc>{}/page</loc></url></urlset>",
            site.uri()
        ),
    )
    .await;
    mount_page(&site, "/page", "Page", "text").await;
    mount_engine_accepts_writes(&engine, "docs_idx").await;

    let config = test_config(
        "docs_idx",
        vec![
            format!("{}/sitemap.xml", broken_site.uri()),
            format!("{}/sitemap.xml", site.uri()),
        ],
    );
    let stats = pipeline(config, &engine.uri())
        .run(RunMode::Full)
        .await
        .unwrap();

    assert_eq!(stats.sources_failed, 1);
    assert_eq!(stats.sources_crawled, 1);
    assert_eq!(stats.indexed, 1);
}

#[tokio::test]
async fn test_failed_page_does_not_stop_other_entries() {
    let site = MockServer::start().await;
    let engine = MockServer::start().await;

    mount_sitemap(
        &site,
        format!(
            r#"<urlset>
  <url><loc>{0}/missing</loc></url>
  <url><loc>{0}/ok</loc></url>
</urlset>"#,
            site.uri()
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;
    mount_page(&site, "/ok", "Ok", "still indexed").await;
    mount_engine_accepts_writes(&engine, "docs_idx").await;

    let config = test_config("docs_idx", vec![format!("{}/sitemap.xml", site.uri())]);
    let stats = pipeline(config, &engine.uri())
        .run(RunMode::Full)
        .await
        .unwrap();

    assert_eq!(stats.discovered, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.indexed, 1);
}

#[tokio::test]
async fn test_index_rejection_affects_only_that_entry() {
    let site = MockServer::start().await;
    let engine = MockServer::start().await;

    let poisoned = format!("{}/poisoned", site.uri());

    mount_sitemap(
        &site,
        format!(
            r#"<urlset>
  <url><loc>{0}/poisoned</loc></url>
  <url><loc>{0}/fine</loc></url>
</urlset>"#,
            site.uri()
        ),
    )
    .await;
    mount_page(&site, "/poisoned", "Poisoned", "rejected downstream").await;
    mount_page(&site, "/fine", "Fine", "accepted").await;

    Mock::given(method("PUT"))
        .and(path(format!("/docs_idx/_doc/{}", document_id(&poisoned))))
        .respond_with(ResponseTemplate::new(400).set_body_string("mapper_parsing_exception"))
        .mount(&engine)
        .await;
    mount_engine_accepts_writes(&engine, "docs_idx").await;

    let config = test_config("docs_idx", vec![format!("{}/sitemap.xml", site.uri())]);
    let stats = pipeline(config, &engine.uri())
        .run(RunMode::Full)
        .await
        .unwrap();

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.indexed, 1);
}

#[tokio::test]
async fn test_incremental_run_filters_and_skips() {
    let site = MockServer::start().await;
    let engine = MockServer::start().await;
    let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

    // Four entries: unchanged (guard skip), changed (reindex), out of
    // window, and no lastmod at all (excluded from incremental runs).
    mount_sitemap(
        &site,
        format!(
            r#"<urlset>
  <url><loc>{0}/unchanged</loc><lastmod>2024-01-09</lastmod></url>
  <url><loc>{0}/changed</loc><lastmod>2024-01-09</lastmod></url>
  <url><loc>{0}/old</loc><lastmod>2023-06-01</lastmod></url>
  <url><loc>{0}/undated</loc></url>
</urlset>"#,
            site.uri()
        ),
    )
    .await;
    mount_page(&site, "/changed", "Changed", "new content").await;

    let unchanged = format!("{}/unchanged", site.uri());
    let changed = format!("{}/changed", site.uri());

    // Stored lastmod matches the sitemap for /unchanged...
    Mock::given(method("GET"))
        .and(path(format!("/docs_idx/_doc/{}", document_id(&unchanged))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "found": true,
            "_source": {"title": "U", "text": "t", "url": unchanged, "lastmod": "2024-01-09"}
        })))
        .mount(&engine)
        .await;
    // ...but is stale for /changed
    Mock::given(method("GET"))
        .and(path(format!("/docs_idx/_doc/{}", document_id(&changed))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "found": true,
            "_source": {"title": "C", "text": "t", "url": changed, "lastmod": "2024-01-02"}
        })))
        .mount(&engine)
        .await;
    mount_engine_accepts_writes(&engine, "docs_idx").await;

    let config = test_config("docs_idx", vec![format!("{}/sitemap.xml", site.uri())]);
    let stats = pipeline(config, &engine.uri())
        .run_with_today(RunMode::Incremental { window_days: 3 }, today)
        .await
        .unwrap();

    assert_eq!(stats.discovered, 4);
    assert_eq!(stats.out_of_window, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.indexed, 1);
    assert_eq!(stats.failed, 0);

    // Only /changed was fetched from the site
    let site_gets: Vec<_> = site
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() != "/sitemap.xml")
        .collect();
    assert_eq!(site_gets.len(), 1);
    assert_eq!(site_gets[0].url.path(), "/changed");
}

#[tokio::test]
async fn test_full_run_ignores_guard_entirely() {
    let site = MockServer::start().await;
    let engine = MockServer::start().await;

    mount_sitemap(
        &site,
        format!(
            "<urlset><url><loc>{}/page</loc><lastmod>2020-01-01</lastmod></url></urlset>",
            site.uri()
        ),
    )
    .await;
    mount_page(&site, "/page", "Page", "text").await;
    mount_engine_accepts_writes(&engine, "docs_idx").await;

    let config = test_config("docs_idx", vec![format!("{}/sitemap.xml", site.uri())]);
    let stats = pipeline(config, &engine.uri())
        .run(RunMode::Full)
        .await
        .unwrap();

    // Ancient lastmod is irrelevant in full mode, and no guard lookups hit
    // the engine
    assert_eq!(stats.indexed, 1);
    let engine_gets = engine
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method == wiremock::http::Method::GET)
        .count();
    assert_eq!(engine_gets, 0);
}

#[tokio::test]
async fn test_reindexing_same_url_converges_to_one_document_id() {
    let site = MockServer::start().await;
    let engine = MockServer::start().await;

    mount_sitemap(
        &site,
        format!(
            "<urlset><url><loc>{}/page</loc></url></urlset>",
            site.uri()
        ),
    )
    .await;
    mount_page(&site, "/page", "Page", "text").await;
    mount_engine_accepts_writes(&engine, "docs_idx").await;

    let config = test_config("docs_idx", vec![format!("{}/sitemap.xml", site.uri())]);
    let p = pipeline(config, &engine.uri());
    p.run(RunMode::Full).await.unwrap();
    p.run(RunMode::Full).await.unwrap();

    let put_paths: Vec<_> = engine
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method == wiremock::http::Method::PUT)
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(put_paths.len(), 2);
    assert_eq!(put_paths[0], put_paths[1]);
}

#[tokio::test]
async fn test_private_sitemap_host_uses_basic_auth() {
    let site = MockServer::start().await;
    let engine = MockServer::start().await;

    let host = url::Url::parse(&site.uri())
        .unwrap()
        .host_str()
        .unwrap()
        .to_string();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .and(header("authorization", "Basic c3ZjOnNlY3JldA=="))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<urlset><url><loc>{}/page</loc></url></urlset>",
            site.uri()
        )))
        .expect(1)
        .mount(&site)
        .await;
    mount_page(&site, "/page", "Page", "text").await;
    mount_engine_accepts_writes(&engine, "docs_idx").await;

    let mut credentials = CredentialMap::new();
    credentials.insert(host, "svc", "secret");

    let config = test_config("docs_idx", vec![format!("{}/sitemap.xml", site.uri())]);
    let stats = IndexingPipeline::new(config, credentials, &engine.uri())
        .unwrap()
        .with_fetch_delay(Duration::ZERO)
        .run(RunMode::Full)
        .await
        .unwrap();

    assert_eq!(stats.indexed, 1);
}

#[tokio::test]
async fn test_empty_config_is_a_noop_run() {
    let engine = MockServer::start().await;
    let config = test_config("docs_idx", vec![]);
    let stats = pipeline(config, &engine.uri())
        .run(RunMode::Full)
        .await
        .unwrap();

    assert_eq!(stats.discovered, 0);
    assert!(engine.received_requests().await.unwrap().is_empty());
}
