//! Tests for pagination module

use super::*;
use crate::auth::NotionToken;
use crate::client::{NotionClient, NotionClientConfig};
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Endpoint serving canned pages keyed by position
struct ScriptedEndpoint {
    pages: Vec<ListResponse<u32>>,
    cursors: Mutex<Vec<Option<String>>>,
}

impl ScriptedEndpoint {
    fn new(pages: Vec<ListResponse<u32>>) -> Self {
        Self {
            pages,
            cursors: Mutex::new(Vec::new()),
        }
    }

    /// Build N pages with cursors "c1".."c{N-1}"
    fn with_pages(pages: &[&[u32]]) -> Self {
        let last = pages.len() - 1;
        let pages = pages
            .iter()
            .enumerate()
            .map(|(i, results)| {
                if i == last {
                    ListResponse::complete(results.to_vec())
                } else {
                    ListResponse::partial(results.to_vec(), format!("c{}", i + 1))
                }
            })
            .collect();
        Self::new(pages)
    }

    fn calls(&self) -> Vec<Option<String>> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaginatedEndpoint for ScriptedEndpoint {
    type Item = u32;

    async fn fetch(&self, start_cursor: Option<&str>) -> Result<ListResponse<u32>> {
        self.cursors
            .lock()
            .unwrap()
            .push(start_cursor.map(str::to_string));
        let index = match start_cursor {
            None => 0,
            Some(c) => c.trim_start_matches('c').parse::<usize>().unwrap(),
        };
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| Error::api(500, "internal_server_error", "no such page"))
    }
}

// ============================================================================
// ListResponse Tests
// ============================================================================

#[test]
fn test_list_response_deserialize() {
    let page: ListResponse<serde_json::Value> = serde_json::from_value(json!({
        "object": "list",
        "results": [{"id": "a"}, {"id": "b"}],
        "has_more": true,
        "next_cursor": "abc",
        "type": "page_or_database"
    }))
    .unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.has_more);
    assert_eq!(page.next_cursor.as_deref(), Some("abc"));
}

#[test]
fn test_list_response_defaults() {
    let page: ListResponse<u32> = serde_json::from_value(json!({"results": []})).unwrap();
    assert_eq!(page.object, "list");
    assert!(page.is_empty());
    assert!(!page.has_more);
    assert!(page.next_cursor.is_none());
}

// ============================================================================
// NonPaginated Tests
// ============================================================================

#[tokio::test]
async fn test_single_page_passes_through() {
    let endpoint = ScriptedEndpoint::with_pages(&[&[1, 2, 3]]);
    let all = nonpaginated(&endpoint, Duration::ZERO).fetch_all().await.unwrap();

    assert_eq!(all.results, vec![1, 2, 3]);
    assert!(!all.has_more);
    assert_eq!(endpoint.calls(), vec![None]);
}

#[tokio::test]
async fn test_pages_are_concatenated_in_order() {
    let endpoint = ScriptedEndpoint::with_pages(&[&[1, 2], &[3], &[], &[4, 5, 6]]);
    let all = nonpaginated(&endpoint, Duration::ZERO).fetch_all().await.unwrap();

    assert_eq!(all.results, vec![1, 2, 3, 4, 5, 6]);
    assert!(!all.has_more);
    assert!(all.next_cursor.is_none());
    assert_eq!(
        endpoint.calls(),
        vec![
            None,
            Some("c1".to_string()),
            Some("c2".to_string()),
            Some("c3".to_string())
        ]
    );
}

#[tokio::test]
async fn test_count_is_sum_of_pages() {
    for n in 1..=6u32 {
        let pages: Vec<Vec<u32>> = (0..n).map(|i| (0..=i).collect()).collect();
        let refs: Vec<&[u32]> = pages.iter().map(Vec::as_slice).collect();
        let endpoint = ScriptedEndpoint::with_pages(&refs);

        let all = nonpaginated(&endpoint, Duration::ZERO).fetch_all().await.unwrap();
        let expected: Vec<u32> = pages.concat();
        assert_eq!(all.results, expected);
        assert_eq!(endpoint.calls().len(), n as usize);
    }
}

#[tokio::test]
async fn test_start_cursor_is_forwarded() {
    let endpoint = ScriptedEndpoint::with_pages(&[&[1], &[2], &[3]]);
    let all = nonpaginated(&endpoint, Duration::ZERO)
        .fetch(Some("c1"))
        .await
        .unwrap();

    assert_eq!(all.results, vec![2, 3]);
    assert_eq!(endpoint.calls()[0], Some("c1".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_wait_between_pages_only() {
    let endpoint = ScriptedEndpoint::with_pages(&[&[1], &[2], &[3]]);
    let wrapped = NonPaginated::with_default_wait(&endpoint);
    assert_eq!(wrapped.wait(), DEFAULT_PAGE_WAIT);

    let started = tokio::time::Instant::now();
    wrapped.fetch_all().await.unwrap();

    // Two waits for three pages
    assert_eq!(started.elapsed(), DEFAULT_PAGE_WAIT * 2);
}

#[tokio::test]
async fn test_missing_cursor_is_an_error() {
    let mut broken = ListResponse::partial(vec![1], "unused");
    broken.next_cursor = None;
    let endpoint = ScriptedEndpoint::new(vec![broken]);

    let err = nonpaginated(&endpoint, Duration::ZERO)
        .fetch_all()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Pagination { .. }));
}

#[tokio::test]
async fn test_endpoint_error_propagates_unchanged() {
    let pages = vec![
        ListResponse::partial(vec![1], "c1"),
        ListResponse::partial(vec![2], "c9"),
    ];
    let endpoint = ScriptedEndpoint::new(pages);

    let err = nonpaginated(&endpoint, Duration::ZERO)
        .fetch_all()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status: 500, .. }));
    // No retry at this layer
    assert_eq!(endpoint.calls().len(), 3);
}

// ============================================================================
// Notion Endpoint Tests
// ============================================================================

fn client_for(server: &MockServer) -> NotionClient {
    let config = NotionClientConfig::new()
        .http(
            HttpClientConfig::builder()
                .base_url(server.uri())
                .no_rate_limit()
                .build(),
        )
        .page_wait(Duration::ZERO);
    NotionClient::with_config(NotionToken::new("secret_test"), config).unwrap()
}

#[tokio::test]
async fn test_database_query_follows_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/databases/db1/query"))
        .and(body_json(json!({"page_size": 100})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "results": [{"id": "p1", "properties": {}}],
            "has_more": true,
            "next_cursor": "cursor-2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/databases/db1/query"))
        .and(body_json(json!({"page_size": 100, "start_cursor": "cursor-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "results": [{"id": "p2", "properties": {}}, {"id": "p3", "properties": {}}],
            "has_more": false,
            "next_cursor": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let all = nonpaginated(DatabaseQuery::new(&client, "db1"), client.page_wait())
        .fetch_all()
        .await
        .unwrap();

    let ids: Vec<_> = all.results.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
}

#[tokio::test]
async fn test_user_list_follows_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("start_cursor", "u-next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"object": "user", "id": "u2", "type": "bot", "name": "Bot"}],
            "has_more": false,
            "next_cursor": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page_size", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"object": "user", "id": "u1", "type": "person", "name": "Ada"}],
            "has_more": true,
            "next_cursor": "u-next"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let all = nonpaginated(UserList::new(&client), Duration::ZERO)
        .fetch_all()
        .await
        .unwrap();

    let ids: Vec<_> = all.results.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "u2"]);
}
