//! Notion API client
//!
//! A thin handle over [`HttpClient`] exposing the two list endpoints this
//! crate reads: database queries and workspace users.

use crate::auth::{get_notion_token, NotionToken, TokenConfig};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::model::{Page, User};
use crate::pagination::{ListResponse, DEFAULT_PAGE_WAIT, MAX_PAGE_SIZE};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Configuration for [`NotionClient`]
#[derive(Debug, Clone)]
pub struct NotionClientConfig {
    /// Transport settings
    pub http: HttpClientConfig,
    /// Delay between successive page fetches
    pub page_wait: Duration,
    /// Results requested per page (clamped to 1..=100)
    pub page_size: u32,
}

impl Default for NotionClientConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::default(),
            page_wait: DEFAULT_PAGE_WAIT,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl NotionClientConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set transport settings
    #[must_use]
    pub fn http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Set the delay between page fetches
    #[must_use]
    pub fn page_wait(mut self, wait: Duration) -> Self {
        self.page_wait = wait;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size.clamp(1, MAX_PAGE_SIZE);
        self
    }
}

/// Build a client for `token`, resolving one from the environment or a
/// prompt when none is given
pub fn get_notion_client(token: Option<NotionToken>) -> Result<NotionClient> {
    let token = match token {
        Some(token) => token,
        None => get_notion_token(&TokenConfig::default())?,
    };
    NotionClient::new(token)
}

/// Handle for Notion API calls
#[derive(Debug)]
pub struct NotionClient {
    http: HttpClient,
    page_wait: Duration,
    page_size: u32,
}

impl NotionClient {
    /// Create a client with default settings
    pub fn new(token: NotionToken) -> Result<Self> {
        Self::with_config(token, NotionClientConfig::default())
    }

    /// Create a client with custom settings
    pub fn with_config(token: NotionToken, config: NotionClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_config(config.http, token)?,
            page_wait: config.page_wait,
            page_size: config.page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    /// Delay between successive page fetches
    pub fn page_wait(&self) -> Duration {
        self.page_wait
    }

    /// Underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fetch one page of a database query
    pub async fn query_database(
        &self,
        database_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<ListResponse<Page>> {
        let database_id = normalize_id(database_id);
        let mut body = json!({ "page_size": self.page_size });
        if let Some(cursor) = start_cursor {
            body["start_cursor"] = json!(cursor);
        }

        debug!(
            "Querying database {} (cursor: {:?})",
            database_id, start_cursor
        );
        let url = self
            .http
            .endpoint_url(&["databases", &database_id, "query"])?;
        self.http.post_json(url.as_str(), body).await
    }

    /// Fetch one page of workspace users
    pub async fn list_users(&self, start_cursor: Option<&str>) -> Result<ListResponse<User>> {
        let mut request = RequestConfig::new().query("page_size", self.page_size.to_string());
        if let Some(cursor) = start_cursor {
            request = request.query("start_cursor", cursor);
        }

        debug!("Listing users (cursor: {:?})", start_cursor);
        self.http.get_json("users", request).await
    }
}

/// Extract a Notion object id from a bare id or a notion.so URL
///
/// Accepts dashed UUIDs, 32-character hex ids, and share links such as
/// `https://www.notion.so/team/Roadmap-0123...cdef?v=...`. Anything else is
/// returned unchanged.
pub fn normalize_id(id_or_url: &str) -> String {
    let trimmed = id_or_url.trim();
    let without_query = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
    let segment = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(without_query);

    let compact: Vec<char> = segment.chars().filter(|c| *c != '-').collect();
    if compact.len() >= 32 {
        let tail = &compact[compact.len() - 32..];
        if tail.iter().all(char::is_ascii_hexdigit) {
            return tail.iter().collect::<String>().to_ascii_lowercase();
        }
    }
    trimmed.to_string()
}
