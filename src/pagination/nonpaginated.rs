//! Pagination flattening
//!
//! [`NonPaginated`] follows `has_more` / `next_cursor` until the list is
//! exhausted and hands back a single response holding every result.

use super::types::{ListResponse, PaginatedEndpoint, DEFAULT_PAGE_WAIT};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Wrap `endpoint` so one call returns all of its pages concatenated
pub fn nonpaginated<E: PaginatedEndpoint>(endpoint: E, wait: Duration) -> NonPaginated<E> {
    NonPaginated::new(endpoint, wait)
}

/// An endpoint whose responses are never paginated
///
/// Results keep page order and in-page order. `wait` is slept before every
/// fetch after the first. Errors from the wrapped endpoint are returned as-is.
#[derive(Debug, Clone)]
pub struct NonPaginated<E> {
    endpoint: E,
    wait: Duration,
}

impl<E: PaginatedEndpoint> NonPaginated<E> {
    /// Create a wrapper with an explicit inter-page wait
    pub fn new(endpoint: E, wait: Duration) -> Self {
        Self { endpoint, wait }
    }

    /// Create a wrapper using [`DEFAULT_PAGE_WAIT`]
    pub fn with_default_wait(endpoint: E) -> Self {
        Self::new(endpoint, DEFAULT_PAGE_WAIT)
    }

    /// Delay between successive fetches
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Get the wrapped endpoint
    pub fn inner(&self) -> &E {
        &self.endpoint
    }

    /// Fetch the whole list from the beginning
    pub async fn fetch_all(&self) -> Result<ListResponse<E::Item>> {
        self.fetch(None).await
    }
}

#[async_trait]
impl<E: PaginatedEndpoint> PaginatedEndpoint for NonPaginated<E> {
    type Item = E::Item;

    async fn fetch(&self, start_cursor: Option<&str>) -> Result<ListResponse<Self::Item>> {
        let mut page = self.endpoint.fetch(start_cursor).await?;
        let mut results = std::mem::take(&mut page.results);
        let mut page_count = 1usize;

        while page.has_more {
            let cursor = page.next_cursor.take().ok_or_else(|| {
                Error::pagination(format!(
                    "page {page_count} reported has_more without a next_cursor"
                ))
            })?;

            if !self.wait.is_zero() {
                tokio::time::sleep(self.wait).await;
            }

            page = self.endpoint.fetch(Some(&cursor)).await?;
            page_count += 1;
            debug!(
                "Page {}: fetched {} results ({} total)",
                page_count,
                page.results.len(),
                results.len() + page.results.len()
            );
            results.append(&mut page.results);
        }

        Ok(ListResponse {
            object: page.object,
            results,
            has_more: false,
            next_cursor: None,
        })
    }
}
