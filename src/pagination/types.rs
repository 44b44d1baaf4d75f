//! Pagination types and traits
//!
//! Defines the list response shape shared by every Notion list endpoint and
//! the trait that paginated endpoints implement.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay between successive page fetches
pub const DEFAULT_PAGE_WAIT: Duration = Duration::from_millis(100);

/// Largest page size Notion accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of a cursor-paginated list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "default_list_object")]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

fn default_list_object() -> String {
    "list".to_string()
}

impl<T> ListResponse<T> {
    /// Create a final page holding `results`
    pub fn complete(results: Vec<T>) -> Self {
        Self {
            object: default_list_object(),
            results,
            has_more: false,
            next_cursor: None,
        }
    }

    /// Create a page that continues at `next_cursor`
    pub fn partial(results: Vec<T>, next_cursor: impl Into<String>) -> Self {
        Self {
            object: default_list_object(),
            results,
            has_more: true,
            next_cursor: Some(next_cursor.into()),
        }
    }

    /// Number of results on this page
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if this page has no results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A list endpoint that is read one cursor at a time
#[async_trait]
pub trait PaginatedEndpoint: Send + Sync {
    /// Item type of the list
    type Item: Send;

    /// Fetch the page starting at `start_cursor` (`None` for the first page)
    async fn fetch(&self, start_cursor: Option<&str>) -> Result<ListResponse<Self::Item>>;
}

#[async_trait]
impl<'a, E: PaginatedEndpoint + ?Sized> PaginatedEndpoint for &'a E {
    type Item = E::Item;

    async fn fetch(&self, start_cursor: Option<&str>) -> Result<ListResponse<Self::Item>> {
        (**self).fetch(start_cursor).await
    }
}
