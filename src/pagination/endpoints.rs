//! Paginated Notion endpoints

use super::types::{ListResponse, PaginatedEndpoint};
use crate::client::NotionClient;
use crate::error::Result;
use crate::model::{Page, User};
use async_trait::async_trait;

/// `POST /databases/{id}/query`
#[derive(Debug, Clone)]
pub struct DatabaseQuery<'a> {
    client: &'a NotionClient,
    database_id: String,
}

impl<'a> DatabaseQuery<'a> {
    /// Create a query over every page of `database_id`
    pub fn new(client: &'a NotionClient, database_id: impl Into<String>) -> Self {
        Self {
            client,
            database_id: database_id.into(),
        }
    }

    /// Database being queried
    pub fn database_id(&self) -> &str {
        &self.database_id
    }
}

#[async_trait]
impl PaginatedEndpoint for DatabaseQuery<'_> {
    type Item = Page;

    async fn fetch(&self, start_cursor: Option<&str>) -> Result<ListResponse<Page>> {
        self.client
            .query_database(&self.database_id, start_cursor)
            .await
    }
}

/// `GET /users`
#[derive(Debug, Clone, Copy)]
pub struct UserList<'a> {
    client: &'a NotionClient,
}

impl<'a> UserList<'a> {
    /// Create a listing of all workspace users
    pub fn new(client: &'a NotionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaginatedEndpoint for UserList<'_> {
    type Item = User;

    async fn fetch(&self, start_cursor: Option<&str>) -> Result<ListResponse<User>> {
        self.client.list_users(start_cursor).await
    }
}
