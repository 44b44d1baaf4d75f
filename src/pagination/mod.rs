//! Pagination module
//!
//! # Overview
//!
//! Notion list endpoints return `results`, `has_more` and `next_cursor`.
//! [`nonpaginated`] wraps any [`PaginatedEndpoint`] so that one call walks
//! every cursor, sleeping a fixed delay between fetches, and returns the
//! concatenated results.

mod endpoints;
mod nonpaginated;
mod types;

pub use endpoints::{DatabaseQuery, UserList};
pub use nonpaginated::{nonpaginated, NonPaginated};
pub use types::{ListResponse, PaginatedEndpoint, DEFAULT_PAGE_WAIT, MAX_PAGE_SIZE};

#[cfg(test)]
mod tests;
