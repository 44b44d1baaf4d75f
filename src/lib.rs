// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Notion Frames
//!
//! Flatten Notion databases and workspace users into tables.
//!
//! ## Features
//!
//! - **Token resolution**: environment variable first, masked prompt second
//! - **Pagination flattening**: walk every cursor of a list endpoint
//! - **Schema mapping**: simplify typed page properties into cells, with a
//!   choice of date-range layouts
//! - **Arrow output**: RecordBatch conversion and Parquet files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notion_frames::{database_to_dataframe, get_notion_client, users_to_dataframe, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Token from NOTION_TOKEN, or prompted for
//!     let client = get_notion_client(None)?;
//!
//!     let tasks = database_to_dataframe(&client, "0123456789abcdef0123456789abcdef", "mangle", None).await?;
//!     let users = users_to_dataframe(&client).await?;
//!
//!     println!("{} tasks, {} users", tasks.num_rows(), users.num_rows());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  database_to_dataframe()            users_to_dataframe()     │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬───────────┐
//! │   Auth   │   HTTP    │   Paginate    │   Frame   │  Output   │
//! ├──────────┼───────────┼───────────────┼───────────┼───────────┤
//! │ Env var  │ Retry     │ nonpaginated  │ Simplify  │ Arrow     │
//! │ Prompt   │ Rate Limit│ Query / Users │ Dates     │ Parquet   │
//! └──────────┴───────────┴───────────────┴───────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Token resolution
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Notion API client
pub mod client;

/// Notion page, property and user objects
pub mod model;

/// Cursor pagination flattening
pub mod pagination;

/// Pages and users to tables
pub mod frame;

/// Arrow/Parquet output
pub mod output;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use auth::{get_notion_token, NotionToken, TokenConfig};
pub use client::{get_notion_client, NotionClient, NotionClientConfig};
pub use frame::{
    database_to_dataframe, database_to_dataframe_with_options, users_to_dataframe, Cell,
    ColumnKey, DateHandler, FrameOptions, Table,
};
pub use output::{write_table_to_parquet, ParquetWriterConfig};
pub use pagination::{nonpaginated, PaginatedEndpoint};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
