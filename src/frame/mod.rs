//! Frame module
//!
//! Turns Notion pages and users into a [`Table`].
//!
//! # Overview
//!
//! Each page property is simplified to a [`Cell`]. Date properties keep both
//! ends and are laid out by a [`DateHandler`]:
//!
//! - `ignore_end`: one column with the start
//! - `mangle`: `{name}_start` and `{name}_end`
//! - `multiindex`: `(name, "start")` and `(name, "end")`, with every other
//!   column keyed `(name, "")`
//!
//! # Example
//!
//! ```no_run
//! use notion_frames::{database_to_dataframe, get_notion_client};
//!
//! # async fn run() -> notion_frames::Result<()> {
//! let client = get_notion_client(None)?;
//! let table = database_to_dataframe(&client, "0123456789abcdef0123456789abcdef", "mangle", None).await?;
//! println!("{} rows", table.num_rows());
//! # Ok(())
//! # }
//! ```

mod cell;
mod convert;
mod options;
mod simplify;
mod table;

pub use cell::Cell;
pub use convert::{
    database_to_dataframe, database_to_dataframe_with_options, page_to_record,
    pages_to_dataframe, query_to_dataframe, user_list_to_dataframe, users_to_dataframe,
    users_to_table, PAGE_METADATA_COLUMNS, USER_COLUMNS,
};
pub use options::{DateHandler, DateHandlers, FrameOptions, MappingOptions, DEFAULT_HANDLER_LABEL};
pub use simplify::{simplify, Simplified};
pub use table::{ColumnKey, Record, Table};

#[cfg(test)]
mod tests;
