//! Output module
//!
//! Converts a [`Table`](crate::frame::Table) to an Arrow RecordBatch and
//! writes Parquet files.
//!
//! # Overview
//!
//! - Column types are inferred per column from its cells
//! - Timestamps become `Timestamp(Microsecond, "UTC")`
//! - Two-level date columns become one struct field per property

mod schema;
mod writer;

pub use schema::{
    infer_table_schema, table_to_record_batch, timestamp_type, PLAIN_CHILD, TIMESTAMP_TZ,
};
pub use writer::{
    write_batch_to_parquet, write_table_to_parquet, ParquetCompression, ParquetWriterConfig,
};
