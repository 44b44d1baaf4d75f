//! Export a Notion database and the workspace users to Parquet
//!
//! ```text
//! NOTION_TOKEN=secret_... cargo run --example export_database -- <database-id-or-url> [out-dir] [date-handler]
//! ```
//!
//! `date-handler` is `ignore_end` (default), `mangle` or `multiindex`.

use notion_frames::{
    database_to_dataframe_with_options, get_notion_client, users_to_dataframe,
    write_table_to_parquet, Error, FrameOptions, Result,
};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let database_id = args
        .next()
        .ok_or_else(|| Error::config("usage: export_database <database-id> [out-dir] [date-handler]"))?;
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let handler = args.next().unwrap_or_else(|| "ignore_end".to_string());

    let options = FrameOptions::new()
        .default_date_handler(handler)
        .page_metadata(true);

    let client = get_notion_client(None)?;

    let table = database_to_dataframe_with_options(&client, &database_id, &options).await?;
    write_table_to_parquet(out_dir.join("database.parquet"), &table, None)?;

    let users = users_to_dataframe(&client).await?;
    write_table_to_parquet(out_dir.join("users.parquet"), &users, None)?;

    Ok(())
}
