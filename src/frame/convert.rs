//! Pages and users to tables

use super::cell::Cell;
use super::options::{DateHandler, FrameOptions, MappingOptions};
use super::simplify::{simplify, Simplified};
use super::table::{ColumnKey, Record, Table};
use crate::client::NotionClient;
use crate::error::Result;
use crate::model::{Page, User};
use crate::pagination::{nonpaginated, DatabaseQuery, PaginatedEndpoint, UserList};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// Metadata columns prepended when page metadata is enabled
pub const PAGE_METADATA_COLUMNS: [&str; 4] =
    ["_notion_id", "_created_time", "_last_edited_time", "_notion_url"];

/// Columns of the users table, in order
pub const USER_COLUMNS: [&str; 5] = ["id", "name", "email", "type", "avatar_url"];

/// Fetch every page of a database into a table
///
/// `default_date_handler` and `date_handlers` take `ignore_end`, `mangle`
/// or `multiindex`. Handler names are validated before the first request.
pub async fn database_to_dataframe(
    client: &NotionClient,
    database_id: &str,
    default_date_handler: &str,
    date_handlers: Option<&HashMap<String, String>>,
) -> Result<Table> {
    let mut options = FrameOptions::new().default_date_handler(default_date_handler);
    if let Some(overrides) = date_handlers {
        options.date_handlers = overrides.clone();
    }
    database_to_dataframe_with_options(client, database_id, &options).await
}

/// [`database_to_dataframe`] with full [`FrameOptions`]
pub async fn database_to_dataframe_with_options(
    client: &NotionClient,
    database_id: &str,
    options: &FrameOptions,
) -> Result<Table> {
    info!("Exporting database {}", database_id);
    query_to_dataframe(
        DatabaseQuery::new(client, database_id),
        options,
        client.page_wait(),
    )
    .await
}

/// Flatten any page-yielding endpoint into a table
pub async fn query_to_dataframe<E>(endpoint: E, options: &FrameOptions, wait: Duration) -> Result<Table>
where
    E: PaginatedEndpoint<Item = Page>,
{
    let mapping = options.resolve()?;
    let pages = nonpaginated(endpoint, wait).fetch_all().await?.results;
    let table = pages_to_dataframe(&pages, &mapping);

    info!(
        "Built table with {} rows and {} columns",
        table.num_rows(),
        table.num_columns()
    );
    Ok(table)
}

/// Map already-fetched pages to a table
pub fn pages_to_dataframe(pages: &[Page], options: &MappingOptions) -> Table {
    let records = pages.iter().map(|page| page_to_record(page, options)).collect();
    Table::from_records(records)
}

/// Map one page to keyed cells
pub fn page_to_record(page: &Page, options: &MappingOptions) -> Record {
    let mut record = Record::with_capacity(page.properties.len() + 4);

    if options.page_metadata {
        let [id, created, edited, url] = PAGE_METADATA_COLUMNS;
        record.push((ColumnKey::flat(id), Cell::text(&page.id)));
        record.push((
            ColumnKey::flat(created),
            Cell::opt_timestamp(page.created_time.as_deref()),
        ));
        record.push((
            ColumnKey::flat(edited),
            Cell::opt_timestamp(page.last_edited_time.as_deref()),
        ));
        record.push((ColumnKey::flat(url), Cell::opt_text(page.url.as_deref())));
    }

    for (name, value) in page.property_values() {
        match simplify(&value) {
            Simplified::Value(cell) => record.push((ColumnKey::flat(name), cell)),
            Simplified::DateRange { start, end } => {
                match options.date_handlers.handler_for(name) {
                    DateHandler::IgnoreEnd => record.push((ColumnKey::flat(name), start)),
                    DateHandler::Mangle => {
                        record.push((ColumnKey::flat(format!("{name}_start")), start));
                        record.push((ColumnKey::flat(format!("{name}_end")), end));
                    }
                    DateHandler::MultiIndex => {
                        record.push((ColumnKey::nested(name, "start"), start));
                        record.push((ColumnKey::nested(name, "end"), end));
                    }
                }
            }
        }
    }

    record
}

/// Fetch every workspace user into a table
///
/// Deleted users are not returned by the API and so never appear.
pub async fn users_to_dataframe(client: &NotionClient) -> Result<Table> {
    info!("Exporting workspace users");
    user_list_to_dataframe(UserList::new(client), client.page_wait()).await
}

/// Flatten any user-yielding endpoint into a table
pub async fn user_list_to_dataframe<E>(endpoint: E, wait: Duration) -> Result<Table>
where
    E: PaginatedEndpoint<Item = User>,
{
    let users = nonpaginated(endpoint, wait).fetch_all().await?.results;
    debug!("Fetched {} users", users.len());
    Ok(users_to_table(&users))
}

/// Map already-fetched users to a table
pub fn users_to_table(users: &[User]) -> Table {
    let [id, name, email, kind, avatar] = USER_COLUMNS;
    let mut table = Table::from_records(
        users
            .iter()
            .map(|user| {
                vec![
                    (ColumnKey::flat(id), Cell::text(&user.id)),
                    (ColumnKey::flat(name), Cell::opt_text(user.name.as_deref())),
                    (ColumnKey::flat(email), Cell::opt_text(user.email())),
                    (ColumnKey::flat(kind), Cell::opt_text(user.kind.as_deref())),
                    (ColumnKey::flat(avatar), Cell::opt_text(user.avatar_url.as_deref())),
                ]
            })
            .collect(),
    );
    if table.num_columns() == 0 {
        table = Table::with_columns(USER_COLUMNS.iter().map(|c| ColumnKey::flat(*c)).collect());
    }
    table
}
