//! Tests for frame module

use super::*;
use crate::error::{Error, Result};
use crate::model::{Page, PropertyValue, User};
use crate::pagination::{ListResponse, PaginatedEndpoint};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use test_case::test_case;

/// Endpoint serving fixed batches and counting calls
struct StubEndpoint<T> {
    batches: Vec<Vec<T>>,
    calls: AtomicUsize,
}

impl<T> StubEndpoint<T> {
    fn new(batches: Vec<Vec<T>>) -> Self {
        Self {
            batches,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> PaginatedEndpoint for StubEndpoint<T> {
    type Item = T;

    async fn fetch(&self, start_cursor: Option<&str>) -> Result<ListResponse<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let index: usize = start_cursor.map_or(0, |c| c.parse().unwrap_or(0));
        let results = self.batches.get(index).cloned().unwrap_or_default();
        if index + 1 < self.batches.len() {
            Ok(ListResponse::partial(results, (index + 1).to_string()))
        } else {
            Ok(ListResponse::complete(results))
        }
    }
}

fn page(id: &str, properties: Value) -> Page {
    serde_json::from_value(json!({
        "object": "page",
        "id": id,
        "created_time": "2024-01-02T03:04:05.000Z",
        "last_edited_time": "2024-01-03T00:00:00.000Z",
        "url": format!("https://www.notion.so/{id}"),
        "properties": properties
    }))
    .unwrap()
}

fn title(text: &str) -> Value {
    json!({"id": "title", "type": "title", "title": [{"plain_text": text}]})
}

fn date(start: &str, end: Option<&str>) -> Value {
    json!({"id": "d", "type": "date", "date": {"start": start, "end": end, "time_zone": null}})
}

fn number(n: Value) -> Value {
    json!({"id": "n", "type": "number", "number": n})
}

fn ts(y: i32, m: u32, d: u32) -> Cell {
    Cell::Timestamp(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
}

fn keys(table: &Table) -> Vec<String> {
    table.columns().iter().map(ToString::to_string).collect()
}

fn event_pages() -> Vec<Page> {
    vec![
        page(
            "p1",
            json!({
                "Name": title("Launch"),
                "When": date("2024-03-01", Some("2024-03-05"))
            }),
        ),
        page(
            "p2",
            json!({
                "Name": title("Retro"),
                "When": date("2024-04-10", None)
            }),
        ),
    ]
}

fn mapping(default: &str) -> MappingOptions {
    FrameOptions::new()
        .default_date_handler(default)
        .resolve()
        .unwrap()
}

// ============================================================================
// Simplification Tests
// ============================================================================

fn simplified(raw: Value) -> Cell {
    simplify(&PropertyValue::from_json(&raw)).into_cell()
}

#[test]
fn test_simplify_text_trims_and_joins() {
    let raw = json!({"type": "rich_text", "rich_text": [
        {"plain_text": " Hello "},
        {"plain_text": "world\n"}
    ]});
    assert_eq!(simplified(raw), Cell::text("Hello world"));
    assert_eq!(simplified(json!({"type": "title", "title": []})), Cell::text(""));
}

#[test_case(json!(3), Cell::Int(3) ; "integer")]
#[test_case(json!(2.5), Cell::Float(2.5) ; "float")]
#[test_case(json!(null), Cell::Null ; "null")]
fn test_simplify_number(n: Value, expected: Cell) {
    assert_eq!(simplified(number(n)), expected);
}

#[test]
fn test_simplify_choices() {
    assert_eq!(
        simplified(json!({"type": "select", "select": {"name": "High", "color": "red"}})),
        Cell::text("High")
    );
    assert_eq!(simplified(json!({"type": "select", "select": null})), Cell::Null);
    assert_eq!(
        simplified(json!({"type": "status", "status": {"name": "Done"}})),
        Cell::text("Done")
    );
    assert_eq!(
        simplified(json!({"type": "multi_select", "multi_select": [{"name": "a"}, {"name": "b"}]})),
        Cell::List(vec![Cell::text("a"), Cell::text("b")])
    );
    assert_eq!(
        simplified(json!({"type": "checkbox", "checkbox": true})),
        Cell::Bool(true)
    );
}

#[test]
fn test_simplify_references() {
    assert_eq!(
        simplified(json!({"type": "people", "people": [
            {"object": "user", "id": "u1", "name": "Ada"},
            {"object": "user", "id": "u2"}
        ]})),
        Cell::List(vec![Cell::text("Ada")])
    );
    assert_eq!(
        simplified(json!({"type": "relation", "relation": [{"id": "r1"}, {"id": "r2"}]})),
        Cell::List(vec![Cell::text("r1"), Cell::text("r2")])
    );
    assert_eq!(
        simplified(json!({"type": "files", "files": [
            {"name": "a.png", "type": "file", "file": {"url": "https://s3/a.png"}},
            {"name": "b", "type": "external", "external": {"url": "https://b.example"}}
        ]})),
        Cell::List(vec![Cell::text("https://s3/a.png"), Cell::text("https://b.example")])
    );
    assert_eq!(
        simplified(json!({"type": "created_by", "created_by": {"object": "user", "id": "u1", "name": "Ada"}})),
        Cell::text("Ada")
    );
}

#[test]
fn test_simplify_formula_and_rollup() {
    assert_eq!(
        simplified(json!({"type": "formula", "formula": {"type": "number", "number": 7}})),
        Cell::Int(7)
    );
    assert_eq!(
        simplified(json!({"type": "formula", "formula": {"type": "date", "date": {"start": "2024-03-01"}}})),
        ts(2024, 3, 1)
    );
    assert_eq!(
        simplified(json!({"type": "rollup", "rollup": {"type": "array", "function": "show_original", "array": [
            {"type": "title", "title": [{"plain_text": "x"}]},
            {"type": "date", "date": {"start": "2024-03-01", "end": "2024-03-02"}}
        ]}})),
        Cell::List(vec![Cell::text("x"), ts(2024, 3, 1)])
    );
}

#[test]
fn test_simplify_unique_id() {
    assert_eq!(
        simplified(json!({"type": "unique_id", "unique_id": {"prefix": "TASK", "number": 42}})),
        Cell::text("TASK-42")
    );
    assert_eq!(
        simplified(json!({"type": "unique_id", "unique_id": {"prefix": null, "number": 42}})),
        Cell::Int(42)
    );
}

#[test]
fn test_simplify_unknown_kind_passes_through() {
    let raw = json!({"type": "button", "button": {"label": "Go"}});
    assert_eq!(simplified(raw), Cell::Json(json!({"label": "Go"})));
}

#[test]
fn test_simplify_date_keeps_both_ends() {
    let value = PropertyValue::from_json(&date("2024-03-01", Some("2024-03-05")));
    assert_eq!(
        simplify(&value),
        Simplified::DateRange {
            start: ts(2024, 3, 1),
            end: ts(2024, 3, 5)
        }
    );

    let empty = PropertyValue::from_json(&json!({"type": "date", "date": null}));
    assert_eq!(
        simplify(&empty),
        Simplified::DateRange {
            start: Cell::Null,
            end: Cell::Null
        }
    );
}

// ============================================================================
// Date Handler Tests
// ============================================================================

#[test_case("ignore_end", DateHandler::IgnoreEnd)]
#[test_case("mangle", DateHandler::Mangle)]
#[test_case("multiindex", DateHandler::MultiIndex)]
fn test_date_handler_parse(name: &str, expected: DateHandler) {
    let parsed: DateHandler = name.parse().unwrap();
    assert_eq!(parsed, expected);
    assert_eq!(parsed.to_string(), name);
}

#[test]
fn test_invalid_default_handler_names_default() {
    let err = FrameOptions::new()
        .default_date_handler("bogus")
        .resolve()
        .unwrap_err();
    match err {
        Error::InvalidDateHandler { property, value } => {
            assert_eq!(property, DEFAULT_HANDLER_LABEL);
            assert_eq!(value, "bogus");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_invalid_override_names_property() {
    let err = FrameOptions::new()
        .date_handler("When", "mangle")
        .date_handler("Due", "bogus")
        .resolve()
        .unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("Due"));
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn test_frame_options_from_json() {
    let options: FrameOptions = serde_json::from_value(json!({
        "default_date_handler": "mangle",
        "date_handlers": {"When": "multiindex"}
    }))
    .unwrap();
    let resolved = options.resolve().unwrap();
    assert_eq!(resolved.date_handlers.default_handler(), DateHandler::Mangle);
    assert_eq!(resolved.date_handlers.handler_for("When"), DateHandler::MultiIndex);
    assert!(!resolved.page_metadata);
}

// ============================================================================
// Page Mapping Tests
// ============================================================================

#[test]
fn test_ignore_end_keeps_start_only() {
    let table = pages_to_dataframe(&event_pages(), &mapping("ignore_end"));

    assert_eq!(keys(&table), vec!["Name", "When"]);
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.get(0, &"When".into()), Some(&ts(2024, 3, 1)));
    assert_eq!(table.get(1, &"When".into()), Some(&ts(2024, 4, 10)));
}

#[test]
fn test_mangle_adds_start_and_end_columns() {
    let table = pages_to_dataframe(&event_pages(), &mapping("mangle"));

    assert_eq!(keys(&table), vec!["Name", "When_start", "When_end"]);
    assert_eq!(table.get(0, &"When_start".into()), Some(&ts(2024, 3, 1)));
    assert_eq!(table.get(0, &"When_end".into()), Some(&ts(2024, 3, 5)));
    assert_eq!(table.get(1, &"When_end".into()), Some(&Cell::Null));
}

#[test]
fn test_local_times_are_read_in_the_property_time_zone() {
    let zoned = json!({"id": "d", "type": "date", "date": {
        "start": "2024-03-01T10:00:00.000",
        "end": "2024-07-01T10:00:00.000",
        "time_zone": "America/New_York"
    }});
    let pages = vec![page("p1", json!({"When": zoned}))];

    let table = pages_to_dataframe(&pages, &mapping("mangle"));
    let est = Cell::Timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap());
    let edt = Cell::Timestamp(Utc.with_ymd_and_hms(2024, 7, 1, 14, 0, 0).unwrap());
    assert_eq!(table.get(0, &"When_start".into()), Some(&est));
    assert_eq!(table.get(0, &"When_end".into()), Some(&edt));
}

#[test]
fn test_explicit_offset_wins_over_time_zone() {
    let zoned = json!({"id": "d", "type": "date", "date": {
        "start": "2024-03-01T10:00:00.000+00:00",
        "end": null,
        "time_zone": "America/New_York"
    }});
    let pages = vec![page("p1", json!({"When": zoned}))];

    let table = pages_to_dataframe(&pages, &mapping("ignore_end"));
    let expected = Cell::Timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
    assert_eq!(table.get(0, &"When".into()), Some(&expected));
}

#[test]
fn test_multiindex_is_uniform() {
    let table = pages_to_dataframe(&event_pages(), &mapping("multiindex"));

    assert!(table.is_multiindex());
    assert!(table.columns().iter().all(ColumnKey::is_nested));
    assert_eq!(
        table.columns(),
        &[
            ColumnKey::nested("Name", ""),
            ColumnKey::nested("When", "start"),
            ColumnKey::nested("When", "end"),
        ]
    );
    assert_eq!(table.get(0, &("When", "end").into()), Some(&ts(2024, 3, 5)));
    assert_eq!(table.get(1, &("Name", "").into()), Some(&Cell::text("Retro")));
}

#[test]
fn test_per_property_override() {
    let pages = vec![page(
        "p1",
        json!({
            "Start": date("2024-03-01", Some("2024-03-02")),
            "Due": date("2024-05-01", Some("2024-05-03"))
        }),
    )];
    let options = FrameOptions::new()
        .default_date_handler("ignore_end")
        .date_handler("Due", "mangle")
        .resolve()
        .unwrap();

    let table = pages_to_dataframe(&pages, &options);
    assert_eq!(keys(&table), vec!["Start", "Due_start", "Due_end"]);
}

#[test]
fn test_columns_are_union_with_nulls() {
    let pages = vec![
        page("p1", json!({"A": number(json!(1)), "B": number(json!(2))})),
        page("p2", json!({"A": number(json!(3)), "C": number(json!(4))})),
    ];
    let table = pages_to_dataframe(&pages, &MappingOptions::default());

    assert_eq!(keys(&table), vec!["A", "B", "C"]);
    assert_eq!(table.row(0).unwrap(), &[Cell::Int(1), Cell::Int(2), Cell::Null]);
    assert_eq!(table.row(1).unwrap(), &[Cell::Int(3), Cell::Null, Cell::Int(4)]);
}

#[test]
fn test_rows_keep_input_order() {
    let pages: Vec<Page> = (0..5)
        .map(|i| page(&format!("p{i}"), json!({"Name": title(&format!("row {i}"))})))
        .collect();
    let table = pages_to_dataframe(&pages, &MappingOptions::default());

    let names: Vec<String> = table
        .column(&"Name".into())
        .unwrap()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, vec!["row 0", "row 1", "row 2", "row 3", "row 4"]);
}

#[test]
fn test_page_metadata_columns_come_first() {
    let options = FrameOptions::new().page_metadata(true).resolve().unwrap();
    let table = pages_to_dataframe(&event_pages(), &options);

    assert_eq!(
        keys(&table),
        vec![
            "_notion_id",
            "_created_time",
            "_last_edited_time",
            "_notion_url",
            "Name",
            "When"
        ]
    );
    assert_eq!(table.get(1, &"_notion_id".into()), Some(&Cell::text("p2")));
    assert_eq!(
        table.get(0, &"_created_time".into()),
        Some(&Cell::Timestamp(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()))
    );
}

#[test]
fn test_empty_pages_give_empty_table() {
    let table = pages_to_dataframe(&[], &MappingOptions::default());
    assert!(table.is_empty());
    assert_eq!(table.num_columns(), 0);
}

// ============================================================================
// Endpoint Flattening Tests
// ============================================================================

#[tokio::test]
async fn test_query_to_dataframe_flattens_all_pages() {
    let pages = event_pages();
    let endpoint = StubEndpoint::new(vec![vec![pages[0].clone()], vec![pages[1].clone()]]);

    let table = query_to_dataframe(&endpoint, &FrameOptions::new(), Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(table.num_rows(), 2);
    assert_eq!(endpoint.calls(), 2);
}

#[tokio::test]
async fn test_bogus_handler_fails_before_any_fetch() {
    let endpoint = StubEndpoint::new(vec![event_pages()]);
    let options = FrameOptions::new().date_handler("When", "bogus");

    let err = query_to_dataframe(&endpoint, &options, Duration::ZERO)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidDateHandler { .. }));
    assert_eq!(endpoint.calls(), 0);
}

// ============================================================================
// User Tests
// ============================================================================

fn user(id: &str, kind: &str, name: &str, email: Option<&str>) -> User {
    let mut raw = json!({"object": "user", "id": id, "type": kind, "name": name, "avatar_url": null});
    if let Some(email) = email {
        raw["person"] = json!({"email": email});
    } else {
        raw["bot"] = json!({});
    }
    serde_json::from_value(raw).unwrap()
}

#[test]
fn test_users_table_columns() {
    let users = vec![
        user("u1", "person", "Ada", Some("ada@example.com")),
        user("u2", "bot", "Importer", None),
    ];
    let table = users_to_table(&users);

    assert_eq!(keys(&table), USER_COLUMNS.to_vec());
    assert_eq!(
        table.row(0).unwrap(),
        &[
            Cell::text("u1"),
            Cell::text("Ada"),
            Cell::text("ada@example.com"),
            Cell::text("person"),
            Cell::Null
        ]
    );
    assert_eq!(table.get(1, &"email".into()), Some(&Cell::Null));
}

#[test]
fn test_empty_users_table_keeps_columns() {
    let table = users_to_table(&[]);
    assert!(table.is_empty());
    assert_eq!(keys(&table), USER_COLUMNS.to_vec());
}

#[tokio::test]
async fn test_deleted_user_is_simply_absent() {
    // A page references u3, which the user list no longer returns
    let endpoint = StubEndpoint::new(vec![
        vec![user("u1", "person", "Ada", Some("ada@example.com"))],
        vec![user("u2", "bot", "Importer", None)],
    ]);

    let table = user_list_to_dataframe(&endpoint, Duration::ZERO).await.unwrap();

    let ids: Vec<String> = table
        .column(&"id".into())
        .unwrap()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(ids, vec!["u1", "u2"]);
    assert!(!ids.contains(&"u3".to_string()));
}

#[test]
fn test_date_handlers_builder() {
    let handlers = DateHandlers::new(DateHandler::Mangle).with("When", DateHandler::MultiIndex);
    assert_eq!(handlers.handler_for("When"), DateHandler::MultiIndex);
    assert_eq!(handlers.handler_for("Other"), DateHandler::Mangle);

    let overrides: HashMap<String, String> = HashMap::new();
    let parsed = DateHandlers::parse("ignore_end", Some(&overrides)).unwrap();
    assert_eq!(parsed, DateHandlers::default());
}
