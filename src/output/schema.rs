//! Arrow schema inference and table to Arrow conversion
//!
//! Column types are inferred from every cell in the column, so a column that
//! is null in most rows still gets the type of the rows that are set.

use crate::error::{Error, Result};
use crate::frame::{Cell, ColumnKey, Table};
use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int64Array, ListArray, NullArray, StringArray,
    StructArray, TimestampMicrosecondArray,
};
use arrow::buffer::{NullBuffer, OffsetBuffer};
use arrow::datatypes::{DataType, Field, FieldRef, Fields, Schema, TimeUnit};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use std::collections::HashSet;
use std::sync::Arc;

/// Timezone attached to every timestamp column
pub const TIMESTAMP_TZ: &str = "UTC";

/// Arrow type used for timestamp cells
pub fn timestamp_type() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, Some(Arc::from(TIMESTAMP_TZ)))
}

/// Child name for a plain column that shares its name with a struct group
pub const PLAIN_CHILD: &str = "value";

/// A top-level output field: a plain column or a group of two-level columns
enum Group<'a> {
    Plain(usize, &'a str),
    Nested(&'a str, Vec<(usize, &'a str)>),
}

/// Infer an Arrow schema for a table
///
/// Two-level columns `(name, sub)` with a non-empty `sub` are grouped into
/// one struct field per `name`; `(name, "")` is a plain field unless the
/// same name also has sub-columns, in which case it joins the struct as
/// [`PLAIN_CHILD`].
pub fn infer_table_schema(table: &Table) -> Schema {
    let fields: Vec<Field> = group_columns(table.columns())
        .iter()
        .map(|group| match group {
            Group::Plain(i, name) => Field::new(*name, column_type(table, *i), true),
            Group::Nested(name, children) => {
                Field::new(*name, DataType::Struct(child_fields(table, children)), true)
            }
        })
        .collect();
    Schema::new(fields)
}

/// Convert a table to an Arrow RecordBatch
pub fn table_to_record_batch(table: &Table) -> Result<RecordBatch> {
    let schema = Arc::new(infer_table_schema(table));
    let groups = group_columns(table.columns());

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(groups.len());
    for (group, field) in groups.iter().zip(schema.fields()) {
        let array = match (group, field.data_type()) {
            (Group::Plain(i, _), data_type) => build_array(&column_cells(table, *i), data_type)?,
            (Group::Nested(_, children), DataType::Struct(fields)) => {
                let arrays = children
                    .iter()
                    .zip(fields.iter())
                    .map(|((i, _), child)| {
                        build_array(&column_cells(table, *i), child.data_type())
                    })
                    .collect::<Result<Vec<_>>>()?;
                Arc::new(StructArray::try_new(fields.clone(), arrays, None)?) as ArrayRef
            }
            (Group::Nested(name, _), other) => {
                return Err(Error::output(format!(
                    "Column group '{name}' inferred as {other} instead of a struct"
                )))
            }
        };
        columns.push(array);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(table.num_rows()));
    Ok(RecordBatch::try_new_with_options(schema, columns, &options)?)
}

fn group_columns(columns: &[ColumnKey]) -> Vec<Group<'_>> {
    let grouped: HashSet<&str> = columns
        .iter()
        .filter_map(|key| match key {
            ColumnKey::Nested(name, sub) if !sub.is_empty() => Some(name.as_str()),
            _ => None,
        })
        .collect();

    let mut groups: Vec<Group<'_>> = Vec::new();
    for (i, key) in columns.iter().enumerate() {
        let name = key.name();
        if !grouped.contains(name) {
            groups.push(Group::Plain(i, name));
            continue;
        }

        let sub = match key {
            ColumnKey::Nested(_, sub) if !sub.is_empty() => sub.as_str(),
            _ => PLAIN_CHILD,
        };
        let existing = groups.iter_mut().find_map(|g| match g {
            Group::Nested(n, children) if *n == name => Some(children),
            _ => None,
        });
        match existing {
            Some(children) => children.push((i, sub)),
            None => groups.push(Group::Nested(name, vec![(i, sub)])),
        }
    }
    groups
}

fn child_fields(table: &Table, children: &[(usize, &str)]) -> Fields {
    children
        .iter()
        .map(|(i, sub)| Field::new(*sub, column_type(table, *i), true))
        .collect()
}

fn column_cells(table: &Table, index: usize) -> Vec<&Cell> {
    table.rows().iter().map(|row| &row[index]).collect()
}

fn column_type(table: &Table, index: usize) -> DataType {
    table
        .rows()
        .iter()
        .map(|row| infer_type(&row[index]))
        .fold(DataType::Null, |acc, t| merge_types(&acc, &t))
}

/// Infer Arrow DataType from a cell
fn infer_type(cell: &Cell) -> DataType {
    match cell {
        Cell::Null => DataType::Null,
        Cell::Bool(_) => DataType::Boolean,
        Cell::Int(_) => DataType::Int64,
        Cell::Float(_) => DataType::Float64,
        Cell::Text(_) | Cell::Json(_) => DataType::Utf8,
        Cell::Timestamp(_) => timestamp_type(),
        Cell::List(items) => {
            let item_type = items
                .iter()
                .map(infer_type)
                .fold(DataType::Null, |acc, t| merge_types(&acc, &t));
            list_type(item_type)
        }
    }
}

fn list_type(item_type: DataType) -> DataType {
    DataType::List(Arc::new(Field::new("item", item_type, true)))
}

/// Merge two data types into a compatible type
fn merge_types(type1: &DataType, type2: &DataType) -> DataType {
    match (type1, type2) {
        (a, b) if a == b => a.clone(),

        (DataType::Null, other) | (other, DataType::Null) => other.clone(),

        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }

        (DataType::List(a), DataType::List(b)) => {
            list_type(merge_types(a.data_type(), b.data_type()))
        }

        // Different types -> fall back to String
        _ => DataType::Utf8,
    }
}

/// Build an Arrow array from cells
fn build_array(values: &[&Cell], data_type: &DataType) -> Result<ArrayRef> {
    match data_type {
        DataType::Null => Ok(Arc::new(NullArray::new(values.len()))),

        DataType::Boolean => {
            let arr: BooleanArray = values
                .iter()
                .map(|v| match v {
                    Cell::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Ok(Arc::new(arr))
        }

        DataType::Int64 => {
            let arr: Int64Array = values
                .iter()
                .map(|v| match v {
                    Cell::Int(i) => Some(*i),
                    _ => None,
                })
                .collect();
            Ok(Arc::new(arr))
        }

        DataType::Float64 => {
            #[allow(clippy::cast_precision_loss)]
            let arr: Float64Array = values
                .iter()
                .map(|v| match v {
                    Cell::Float(f) => Some(*f),
                    Cell::Int(i) => Some(*i as f64),
                    _ => None,
                })
                .collect();
            Ok(Arc::new(arr))
        }

        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            let arr: TimestampMicrosecondArray = values
                .iter()
                .map(|v| v.as_timestamp().map(|t| t.timestamp_micros()))
                .collect();
            Ok(Arc::new(arr.with_timezone(TIMESTAMP_TZ)))
        }

        DataType::Utf8 => {
            let arr: StringArray = values
                .iter()
                .map(|v| (!v.is_null()).then(|| v.to_string()))
                .collect();
            Ok(Arc::new(arr))
        }

        DataType::List(field) => build_list_array(values, field),

        other => Err(Error::output(format!("Unsupported column type {other}"))),
    }
}

/// Build a list array; non-list cells become null entries
fn build_list_array(values: &[&Cell], field: &FieldRef) -> Result<ArrayRef> {
    let mut all_items: Vec<&Cell> = Vec::new();
    let mut offsets: Vec<i32> = vec![0];
    let mut validity: Vec<bool> = Vec::with_capacity(values.len());

    for value in values {
        if let Cell::List(items) = value {
            all_items.extend(items.iter());
            validity.push(true);
        } else {
            validity.push(false);
        }
        let offset = i32::try_from(all_items.len())
            .map_err(|_| Error::output("Array too large for i32 offset"))?;
        offsets.push(offset);
    }

    let items_array = build_array(&all_items, field.data_type())?;
    let offset_buffer = OffsetBuffer::new(offsets.into());

    let list_array = ListArray::try_new(
        Arc::clone(field),
        offset_buffer,
        items_array,
        Some(NullBuffer::from(validity)),
    )?;
    Ok(Arc::new(list_array))
}
