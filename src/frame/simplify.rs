//! Property simplification
//!
//! Reduces each typed property value to a single [`Cell`], except dates,
//! which keep both ends so the date handler can decide the layout.

use super::cell::Cell;
use crate::model::{DateValue, FormulaValue, PropertyValue, RichText, RollupValue};

/// A simplified property value
#[derive(Debug, Clone, PartialEq)]
pub enum Simplified {
    /// Any non-date value
    Value(Cell),
    /// A date property: start and end (either may be null)
    DateRange { start: Cell, end: Cell },
}

impl Simplified {
    /// Collapse to one cell, keeping only the start of a date range
    pub fn into_cell(self) -> Cell {
        match self {
            Self::Value(cell) => cell,
            Self::DateRange { start, .. } => start,
        }
    }
}

/// Simplify one property value
pub fn simplify(value: &PropertyValue) -> Simplified {
    let cell = match value {
        PropertyValue::Date(date) => return date_range(date.as_ref()),

        PropertyValue::Title(parts) | PropertyValue::RichText(parts) => {
            Cell::Text(join_text(parts))
        }
        PropertyValue::Number(n) => n.as_ref().map_or(Cell::Null, Cell::number),
        PropertyValue::Select(option) | PropertyValue::Status(option) => {
            Cell::opt_text(option.as_ref().map(|o| o.name.as_str()))
        }
        PropertyValue::MultiSelect(options) => {
            Cell::List(options.iter().map(|o| Cell::text(&o.name)).collect())
        }
        PropertyValue::Checkbox(b) => Cell::Bool(*b),
        PropertyValue::People(people) => Cell::List(
            people
                .iter()
                .filter_map(|p| p.name.as_deref())
                .map(Cell::text)
                .collect(),
        ),
        PropertyValue::Relation(pages) => {
            Cell::List(pages.iter().map(|p| Cell::text(&p.id)).collect())
        }
        PropertyValue::Files(files) => Cell::List(
            files
                .iter()
                .filter_map(|f| f.url())
                .map(Cell::text)
                .collect(),
        ),
        PropertyValue::Url(s) | PropertyValue::Email(s) | PropertyValue::PhoneNumber(s) => {
            Cell::opt_text(s.as_deref())
        }
        PropertyValue::CreatedTime(t) | PropertyValue::LastEditedTime(t) => Cell::timestamp(t),
        PropertyValue::CreatedBy(user) | PropertyValue::LastEditedBy(user) => {
            Cell::opt_text(user.name.as_deref())
        }
        PropertyValue::Formula(formula) => simplify_formula(formula),
        PropertyValue::Rollup(rollup) => simplify_rollup(rollup),
        PropertyValue::UniqueId(id) => match (&id.prefix, id.number) {
            (Some(prefix), Some(number)) => Cell::Text(format!("{prefix}-{number}")),
            (None, Some(number)) => Cell::Int(number),
            _ => Cell::Null,
        },
        PropertyValue::Empty { .. } => Cell::Null,
        PropertyValue::Other { raw, .. } => Cell::Json(raw.clone()),
    };
    Simplified::Value(cell)
}

fn date_range(date: Option<&DateValue>) -> Simplified {
    match date {
        Some(date) => {
            let tz = date.time_zone.as_deref();
            Simplified::DateRange {
                start: Cell::zoned_timestamp(&date.start, tz),
                end: date
                    .end
                    .as_deref()
                    .map_or(Cell::Null, |end| Cell::zoned_timestamp(end, tz)),
            }
        }
        None => Simplified::DateRange {
            start: Cell::Null,
            end: Cell::Null,
        },
    }
}

/// Trimmed fragments joined by single spaces
fn join_text(parts: &[RichText]) -> String {
    parts
        .iter()
        .map(|p| p.plain_text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

fn simplify_formula(formula: &FormulaValue) -> Cell {
    match formula {
        FormulaValue::String(s) => Cell::opt_text(s.as_deref()),
        FormulaValue::Number(n) => n.as_ref().map_or(Cell::Null, Cell::number),
        FormulaValue::Boolean(b) => b.map_or(Cell::Null, Cell::Bool),
        FormulaValue::Date(date) => date_range(date.as_ref()).into_cell(),
        FormulaValue::Other { raw, .. } => Cell::Json(raw.clone()),
    }
}

fn simplify_rollup(rollup: &RollupValue) -> Cell {
    match rollup {
        RollupValue::Number(n) => n.as_ref().map_or(Cell::Null, Cell::number),
        RollupValue::Date(date) => date_range(date.as_ref()).into_cell(),
        RollupValue::Array(items) => {
            Cell::List(items.iter().map(|v| simplify(v).into_cell()).collect())
        }
        RollupValue::Other { raw, .. } => Cell::Json(raw.clone()),
    }
}
