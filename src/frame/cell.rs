//! Table cell values

use crate::types::JsonValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

/// A simplified, table-ready value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    List(Vec<Cell>),
    /// Raw payload of a property kind that has no simplification
    Json(JsonValue),
}

impl Cell {
    /// Create a text cell
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Text cell, or null when absent
    pub fn opt_text(s: Option<&str>) -> Self {
        s.map_or(Self::Null, Self::text)
    }

    /// Parse a Notion timestamp
    ///
    /// Accepts RFC 3339 date-times, naive date-times and plain dates
    /// (midnight UTC). Anything else is kept as text.
    pub fn timestamp(s: &str) -> Self {
        Self::zoned_timestamp(s, None)
    }

    /// Parse a Notion timestamp that may be local to an IANA `time_zone`
    ///
    /// Strings with an explicit offset keep it. Offset-less strings are read
    /// as wall-clock time in `time_zone`, or UTC when the zone is absent or
    /// unknown.
    pub fn zoned_timestamp(s: &str, time_zone: Option<&str>) -> Self {
        let tz = time_zone.and_then(|name| name.parse::<Tz>().ok());
        parse_timestamp(s, tz).map_or_else(|| Self::text(s), Self::Timestamp)
    }

    /// Timestamp cell, or null when absent
    pub fn opt_timestamp(s: Option<&str>) -> Self {
        s.map_or(Self::Null, Self::timestamp)
    }

    /// Convert a JSON number, keeping integers integral
    pub fn number(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Self::Int(i)
        } else {
            n.as_f64().map_or(Self::Null, Self::Float)
        }
    }

    /// Check if this cell is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text content, if this is a text cell
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Timestamp content, if this is a timestamp cell
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// JSON rendering of the cell
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int(i) => JsonValue::from(*i),
            Self::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number)
            }
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Timestamp(t) => JsonValue::String(t.to_rfc3339()),
            Self::List(items) => JsonValue::Array(items.iter().map(Cell::to_json).collect()),
            Self::Json(v) => v.clone(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Timestamp(t) => f.write_str(&t.to_rfc3339()),
            Self::List(_) | Self::Json(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

fn parse_timestamp(s: &str, tz: Option<Tz>) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    match tz {
        // Skipped local times (DST gaps) fall back to UTC
        Some(tz) => tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| Some(naive.and_utc())),
        None => Some(naive.and_utc()),
    }
}
