//! Typed page property values
//!
//! Notion encodes every property as `{"type": <kind>, <kind>: <payload>}`.
//! Parsing never fails: a kind this crate does not model, or a payload that
//! does not match its declared kind, becomes [`PropertyValue::Other`].

use crate::types::JsonValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One fragment of rich text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// Option of a select, status or multi-select property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Date or date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// User reference embedded in people / created_by / last_edited_by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Reference to another page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReference {
    pub id: String,
}

/// Hosted or external file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file: Option<FileUrl>,
    #[serde(default)]
    pub external: Option<FileUrl>,
}

impl FileObject {
    /// URL of the file, whichever way it is hosted
    pub fn url(&self) -> Option<&str> {
        self.file
            .as_ref()
            .or(self.external.as_ref())
            .map(|f| f.url.as_str())
    }
}

/// URL wrapper used by file objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUrl {
    pub url: String,
}

/// Auto-incrementing identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueId {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub number: Option<i64>,
}

/// Result of a formula property
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    String(Option<String>),
    Number(Option<serde_json::Number>),
    Boolean(Option<bool>),
    Date(Option<DateValue>),
    Other { kind: String, raw: JsonValue },
}

/// Result of a rollup property
#[derive(Debug, Clone, PartialEq)]
pub enum RollupValue {
    Number(Option<serde_json::Number>),
    Date(Option<DateValue>),
    Array(Vec<PropertyValue>),
    Other { kind: String, raw: JsonValue },
}

/// A typed page property value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Number(Option<serde_json::Number>),
    Select(Option<SelectOption>),
    Status(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Checkbox(bool),
    Date(Option<DateValue>),
    People(Vec<PartialUser>),
    Relation(Vec<PageReference>),
    Files(Vec<FileObject>),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    CreatedTime(String),
    LastEditedTime(String),
    CreatedBy(PartialUser),
    LastEditedBy(PartialUser),
    Formula(FormulaValue),
    Rollup(RollupValue),
    UniqueId(UniqueId),
    /// The property exists but its payload is null
    Empty { kind: String },
    /// Unmodelled kind or unexpected payload, kept verbatim
    Other { kind: String, raw: JsonValue },
}

impl PropertyValue {
    /// Parse a raw `{"type": ..., <type>: ...}` property object
    pub fn from_json(value: &JsonValue) -> Self {
        let Some((kind, payload)) = split_tagged(value) else {
            return Self::Other {
                kind: "unknown".to_string(),
                raw: value.clone(),
            };
        };

        if payload.is_null() {
            return match kind {
                "date" => Self::Date(None),
                "number" => Self::Number(None),
                "select" => Self::Select(None),
                "status" => Self::Status(None),
                "url" => Self::Url(None),
                "email" => Self::Email(None),
                "phone_number" => Self::PhoneNumber(None),
                _ => Self::Empty {
                    kind: kind.to_string(),
                },
            };
        }

        let parsed = match kind {
            "title" => decode(payload).map(Self::Title),
            "rich_text" => decode(payload).map(Self::RichText),
            "number" => decode(payload).map(Self::Number),
            "select" => decode(payload).map(Self::Select),
            "status" => decode(payload).map(Self::Status),
            "multi_select" => decode(payload).map(Self::MultiSelect),
            "checkbox" => decode(payload).map(Self::Checkbox),
            "date" => decode(payload).map(Self::Date),
            "people" => decode(payload).map(Self::People),
            "relation" => decode(payload).map(Self::Relation),
            "files" => decode(payload).map(Self::Files),
            "url" => decode(payload).map(Self::Url),
            "email" => decode(payload).map(Self::Email),
            "phone_number" => decode(payload).map(Self::PhoneNumber),
            "created_time" => decode(payload).map(Self::CreatedTime),
            "last_edited_time" => decode(payload).map(Self::LastEditedTime),
            "created_by" => decode(payload).map(Self::CreatedBy),
            "last_edited_by" => decode(payload).map(Self::LastEditedBy),
            "formula" => Some(Self::Formula(FormulaValue::from_json(payload))),
            "rollup" => Some(Self::Rollup(RollupValue::from_json(payload))),
            "unique_id" => decode(payload).map(Self::UniqueId),
            _ => None,
        };

        parsed.unwrap_or_else(|| Self::Other {
            kind: kind.to_string(),
            raw: payload.clone(),
        })
    }

    /// Notion type name of this value
    pub fn kind(&self) -> &str {
        match self {
            Self::Title(_) => "title",
            Self::RichText(_) => "rich_text",
            Self::Number(_) => "number",
            Self::Select(_) => "select",
            Self::Status(_) => "status",
            Self::MultiSelect(_) => "multi_select",
            Self::Checkbox(_) => "checkbox",
            Self::Date(_) => "date",
            Self::People(_) => "people",
            Self::Relation(_) => "relation",
            Self::Files(_) => "files",
            Self::Url(_) => "url",
            Self::Email(_) => "email",
            Self::PhoneNumber(_) => "phone_number",
            Self::CreatedTime(_) => "created_time",
            Self::LastEditedTime(_) => "last_edited_time",
            Self::CreatedBy(_) => "created_by",
            Self::LastEditedBy(_) => "last_edited_by",
            Self::Formula(_) => "formula",
            Self::Rollup(_) => "rollup",
            Self::UniqueId(_) => "unique_id",
            Self::Empty { kind } | Self::Other { kind, .. } => kind,
        }
    }
}

impl FormulaValue {
    fn from_json(value: &JsonValue) -> Self {
        let Some((kind, payload)) = split_tagged(value) else {
            return Self::Other {
                kind: "unknown".to_string(),
                raw: value.clone(),
            };
        };

        let parsed = match kind {
            "string" => decode(payload).map(Self::String),
            "number" => decode(payload).map(Self::Number),
            "boolean" => decode(payload).map(Self::Boolean),
            "date" => decode(payload).map(Self::Date),
            _ => None,
        };

        parsed.unwrap_or_else(|| Self::Other {
            kind: kind.to_string(),
            raw: payload.clone(),
        })
    }
}

impl RollupValue {
    fn from_json(value: &JsonValue) -> Self {
        let Some((kind, payload)) = split_tagged(value) else {
            return Self::Other {
                kind: "unknown".to_string(),
                raw: value.clone(),
            };
        };

        let parsed = match kind {
            "number" => decode(payload).map(Self::Number),
            "date" => decode(payload).map(Self::Date),
            "array" => payload
                .as_array()
                .map(|items| Self::Array(items.iter().map(PropertyValue::from_json).collect())),
            _ => None,
        };

        parsed.unwrap_or_else(|| Self::Other {
            kind: kind.to_string(),
            raw: payload.clone(),
        })
    }
}

/// Split a tagged object into its type name and payload
fn split_tagged(value: &JsonValue) -> Option<(&str, &JsonValue)> {
    let kind = value.get("type")?.as_str()?;
    Some((kind, value.get(kind).unwrap_or(&JsonValue::Null)))
}

fn decode<T: DeserializeOwned>(payload: &JsonValue) -> Option<T> {
    T::deserialize(payload).ok()
}
