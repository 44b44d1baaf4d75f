//! Date handling options
//!
//! Handler names arrive as strings (from callers or config files) and are
//! validated once, up front, into [`DateHandler`] values.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Property label used in errors about the default handler
pub const DEFAULT_HANDLER_LABEL: &str = "<default>";

/// How a date-range property is laid out in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateHandler {
    /// One column holding the start; the end is dropped
    #[default]
    #[serde(rename = "ignore_end")]
    IgnoreEnd,
    /// Two columns, `{name}_start` and `{name}_end`
    #[serde(rename = "mangle")]
    Mangle,
    /// Two-level columns `(name, "start")` and `(name, "end")`
    #[serde(rename = "multiindex")]
    MultiIndex,
}

impl DateHandler {
    /// Name used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IgnoreEnd => "ignore_end",
            Self::Mangle => "mangle",
            Self::MultiIndex => "multiindex",
        }
    }

    /// Parse a handler name configured for `property`
    pub fn parse_for(property: &str, value: &str) -> Result<Self> {
        match value {
            "ignore_end" => Ok(Self::IgnoreEnd),
            "mangle" => Ok(Self::Mangle),
            "multiindex" => Ok(Self::MultiIndex),
            _ => Err(Error::invalid_date_handler(property, value)),
        }
    }
}

impl FromStr for DateHandler {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_for(DEFAULT_HANDLER_LABEL, s)
    }
}

impl fmt::Display for DateHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated date handling: a default plus per-property overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateHandlers {
    default: DateHandler,
    overrides: HashMap<String, DateHandler>,
}

impl DateHandlers {
    /// Create handlers with the given default and no overrides
    pub fn new(default: DateHandler) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Add a per-property override
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, handler: DateHandler) -> Self {
        self.overrides.insert(property.into(), handler);
        self
    }

    /// Validate handler names
    ///
    /// The default is checked first, then overrides in property-name order,
    /// so the reported error is deterministic.
    pub fn parse(default: &str, overrides: Option<&HashMap<String, String>>) -> Result<Self> {
        let default = DateHandler::parse_for(DEFAULT_HANDLER_LABEL, default)?;
        let mut handlers = Self::new(default);

        if let Some(overrides) = overrides {
            let sorted: BTreeMap<_, _> = overrides.iter().collect();
            for (property, value) in sorted {
                let handler = DateHandler::parse_for(property, value)?;
                handlers.overrides.insert(property.clone(), handler);
            }
        }

        Ok(handlers)
    }

    /// Default handler
    pub fn default_handler(&self) -> DateHandler {
        self.default
    }

    /// Handler for `property`
    pub fn handler_for(&self, property: &str) -> DateHandler {
        self.overrides.get(property).copied().unwrap_or(self.default)
    }
}

/// Unvalidated table-building options
///
/// Deserializable so it can come straight from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameOptions {
    /// Handler for date properties without an override
    pub default_date_handler: String,
    /// Per-property handler names
    pub date_handlers: HashMap<String, String>,
    /// Prepend `_notion_id`, `_created_time`, `_last_edited_time`, `_notion_url`
    pub page_metadata: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            default_date_handler: DateHandler::default().as_str().to_string(),
            date_handlers: HashMap::new(),
            page_metadata: false,
        }
    }
}

impl FrameOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default date handler name
    #[must_use]
    pub fn default_date_handler(mut self, name: impl Into<String>) -> Self {
        self.default_date_handler = name.into();
        self
    }

    /// Set the handler name for one property
    #[must_use]
    pub fn date_handler(mut self, property: impl Into<String>, name: impl Into<String>) -> Self {
        self.date_handlers.insert(property.into(), name.into());
        self
    }

    /// Include page metadata columns
    #[must_use]
    pub fn page_metadata(mut self, enabled: bool) -> Self {
        self.page_metadata = enabled;
        self
    }

    /// Validate into [`MappingOptions`]
    pub fn resolve(&self) -> Result<MappingOptions> {
        Ok(MappingOptions {
            date_handlers: DateHandlers::parse(
                &self.default_date_handler,
                Some(&self.date_handlers),
            )?,
            page_metadata: self.page_metadata,
        })
    }
}

/// Validated options used while mapping pages to rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOptions {
    pub date_handlers: DateHandlers,
    pub page_metadata: bool,
}

impl MappingOptions {
    /// Options with the given date handlers and no metadata columns
    pub fn new(date_handlers: DateHandlers) -> Self {
        Self {
            date_handlers,
            page_metadata: false,
        }
    }
}
