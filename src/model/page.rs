//! Page and user objects

use super::property::PropertyValue;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// A page (database row) as returned by the query endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub last_edited_time: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub archived: bool,
    /// Raw property objects, in the order the API returned them
    #[serde(default)]
    pub properties: JsonObject,
}

impl Page {
    /// Iterate over the page's properties as typed values
    pub fn property_values(&self) -> impl Iterator<Item = (&str, PropertyValue)> + '_ {
        self.properties
            .iter()
            .map(|(name, raw)| (name.as_str(), PropertyValue::from_json(raw)))
    }
}

/// A workspace member or bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// `person` or `bot`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub bot: Option<JsonValue>,
}

impl User {
    /// Email address, only present for people
    pub fn email(&self) -> Option<&str> {
        self.person.as_ref().and_then(|p| p.email.as_deref())
    }
}

/// Person-specific user fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub email: Option<String>,
}
