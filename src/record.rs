//! API records
//!
//! NCM APIv3 speaks JSON:API. A [`Record`] types the members every resource
//! object shares (`id`, `type`, `attributes`, `relationships`) and keeps
//! everything else in a flattened bag so nothing is lost on the way through.

use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One resource object returned by the API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Resource ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// JSON:API resource type (e.g. "users")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Resource attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<JsonObject>,

    /// Resource relationships
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<JsonObject>,

    /// Any other member the server sent (links, meta, ...)
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Record {
    /// Create an empty record of the given type
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    /// Set the ID
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Set a relationship
    #[must_use]
    pub fn with_relationship(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.set_relationship(name, value);
        self
    }

    /// Set an attribute in place
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.attributes
            .get_or_insert_with(JsonObject::new)
            .insert(key.into(), value.into());
    }

    /// Merge attributes in place, overwriting existing keys
    pub fn merge_attributes(&mut self, attributes: JsonObject) {
        let target = self.attributes.get_or_insert_with(JsonObject::new);
        for (key, value) in attributes {
            target.insert(key, value);
        }
    }

    /// Set a relationship in place
    pub fn set_relationship(&mut self, name: impl Into<String>, value: JsonValue) {
        self.relationships
            .get_or_insert_with(JsonObject::new)
            .insert(name.into(), value);
    }

    /// Look up an attribute
    pub fn attribute(&self, key: &str) -> Option<&JsonValue> {
        self.attributes.as_ref()?.get(key)
    }

    /// Look up a relationship
    pub fn relationship(&self, name: &str) -> Option<&JsonValue> {
        self.relationships.as_ref()?.get(name)
    }

    /// ID of a to-one relationship, or of the first entry of a to-many one
    pub fn relationship_id(&self, name: &str) -> Option<&str> {
        let data = self.relationship(name)?.get("data")?;
        let target = match data {
            JsonValue::Array(items) => items.first()?,
            other => other,
        };
        target.get("id")?.as_str()
    }

    /// Wrap the record as a request document, without its links
    pub fn to_document(&self) -> JsonValue {
        let mut record = self.clone();
        record.extra.remove("links");
        json!({ "data": record })
    }
}

/// Relationship payload builders
pub mod relationship {
    use crate::types::JsonValue;
    use serde_json::json;

    /// To-one relationship: `{"data": {"type": kind, "id": id}}`
    pub fn one(kind: &str, id: &str) -> JsonValue {
        json!({ "data": { "type": kind, "id": id } })
    }

    /// To-many relationship: `{"data": [{"type": kind, "id": id}, ...]}`
    pub fn many<I, S>(kind: &str, ids: I) -> JsonValue
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let data: Vec<JsonValue> = ids
            .into_iter()
            .map(|id| json!({ "type": kind, "id": id.as_ref() }))
            .collect();
        json!({ "data": data })
    }
}
