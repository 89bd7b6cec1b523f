//! Common types used throughout traewelling-export
//!
//! Raw records are kept exactly as the service returned them so the page
//! cache can round-trip them. The typed [`Status`] view is only built at
//! the output boundary.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One page of raw status records, in service order
pub type Page = Vec<StatusRecord>;

// ============================================================================
// Response envelopes
// ============================================================================

/// The `{"data": ...}` wrapper every API v1 response uses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Authenticated user, as returned by the identity endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

// ============================================================================
// Raw status record
// ============================================================================

/// A single check-in exactly as the service returned it.
///
/// Field order is preserved, which keeps cache entries byte-stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusRecord(JsonObject);

impl StatusRecord {
    /// Wrap a JSON object
    pub fn new(fields: JsonObject) -> Self {
        Self(fields)
    }

    /// Identifier used to compare cached and fresh pages
    pub fn id(&self) -> Option<&JsonValue> {
        self.0.get("id")
    }

    /// Identifier rendered for messages
    pub fn id_label(&self) -> String {
        match self.id() {
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "<no id>".to_string(),
        }
    }

    /// Look up a top-level field
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    /// Borrow the underlying object
    pub fn as_object(&self) -> &JsonObject {
        &self.0
    }

    /// Build the typed view, failing on any missing field
    pub fn to_status(&self) -> Result<Status> {
        serde_json::from_value(JsonValue::Object(self.0.clone()))
            .map_err(|e| Error::malformed_status(self.id_label(), e.to_string()))
    }
}

impl TryFrom<JsonValue> for StatusRecord {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(fields) => Ok(Self(fields)),
            other => Err(Error::malformed_status(
                "<unknown>",
                format!("expected a JSON object, got {other}"),
            )),
        }
    }
}

/// True when both pages have the same length and the same id at every position
pub fn same_ids(cached: &[StatusRecord], fresh: &[StatusRecord]) -> bool {
    cached.len() == fresh.len() && cached.iter().zip(fresh).all(|(c, f)| c.id() == f.id())
}

// ============================================================================
// Typed status
// ============================================================================

/// Nullable field that must still be present in the payload
fn required<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::deserialize(deserializer)
}

/// Typed check-in
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: u64,
    #[serde(deserialize_with = "required")]
    pub body: Option<String>,
    pub created_at: String,
    pub train: Trip,
    /// Optional associated event; `null` and absent both mean none
    #[serde(default)]
    pub event: Option<Event>,
}

/// The transport leg of a check-in
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub category: String,
    pub line_name: String,
    pub number: String,
    /// Meters
    pub distance: u64,
    /// Minutes
    pub duration: u64,
    pub origin: Departure,
    pub destination: Arrival,
}

/// Origin station with departure times
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    pub name: String,
    #[serde(deserialize_with = "required")]
    pub departure_planned: Option<String>,
    #[serde(deserialize_with = "required")]
    pub departure_real: Option<String>,
}

/// Destination station with arrival times
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrival {
    pub name: String,
    #[serde(deserialize_with = "required")]
    pub arrival_planned: Option<String>,
    #[serde(deserialize_with = "required")]
    pub arrival_real: Option<String>,
}

/// Event a check-in was attached to
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    pub name: String,
}
