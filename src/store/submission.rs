//! Stored submission record

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Raw field map as submitted by a client
pub type SubmissionData = Map<String, Value>;

/// One stored instance of form data.
///
/// `id` and `created_at` are assigned once at creation and never change;
/// only `data` is replaced on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub data: SubmissionData,
    #[serde(with = "millis_rfc3339")]
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Creates a record with a fresh random id.
    pub fn new(data: SubmissionData, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            data,
            created_at,
        }
    }
}

/// `createdAt` on the wire: RFC 3339 UTC with millisecond precision,
/// e.g. `2024-03-01T09:30:00.000Z`.
mod millis_rfc3339 {
    use super::*;

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
