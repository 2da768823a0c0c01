//! Visit ledger rows.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::PersonId;

/// One visit: an entry timestamp and, once the person has left, an exit.
///
/// Rows are appended to the ledger at check-in and never removed or
/// reordered. The only permitted mutation is recording the exit timestamp,
/// exactly once. Field names match the snapshot file layout; an open visit
/// is persisted with the zero-instant exit sentinel rather than a null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Identifier of the visiting person.
    #[serde(rename = "PersonID")]
    pub person_id: PersonId,
    /// When the person checked in (process wall clock).
    #[serde(rename = "TimestampIn")]
    pub timestamp_in: DateTime<Local>,
    /// When the person checked out, or `None` while still inside.
    #[serde(rename = "TimestampOut", with = "exit_instant", default)]
    pub timestamp_out: Option<DateTime<Local>>,
}

impl VisitRecord {
    /// Create an open visit entered at `timestamp_in`.
    pub fn open(person_id: PersonId, timestamp_in: DateTime<Local>) -> Self {
        Self {
            person_id,
            timestamp_in,
            timestamp_out: None,
        }
    }

    /// Create an already-closed visit (fixtures and snapshot assembly).
    pub fn closed(
        person_id: PersonId,
        timestamp_in: DateTime<Local>,
        timestamp_out: DateTime<Local>,
    ) -> Self {
        Self {
            person_id,
            timestamp_in,
            timestamp_out: Some(timestamp_out),
        }
    }

    /// Whether the person is still inside.
    pub fn is_open(&self) -> bool {
        self.timestamp_out.is_none()
    }

    /// Record the exit timestamp.
    pub fn close(&mut self, at: DateTime<Local>) {
        self.timestamp_out = Some(at);
    }
}

/// Serde codec for the exit timestamp.
///
/// The snapshot format has no null exits: a visit that is still open is
/// written as the zero instant `0001-01-01T00:00:00Z`, and that exact
/// instant reads back as "still inside".
mod exit_instant {
    use chrono::{DateTime, Local, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const ZERO_INSTANT_TEXT: &str = "0001-01-01T00:00:00Z";

    fn zero_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
            .single()
            .expect("the zero instant is a valid UTC datetime")
    }

    pub fn serialize<S>(value: &Option<DateTime<Local>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => ts.serialize(serializer),
            None => ZERO_INSTANT_TEXT.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let parsed = DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)?;
        if parsed == zero_instant() {
            Ok(None)
        } else {
            Ok(Some(parsed.with_timezone(&Local)))
        }
    }
}
