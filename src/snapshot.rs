//! Persisted snapshot of the register state.
//!
//! A snapshot carries the person directory and the visit ledger and nothing
//! else. The presence index is deliberately absent: it is derived state,
//! rebuilt from the ledger every time a snapshot is loaded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh64::xxh64;

use crate::types::{Person, PersonId, VisitRecord};

/// Full register state in its on-disk shape.
///
/// Serializes to the snapshot file layout:
///
/// ```json
/// {
///   "people": {
///     "123": { "ID": "123", "Name": "Ana", "Phone": "555-0100" }
///   },
///   "registry": [
///     {
///       "PersonID": "123",
///       "TimestampIn": "2026-03-10T09:30:00-03:00",
///       "TimestampOut": "0001-01-01T00:00:00Z"
///     }
///   ]
/// }
/// ```
///
/// Both fields default when missing so a hand-trimmed file still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Every person ever checked in, keyed by identifier.
    #[serde(default)]
    pub people: BTreeMap<PersonId, Person>,
    /// Every visit ever recorded, in insertion order.
    #[serde(default)]
    pub registry: Vec<VisitRecord>,
}

impl Snapshot {
    /// Create a snapshot from a directory and a ledger.
    pub fn new(people: BTreeMap<PersonId, Person>, registry: Vec<VisitRecord>) -> Self {
        Self { people, registry }
    }

    /// Whether the snapshot holds no people and no visits.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.registry.is_empty()
    }

    /// Stable fingerprint of the snapshot content.
    ///
    /// Hashes the canonical JSON bytes with xxh64. Two snapshots with equal
    /// people and visits fingerprint identically, so a save/load round trip
    /// can be checked without a field-by-field comparison.
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(self).expect("snapshot serializes to JSON");
        format!("{:016x}", xxh64(&bytes, 0))
    }
}
