//! Person types for the visit register.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a person, as entered at the desk.
///
/// Wraps the operator-entered document number (or any other string the desk
/// uses) verbatim. No normalization is applied: `" 123"` and `"123"` are two
/// different people. Implements `Ord` so directory and presence maps iterate
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Create a new PersonId from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// Lets `&str` keys look up `PersonId`-keyed maps without allocating.
impl Borrow<str> for PersonId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A person known to the register.
///
/// Directory entries are written last-write-wins: each successful check-in
/// overwrites the name and phone stored for the identifier. Field names
/// match the snapshot file layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Identifier the person checks in and out with.
    #[serde(rename = "ID")]
    pub id: PersonId,
    /// Display name. May be empty; never an error.
    #[serde(rename = "Name")]
    pub name: String,
    /// Contact phone. May be empty.
    #[serde(rename = "Phone")]
    pub phone: String,
}

impl Person {
    /// Create a new person record.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
