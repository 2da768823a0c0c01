//! Command outcomes shaped for display surfaces.

use serde::{Deserialize, Serialize};

use crate::register::RegistryError;
use crate::types::Person;

/// Result of a check-in or check-out, flattened for shells that show a
/// status line instead of handling a typed error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the command applied.
    pub ok: bool,
    /// Operator-facing status line.
    pub message: String,
    /// The person recorded by a successful check-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
}

impl Outcome {
    /// Outcome of a check-in attempt.
    pub fn check_in(result: &Result<Person, RegistryError>) -> Self {
        match result {
            Ok(person) => Self {
                ok: true,
                message: format!("entry recorded: {}", person),
                person: Some(person.clone()),
            },
            Err(error) => Self::rejected(error),
        }
    }

    /// Outcome of a check-out attempt.
    pub fn check_out(result: &Result<Person, RegistryError>) -> Self {
        match result {
            Ok(person) => Self {
                ok: true,
                message: format!("exit recorded: {}", person),
                person: None,
            },
            Err(error) => Self::rejected(error),
        }
    }

    fn rejected(error: &RegistryError) -> Self {
        Self {
            ok: false,
            message: format!("error: {}", error),
            person: None,
        }
    }
}
