//! Core types for the visit register.

pub mod outcome;
pub mod person;
pub mod visit;

pub use outcome::Outcome;
pub use person::{Person, PersonId};
pub use visit::VisitRecord;
