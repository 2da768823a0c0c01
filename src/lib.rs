//! # visit-register
//!
//! Desk check-in/check-out register with filtered views and JSON snapshot
//! persistence.
//!
//! The register answers three questions about a staffed entrance:
//!
//! > Who is inside **right now**? Who has **ever** visited? What happened,
//! > and **when**?
//!
//! ## Core Contract
//!
//! 1. A check-in opens exactly one visit per identifier; a second check-in
//!    for someone already inside is rejected without touching any state
//! 2. A check-out closes that visit by stamping its exit time, exactly once
//! 3. Every successful command is followed by a best-effort snapshot save;
//!    a failed save never fails the command
//!
//! ## Architecture
//!
//! ```text
//! check_in / check_out → Registry → Directory + Ledger + PresenceIndex
//!                            ↓                        ↓
//!                  SnapshotStore (JSON or Memory)   render(FilterMode)
//! ```
//!
//! ## State Guarantees
//!
//! - The ledger is append-only and keeps insertion order
//! - The presence index is derived state, rebuilt from the ledger on load
//!   and never persisted
//! - Identifiers are compared verbatim, with no trimming or case folding

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod register;
pub mod snapshot;
pub mod store;
pub mod types;
pub mod view;

// Re-exports
pub use register::{Registry, RegistryError};
pub use snapshot::Snapshot;
pub use store::{
    JsonFileStore, MemorySnapshotStore, MemoryStoreError, SnapshotError, SnapshotStore,
};
pub use types::{Outcome, Person, PersonId, VisitRecord};
pub use view::{FilterMode, TIME_FORMAT};

/// File name the default JSON store writes, relative to the working
/// directory of the process.
pub const DEFAULT_SNAPSHOT_FILE: &str = "register_data.json";
