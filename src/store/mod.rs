//! Snapshot persistence backends.

pub mod json_file;
pub mod memory;

use crate::snapshot::Snapshot;

/// Trait for snapshot persistence backends.
///
/// A store holds at most one snapshot: every save replaces the previous one
/// wholesale, and load returns whatever was saved last. All methods are
/// synchronous; the register runs single-threaded.
pub trait SnapshotStore {
    /// Error type for store operations.
    type Error: std::error::Error;

    /// Load the most recently saved snapshot.
    ///
    /// `Ok(None)` means nothing has ever been saved, which callers treat as
    /// a normal empty start rather than a failure.
    fn load(&mut self) -> Result<Option<Snapshot>, Self::Error>;

    /// Persist `snapshot`, replacing any previous one.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

pub use json_file::{JsonFileStore, SnapshotError};
pub use memory::{MemorySnapshotStore, MemoryStoreError};
