//! In-memory snapshot store for tests and persistence-free registers.

use crate::snapshot::Snapshot;
use super::SnapshotStore;

/// Error type for the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryStoreError {
    /// Save rejected because the store was switched into failing mode.
    #[error("in-memory store is refusing saves")]
    SavesDisabled,
}

/// Snapshot store that keeps the last saved snapshot in memory.
///
/// Used by tests to observe what the register persists and when, and by
/// callers that want a register without a file behind it. `fail_saves`
/// turns every save into an error so persistence-failure handling can be
/// exercised.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    saved: Option<Snapshot>,
    save_count: usize,
    fail_saves: bool,
}

impl MemorySnapshotStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with `snapshot`, as if it had been saved.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            saved: Some(snapshot),
            save_count: 0,
            fail_saves: false,
        }
    }

    /// The last snapshot saved, if any.
    pub fn saved(&self) -> Option<&Snapshot> {
        self.saved.as_ref()
    }

    /// How many saves have succeeded.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Make every subsequent save fail (or succeed again with `false`).
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }
}

impl SnapshotStore for MemorySnapshotStore {
    type Error = MemoryStoreError;

    fn load(&mut self) -> Result<Option<Snapshot>, MemoryStoreError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), MemoryStoreError> {
        if self.fail_saves {
            return Err(MemoryStoreError::SavesDisabled);
        }
        self.saved = Some(snapshot.clone());
        self.save_count += 1;
        Ok(())
    }
}
