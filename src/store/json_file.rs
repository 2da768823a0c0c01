//! JSON file snapshot store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::snapshot::Snapshot;
use crate::DEFAULT_SNAPSHOT_FILE;
use super::SnapshotStore;

/// Error type for the JSON file store.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read or written.
    #[error("snapshot file I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The snapshot content could not be encoded or decoded.
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Snapshot store backed by a single pretty-printed JSON file.
///
/// Saves overwrite the file in place; there is no atomic rename and no
/// write-ahead log. A crash mid-write can leave a torn file, which the next
/// load reports as an encoding error and the register discards.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    /// Store writing to [`DEFAULT_SNAPSHOT_FILE`] in the working directory.
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_FILE)
    }
}

impl SnapshotStore for JsonFileStore {
    type Error = SnapshotError;

    fn load(&mut self) -> Result<Option<Snapshot>, SnapshotError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            // A register that has never saved is a normal start, not an error.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_str(&raw)?;
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let encoded = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}
