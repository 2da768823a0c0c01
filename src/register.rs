//! Check-in/check-out register service.
//!
//! [`Registry`] owns the three live structures (person directory, visit
//! ledger, presence index) and is the only code that mutates them. Commands
//! validate first and mutate after: a rejected command leaves all three
//! structures exactly as they were. Every successful mutation is followed by
//! a best-effort snapshot save.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

use crate::snapshot::Snapshot;
use crate::store::SnapshotStore;
use crate::types::{Person, PersonId, VisitRecord};
use crate::view::{self, FilterMode};

/// Error type for register commands.
///
/// Display texts double as the operator-facing status messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Command issued with an empty identifier.
    #[error("an identifier is required")]
    EmptyIdentifier,
    /// Check-in for an identifier that already has an open visit.
    #[error("{person} is already inside")]
    AlreadyInside {
        /// The person currently inside, as stored in the directory. The
        /// rejected command's name and phone are discarded.
        person: Person,
    },
    /// Check-out for an identifier with no open visit.
    #[error("no one with identifier {id} is currently inside")]
    NotInside {
        /// The identifier that had no open visit.
        id: PersonId,
    },
}

/// Directory, ledger, and presence index, mutated as one unit.
#[derive(Debug, Clone, Default)]
pub(crate) struct RegisterState {
    /// Every person ever checked in, keyed by identifier. Last write wins.
    pub(crate) directory: BTreeMap<PersonId, Person>,
    /// Append-only visit history.
    pub(crate) ledger: Vec<VisitRecord>,
    /// Identifier of each person currently inside, mapped to the ledger
    /// slot of their open visit. Slots stay valid because the ledger never
    /// shrinks or reorders.
    pub(crate) presence: BTreeMap<PersonId, usize>,
}

/// The check-in/check-out register.
///
/// Invariants held across every command:
/// - an identifier has at most one open visit
/// - the ledger only grows; a row changes once, when its exit is recorded
/// - the presence index holds exactly the identifiers whose latest visit
///   is open
#[derive(Debug)]
pub struct Registry<S: SnapshotStore> {
    state: RegisterState,
    store: S,
}

impl<S: SnapshotStore> Registry<S> {
    /// Create an empty register backed by `store`, without loading.
    pub fn new(store: S) -> Self {
        Self {
            state: RegisterState::default(),
            store,
        }
    }

    /// Open a register backed by `store`, loading the last saved snapshot.
    ///
    /// A store with nothing saved starts empty. An unreadable or malformed
    /// snapshot is logged and discarded, never partially applied.
    pub fn open(mut store: S) -> Self {
        let snapshot = match store.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::info!("No snapshot found, starting with empty state");
                Snapshot::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable snapshot, starting with empty state");
                Snapshot::default()
            }
        };
        Self::from_snapshot(snapshot, store)
    }

    /// Build a register from `snapshot`, rebuilding the presence index.
    ///
    /// The snapshot's people and visits replace any previous state
    /// wholesale. Presence is derived by scanning the ledger for open rows;
    /// if a hand-edited snapshot holds several open rows for one
    /// identifier, the last row wins.
    pub fn from_snapshot(snapshot: Snapshot, store: S) -> Self {
        let mut presence = BTreeMap::new();
        for (slot, visit) in snapshot.registry.iter().enumerate() {
            if visit.is_open() {
                presence.insert(visit.person_id.clone(), slot);
            }
        }
        Self {
            state: RegisterState {
                directory: snapshot.people,
                ledger: snapshot.registry,
                presence,
            },
            store,
        }
    }

    /// Record an entry for `id`, upserting the person's directory details.
    ///
    /// The directory is only written when the check-in is accepted: a
    /// rejected duplicate discards the submitted name and phone along with
    /// the command.
    pub fn check_in(&mut self, id: &str, name: &str, phone: &str) -> Result<Person, RegistryError> {
        if id.is_empty() {
            return Err(RegistryError::EmptyIdentifier);
        }
        if self.state.presence.contains_key(id) {
            return Err(RegistryError::AlreadyInside {
                person: self.stored_person(id),
            });
        }

        let person_id = PersonId::new(id);
        let person = Person::new(person_id.clone(), name, phone);
        self.state.directory.insert(person_id.clone(), person.clone());
        self.state
            .ledger
            .push(VisitRecord::open(person_id.clone(), Local::now()));
        self.state.presence.insert(person_id, self.state.ledger.len() - 1);
        self.flush();
        Ok(person)
    }

    /// Record the exit for `id`'s open visit.
    ///
    /// Closes the ledger row the presence index points at, leaving its
    /// entry timestamp untouched, and clears the identifier from presence.
    pub fn check_out(&mut self, id: &str) -> Result<Person, RegistryError> {
        if id.is_empty() {
            return Err(RegistryError::EmptyIdentifier);
        }
        let slot = match self.state.presence.get(id) {
            Some(&slot) => slot,
            None => {
                return Err(RegistryError::NotInside {
                    id: PersonId::new(id),
                })
            }
        };

        if let Some(visit) = self.state.ledger.get_mut(slot) {
            visit.close(Local::now());
        }
        self.state.presence.remove(id);
        self.flush();
        Ok(self.stored_person(id))
    }

    /// Render the view selected by `mode` against the current state.
    ///
    /// Views are pure reads; call again to refresh.
    pub fn render(&self, mode: FilterMode) -> Vec<String> {
        self.render_at(mode, Local::now())
    }

    /// Render `mode` as of the instant `now`.
    ///
    /// The time-windowed modes compare strictly against their cutoff, so a
    /// visit stamped exactly one hour ago (or exactly at midnight) is
    /// excluded. Exposed so callers and tests can pin the clock.
    pub fn render_at(&self, mode: FilterMode, now: DateTime<Local>) -> Vec<String> {
        view::render(&self.state, mode, now)
    }

    /// Persist the current state, best-effort.
    ///
    /// A failed save is logged and not retried; the in-memory state stays
    /// authoritative either way. Called after every successful command, and
    /// once more by shells before exit.
    pub fn flush(&mut self) {
        let snapshot = self.snapshot();
        match self.store.save(&snapshot) {
            Ok(()) => {
                tracing::debug!(fingerprint = %snapshot.fingerprint(), "Snapshot saved");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Snapshot save failed, keeping in-memory state");
            }
        }
    }

    /// Whether `id` currently has an open visit.
    pub fn is_inside(&self, id: &str) -> bool {
        self.state.presence.contains_key(id)
    }

    /// Number of people currently inside.
    pub fn inside_count(&self) -> usize {
        self.state.presence.len()
    }

    /// Number of visits ever recorded, open or closed.
    pub fn visit_count(&self) -> usize {
        self.state.ledger.len()
    }

    /// Number of people known to the directory.
    pub fn person_count(&self) -> usize {
        self.state.directory.len()
    }

    /// Directory entry for `id`, if one exists.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.state.directory.get(id)
    }

    /// Copy of the current state in its persisted shape.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.state.directory.clone(), self.state.ledger.clone())
    }

    /// The persistence backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Directory entry for `id`, or an empty-name placeholder when the
    /// directory has no record of it.
    fn stored_person(&self, id: &str) -> Person {
        self.state
            .directory
            .get(id)
            .cloned()
            .unwrap_or_else(|| Person::new(id, "", ""))
    }
}
