//! Scenario tests for the visit register.
//!
//! These walk the register through operator-visible flows and check the
//! behavior contract: command validation order, presence bookkeeping, view
//! contents, and when snapshots get saved.

use visit_register::{
    FilterMode, MemorySnapshotStore, Outcome, Person, PersonId, Registry, RegistryError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn make_registry() -> Registry<MemorySnapshotStore> {
    Registry::new(MemorySnapshotStore::new())
}

/// Lines of `mode` as a set-like Vec for membership assertions.
fn lines(registry: &Registry<MemorySnapshotStore>, mode: FilterMode) -> Vec<String> {
    registry.render(mode)
}

// ─────────────────────────────────────────────────────────────────────────────
// CHECK-IN / CHECK-OUT FLOWS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_first_visit_flow() {
    let mut registry = make_registry();

    let person = registry.check_in("123", "Ana", "555-0100").unwrap();
    assert_eq!(person, Person::new("123", "Ana", "555-0100"));

    let inside = lines(&registry, FilterMode::CurrentlyInside);
    assert_eq!(inside.len(), 1);
    assert!(inside[0].contains("(123)"), "inside view must name 123: {:?}", inside);

    registry.check_out("123").unwrap();
    assert!(lines(&registry, FilterMode::CurrentlyInside).is_empty());

    let departures = lines(&registry, FilterMode::Departures);
    assert_eq!(departures.len(), 1);
    assert!(departures[0].contains("out:"));
}

#[test]
fn test_check_out_before_any_check_in() {
    let mut registry = make_registry();
    assert_eq!(
        registry.check_out("123"),
        Err(RegistryError::NotInside {
            id: PersonId::new("123"),
        })
    );
    assert_eq!(registry.visit_count(), 0);
}

#[test]
fn test_duplicate_check_in_leaves_everything_unchanged() {
    let mut registry = make_registry();
    registry.check_in("77", "Bob", "111").unwrap();
    let before = registry.snapshot();

    let err = registry.check_in("77", "Bobby", "222").unwrap_err();
    assert!(matches!(err, RegistryError::AlreadyInside { .. }));
    assert_eq!(err.to_string(), "Bob (77) is already inside");

    // Ledger, directory, and the saved snapshot are all untouched.
    assert_eq!(registry.snapshot(), before);
    assert_eq!(registry.store().save_count(), 1);
    assert_eq!(registry.store().saved(), Some(&before));
}

#[test]
fn test_identifiers_are_compared_verbatim() {
    let mut registry = make_registry();
    registry.check_in("123", "Ana", "").unwrap();

    // A padded variant is a different person, not a duplicate.
    registry.check_in(" 123", "Ana Again", "").unwrap();
    assert_eq!(registry.inside_count(), 2);
    assert!(registry.is_inside("123"));
    assert!(registry.is_inside(" 123"));
}

#[test]
fn test_empty_identifier_rejected_before_anything_else() {
    let mut registry = make_registry();
    assert_eq!(
        registry.check_in("", "Nameless", "555"),
        Err(RegistryError::EmptyIdentifier)
    );
    assert_eq!(registry.check_out(""), Err(RegistryError::EmptyIdentifier));
    assert_eq!(registry.person_count(), 0);
    assert_eq!(registry.store().save_count(), 0);
}

#[test]
fn test_name_and_phone_may_be_empty() {
    let mut registry = make_registry();
    registry.check_in("9", "", "").unwrap();
    assert!(registry.is_inside("9"));

    let inside = lines(&registry, FilterMode::CurrentlyInside);
    assert!(inside[0].starts_with(" (9) - in: "));
}

// ─────────────────────────────────────────────────────────────────────────────
// VIEWS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_render_is_idempotent() {
    let mut registry = make_registry();
    registry.check_in("1", "Ana", "").unwrap();
    registry.check_in("2", "Bruno", "").unwrap();
    registry.check_out("1").unwrap();

    for mode in [
        FilterMode::CurrentlyInside,
        FilterMode::AllVisitors,
        FilterMode::Departures,
        FilterMode::FullLog,
    ] {
        assert_eq!(lines(&registry, mode), lines(&registry, mode));
    }
}

#[test]
fn test_all_visitors_remembers_departed_people() {
    let mut registry = make_registry();
    registry.check_in("1", "Ana", "555-0100").unwrap();
    registry.check_in("2", "Bruno", "555-0200").unwrap();
    registry.check_out("1").unwrap();

    let visitors = lines(&registry, FilterMode::AllVisitors);
    assert_eq!(visitors.len(), 2);
    assert!(visitors.iter().any(|l| l.contains("Ana (1)")));
    assert!(visitors.iter().any(|l| l.contains("Bruno (2)")));
}

#[test]
fn test_full_log_keeps_insertion_order_across_reentries() {
    let mut registry = make_registry();
    registry.check_in("1", "Ana", "").unwrap();
    registry.check_out("1").unwrap();
    registry.check_in("2", "Bruno", "").unwrap();
    registry.check_in("1", "Ana", "").unwrap();

    let log = lines(&registry, FilterMode::FullLog);
    assert_eq!(log.len(), 3);
    assert!(log[0].contains("(1)"));
    assert!(log[1].contains("(2)"));
    assert!(log[2].contains("(1)"));
    // Only the first row is closed.
    assert!(log[0].contains("out:"));
    assert!(!log[2].contains("out:"));
}

#[test]
fn test_directory_update_renames_old_ledger_rows() {
    let mut registry = make_registry();
    registry.check_in("7", "Bia", "").unwrap();
    registry.check_out("7").unwrap();
    registry.check_in("7", "Beatriz", "").unwrap();

    // Rendered names come from the directory at render time, so the
    // closed first visit now shows the updated name.
    let log = lines(&registry, FilterMode::FullLog);
    assert!(log[0].contains("Beatriz (7)"));
    assert!(log[1].contains("Beatriz (7)"));
}

// ─────────────────────────────────────────────────────────────────────────────
// OUTCOME SURFACE
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_outcome_messages_for_a_full_cycle() {
    let mut registry = make_registry();

    let entry = Outcome::check_in(&registry.check_in("123", "Ana", "555"));
    assert!(entry.ok);
    assert_eq!(entry.message, "entry recorded: Ana (123)");

    let duplicate = Outcome::check_in(&registry.check_in("123", "Other", "999"));
    assert!(!duplicate.ok);
    assert_eq!(duplicate.message, "error: Ana (123) is already inside");

    let exit = Outcome::check_out(&registry.check_out("123"));
    assert!(exit.ok);
    assert_eq!(exit.message, "exit recorded: Ana (123)");

    let missing = Outcome::check_out(&registry.check_out("123"));
    assert!(!missing.ok);
    assert_eq!(
        missing.message,
        "error: no one with identifier 123 is currently inside"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// PERSISTENCE BEHAVIOR
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_saves_follow_successful_commands_only() {
    let mut registry = make_registry();

    registry.check_in("1", "Ana", "").unwrap();
    registry.check_in("1", "Ana", "").unwrap_err();
    registry.check_out("2").unwrap_err();
    registry.check_out("1").unwrap();

    assert_eq!(registry.store().save_count(), 2);
}

#[test]
fn test_saved_snapshot_mirrors_live_state() {
    let mut registry = make_registry();
    registry.check_in("1", "Ana", "555").unwrap();
    registry.check_in("2", "Bruno", "").unwrap();
    registry.check_out("2").unwrap();

    let saved = registry.store().saved().unwrap();
    assert_eq!(saved, &registry.snapshot());
    assert_eq!(saved.fingerprint(), registry.snapshot().fingerprint());
}

#[test]
fn test_save_failure_is_silent_for_the_command() {
    let mut store = MemorySnapshotStore::new();
    store.fail_saves(true);
    let mut registry = Registry::new(store);

    // Both commands succeed even though every save fails.
    registry.check_in("1", "Ana", "").unwrap();
    registry.check_out("1").unwrap();
    assert_eq!(registry.visit_count(), 1);
    assert_eq!(registry.store().save_count(), 0);
}

#[test]
fn test_restart_round_trip_via_memory_store() {
    let mut registry = make_registry();
    registry.check_in("1", "Ana", "555").unwrap();
    registry.check_in("2", "Bruno", "").unwrap();
    registry.check_out("1").unwrap();

    // "Restart": open a new registry over the same store.
    let store = registry.store().clone();
    let reopened = Registry::open(store);

    assert_eq!(reopened.snapshot(), registry.snapshot());
    assert!(!reopened.is_inside("1"));
    assert!(reopened.is_inside("2"));
    assert_eq!(
        lines(&reopened, FilterMode::CurrentlyInside),
        lines(&registry, FilterMode::CurrentlyInside)
    );
}
