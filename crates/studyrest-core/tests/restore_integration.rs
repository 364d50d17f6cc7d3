//! Integration tests for saving and resuming sessions.
//!
//! A second controller built over the same slot must pick up exactly where
//! the first one stopped.

use studyrest_core::{
    Database, Event, MemoryStore, PersistedSnapshot, Phase, PlanController, SilentNotifier,
    SnapshotStore, Status,
};

type Controller<S> = PlanController<S, SilentNotifier>;

fn reopen(store: &MemoryStore) -> Controller<MemoryStore> {
    let mut c = PlanController::new(store.clone(), SilentNotifier);
    c.resume_saved();
    c
}

fn assert_same_session<A: SnapshotStore, B: SnapshotStore>(a: &Controller<A>, b: &Controller<B>) {
    assert_eq!(a.status(), b.status());
    assert_eq!(a.state(), b.state());
    assert_eq!(a.plan(), b.plan());
    assert_eq!(a.editor(), b.editor());
}

#[test]
fn test_round_trip_through_reachable_states() {
    let store = MemoryStore::new();
    let mut c = PlanController::new(store.clone(), SilentNotifier);

    c.start_plan(&[1.0, 0.0, 2.5]).unwrap();
    assert_same_session(&c, &reopen(&store));

    for _ in 0..17 {
        c.tick().unwrap();
    }
    assert_same_session(&c, &reopen(&store));

    c.skip().unwrap();
    c.tick().unwrap();
    c.pause().unwrap();
    c.tick().unwrap();
    assert_eq!(c.status(), Status::Running(Phase::Rest));
    assert_same_session(&c, &reopen(&store));

    c.resume().unwrap();
    c.skip().unwrap();
    assert_eq!(c.state().unwrap().current_index, 1);
    assert_same_session(&c, &reopen(&store));

    c.skip().unwrap();
    c.skip().unwrap();
    assert_eq!(c.status(), Status::Completed);
    assert_same_session(&c, &reopen(&store));
}

#[test]
fn test_restore_resumes_mid_phase_not_from_full_duration() {
    let store = MemoryStore::new();
    let mut c = PlanController::new(store.clone(), SilentNotifier);
    c.start_plan(&[1.0]).unwrap();
    for _ in 0..20 {
        c.tick().unwrap();
    }
    drop(c);

    let mut resumed = PlanController::new(store.clone(), SilentNotifier);
    let events = resumed.resume_saved();
    assert!(matches!(
        events[..],
        [Event::Restored {
            section_index: 0,
            phase: Phase::Study,
            remaining_secs: 40,
            paused: false,
            ..
        }]
    ));
    resumed.tick().unwrap();
    assert_eq!(resumed.state().unwrap().remaining_secs, 39);
}

#[test]
fn test_restore_keeps_pause() {
    let raw = r#"{"studyTimes":[1],"currentIndex":0,"remaining":30,"currentPhase":"rest","isPaused":true}"#;
    let store = MemoryStore::with_value(raw);
    let mut c = reopen(&store);
    assert_eq!(c.status(), Status::Running(Phase::Rest));
    for _ in 0..5 {
        c.tick().unwrap();
    }
    assert_eq!(c.state().unwrap().remaining_secs, 30);
    c.resume().unwrap();
    c.tick().unwrap();
    assert_eq!(c.state().unwrap().remaining_secs, 29);
}

#[test]
fn test_restore_rederives_sections_from_minutes() {
    let snapshot = PersistedSnapshot {
        raw_study_minutes: vec![0.6, 10.0],
        current_index: 1,
        remaining_secs: 100,
        phase: Phase::Rest,
        paused: false,
        plan_active: true,
    };
    let mut c = PlanController::new(MemoryStore::new(), SilentNotifier);
    c.restore(&snapshot);
    let plan = c.plan().unwrap();
    assert_eq!(plan.get(0).unwrap().study_secs, 36);
    assert_eq!(plan.get(0).unwrap().rest_secs, 6);
    assert_eq!(plan.get(1).unwrap().rest_secs, 100);
    assert_eq!(c.snapshot(), snapshot);
}

#[test]
fn test_restore_with_no_valid_minutes_only_rebuilds_editor() {
    let raw = r#"{"studyTimes":[0,0],"currentIndex":0,"remaining":12,"currentPhase":"study","isPaused":false}"#;
    let store = MemoryStore::with_value(raw);
    let mut c = PlanController::new(store.clone(), SilentNotifier);
    assert!(c.resume_saved().is_empty());
    assert_eq!(c.status(), Status::Idle);
    assert_eq!(c.editor().entries(), &[0.0, 0.0]);
    assert!(c.tick().unwrap().is_empty());
}

#[test]
fn test_malformed_slot_starts_idle() {
    let store = MemoryStore::with_value("{\"studyTimes\": oops");
    let mut c = PlanController::new(store.clone(), SilentNotifier);
    assert!(c.resume_saved().is_empty());
    assert_eq!(c.status(), Status::Idle);
    assert_eq!(c.editor().entries(), &[0.0]);
}

#[test]
fn test_index_past_end_restores_as_completed() {
    let raw = r#"{"studyTimes":[1,2],"currentIndex":5,"remaining":0,"currentPhase":"study","isPaused":false}"#;
    let c = reopen(&MemoryStore::with_value(raw));
    assert_eq!(c.status(), Status::Completed);
    assert_eq!(c.state().unwrap().current_index, 2);
}

#[test]
fn test_idle_editor_draft_survives_reload() {
    let store = MemoryStore::new();
    let mut c = PlanController::new(store.clone(), SilentNotifier);
    c.set_entry(0, 25.0).unwrap();
    c.add_entry(15.0).unwrap();

    let reloaded = reopen(&store);
    assert_eq!(reloaded.status(), Status::Idle);
    assert_eq!(reloaded.editor().entries(), &[25.0, 15.0]);
    assert!(!reloaded.snapshot().plan_active);
}

#[test]
fn test_sqlite_slot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studyrest.db");

    let slot = Database::open_at(&path).unwrap().slot("timerAppState");
    let mut c = PlanController::new(slot, SilentNotifier);
    c.start_plan(&[2.0, 1.0]).unwrap();
    for _ in 0..10 {
        c.tick().unwrap();
    }
    c.pause().unwrap();
    drop(c);

    let slot = Database::open_at(&path).unwrap().slot("timerAppState");
    let mut resumed = PlanController::new(slot, SilentNotifier);
    resumed.resume_saved();
    let state = resumed.state().unwrap();
    assert_eq!(state.remaining_secs, 110);
    assert!(state.paused);

    resumed.cancel().unwrap();
    let slot = Database::open_at(&path).unwrap().slot("timerAppState");
    assert_eq!(slot.read().unwrap(), None);
}
