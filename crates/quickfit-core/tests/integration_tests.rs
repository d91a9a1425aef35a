//! Quickfit Core Integration Tests

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use quickfit_core::{
    Error,
    catalog::{Catalog, CatalogSource},
    export,
    session::{ExerciseStatus, SessionEventKind, TimingPhase},
    storage::ActivityLog,
    workout::{Filter, WorkoutSelector, WorkoutStats},
};
use std::fs;
use tempfile::TempDir;

const CATALOG: &str = r#"{
  "exercises": [
    {"name": "Goblet Squat", "description": "Squat holding a dumbbell",
     "instructions": ["Hold dumbbell at chest", "Squat down", "Stand up"],
     "muscles_worked": ["Quadriceps", "Glutes"], "equipment": "Dumbbells",
     "focus_area": "lower", "duration": "45 seconds"},
    {"name": "Dumbbell Row", "description": "Row for the upper back",
     "instructions": ["Hinge forward", "Pull to hip"],
     "muscles_worked": ["Lats"], "equipment": "dumbbells",
     "focus_area": "upper", "duration": 40},
    {"name": "Plank", "description": "Core hold",
     "instructions": ["Hold a straight line"], "tips": ["Brace"],
     "muscles_worked": ["Core"], "equipment": "bodyweight",
     "focus_area": "core", "duration": "1 minute"},
    {"name": "Burpee", "description": "Full body conditioning",
     "instructions": ["Squat", "Kick back", "Jump"],
     "muscles_worked": ["Full Body"], "equipment": "bodyweight",
     "focus_area": "full_body"},
    {"name": "Lunge", "description": "Alternating lunges",
     "instructions": ["Step forward", "Lower", "Return"],
     "muscles_worked": ["Quadriceps"], "equipment": "bodyweight",
     "focus_area": "lower", "duration": 30},
    {"name": "Broken", "description": "Missing instructions",
     "muscles_worked": [], "equipment": "bodyweight", "focus_area": "core"},
    {"name": "plank", "description": "Duplicate",
     "instructions": ["Hold"], "muscles_worked": ["Core"],
     "equipment": "bodyweight", "focus_area": "core"}
  ]
}"#;

fn t(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
}

fn write_catalog(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("exercises.json");
    fs::write(&path, CATALOG).unwrap();
    path
}

#[test]
fn test_catalog_load_validates_records() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir);

    let (catalog, report) = Catalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 5);
    assert_eq!(report.accepted, 5);
    assert_eq!(report.rejected.len(), 2);
    assert_eq!(report.source, CatalogSource::File(path));

    assert_eq!(catalog.equipment_types(), vec!["bodyweight", "dumbbells"]);
    assert_eq!(catalog.get("goblet squat").unwrap().duration_secs, 45);
    assert_eq!(catalog.get("Plank").unwrap().duration_secs, 60);
    assert_eq!(catalog.get("Burpee").unwrap().duration_secs, 30);
}

#[test]
fn test_missing_catalog_falls_back() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");

    assert!(matches!(Catalog::load(&missing), Err(Error::CatalogNotFound(_))));

    let (catalog, report) = Catalog::load_or_builtin(&missing);
    assert!(report.used_fallback());
    assert!(report.fallback_reason.is_some());
    assert_eq!(catalog.len(), 4);
}

#[test]
fn test_filtered_workout_runs_to_completion() {
    let dir = TempDir::new().unwrap();
    let (catalog, _) = Catalog::load(write_catalog(&dir)).unwrap();

    let mut selector = WorkoutSelector::with_seed(7);
    let mut session = selector
        .new_session(&catalog, &Filter::parse("bodyweight"), &Filter::All)
        .unwrap();

    // Three bodyweight exercises is below a full workout, so all are used in order
    let names: Vec<_> = session.exercises().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Plank", "Burpee", "Lunge"]);

    assert!(session.start(t(0)));
    assert_eq!(session.remaining(t(20)), 40);
    assert!(session.pause(t(20)));
    assert_eq!(session.remaining(t(500)), 40);
    assert!(session.resume(t(500)));

    // Zero crossing advances once; later polls are no-ops until the next timer is armed
    assert!(session.advance_if_expired(t(540)));
    assert!(!session.advance_if_expired(t(541)));
    assert_eq!(session.current_exercise().name, "Burpee");
    assert!(session.resume(t(541)));
    assert!(session.advance_if_expired(t(571)));
    assert!(session.resume(t(571)));
    assert!(session.advance_if_expired(t(601)));
    assert!(session.is_finished());

    let snapshot = session.snapshot(t(602));
    assert!(snapshot.exercises.iter().all(|e| e.status == ExerciseStatus::Completed));
    assert_eq!(snapshot.timing, TimingPhase::NotStarted);

    let events = session.drain_events();
    assert_eq!(events.first().unwrap().kind, SessionEventKind::Started);
    assert_eq!(events.last().unwrap().kind, SessionEventKind::WorkoutCompleted);
    assert_eq!(
        events.iter().filter(|e| e.kind == SessionEventKind::ExerciseCompleted).count(),
        3
    );

    let log = ActivityLog::new(dir.path().join("activity.jsonl"));
    log.append(&events).unwrap();
    assert_eq!(log.read_all().unwrap(), events);
}

#[test]
fn test_unmatched_filters_use_whole_catalog() {
    let dir = TempDir::new().unwrap();
    let (catalog, _) = Catalog::load(write_catalog(&dir)).unwrap();

    let exercises = WorkoutSelector::with_seed(1)
        .select(&catalog, &Filter::parse("kettlebell"), &Filter::All)
        .unwrap();
    assert!((4..=5).contains(&exercises.len()));
}

#[test]
fn test_export_after_partial_workout() {
    let dir = TempDir::new().unwrap();
    let mut session = WorkoutSelector::with_seed(3)
        .new_session(&Catalog::builtin(), &Filter::All, &Filter::All)
        .unwrap();
    session.start(t(0));
    session.advance(t(10));

    let snapshot = session.snapshot(t(11));
    let generated = Local.with_ymd_and_hms(2026, 3, 2, 18, 30, 5).unwrap();
    let path = dir.path().join(export::default_file_name(generated));
    export::write_text(&snapshot, &path, generated).unwrap();

    assert!(path.ends_with("workout_20260302_183005.txt"));
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("Your 10-Minute Workout Plan"));
    assert!(text.contains("[Completed]"));
    assert!(text.contains("[Active]"));

    let json: serde_json::Value =
        serde_json::from_str(&export::render_json(&snapshot).unwrap()).unwrap();
    assert_eq!(json["completed_count"], 1);
    assert_eq!(json["exercises"].as_array().unwrap().len(), 4);

    let stats = WorkoutStats::from_exercises(session.exercises()).unwrap();
    assert_eq!(stats.total_exercises, 4);
    assert_eq!(stats.total_duration_secs, 195);
}
