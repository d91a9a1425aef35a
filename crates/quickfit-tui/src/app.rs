//! Runner state and key handling

use chrono::{DateTime, Utc};
use crossterm::event::KeyCode;
use quickfit_core::catalog::{Catalog, LoadReport};
use quickfit_core::config::Config;
use quickfit_core::export;
use quickfit_core::session::{Session, SessionSnapshot};
use quickfit_core::storage::ActivityLog;
use quickfit_core::workout::{Filter, WorkoutSelector};
use std::path::PathBuf;
use tracing::warn;

pub struct App {
    catalog: Catalog,
    report: LoadReport,
    config: Config,
    pub equipment: Filter,
    pub focus: Filter,
    selector: WorkoutSelector,
    session: Option<Session>,
    activity: Option<ActivityLog>,
    export_dir: PathBuf,
    pub status: String,
    should_quit: bool,
}

impl App {
    pub fn new(catalog: Catalog, report: LoadReport, config: Config) -> Self {
        let status = if report.used_fallback() {
            "Catalog unavailable, using built-in exercises. Press g to generate.".to_string()
        } else {
            format!("Loaded {} exercises. Press g to generate.", catalog.len())
        };
        Self {
            equipment: config.workout.equipment.clone(),
            focus: config.workout.focus_area.clone(),
            catalog,
            report,
            config,
            selector: WorkoutSelector::new(),
            session: None,
            activity: None,
            export_dir: PathBuf::from("."),
            status,
            should_quit: false,
        }
    }

    pub fn with_selector(mut self, selector: WorkoutSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_activity_log(mut self, log: ActivityLog) -> Self {
        self.activity = Some(log);
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Option<SessionSnapshot> {
        self.session.as_ref().map(|s| s.snapshot(now))
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Per-frame update: auto-advance on an expired countdown
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if !self.config.workout.auto_advance {
            return;
        }
        let auto_start = self.config.workout.auto_start_next;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.advance_if_expired(now) {
            if session.is_finished() {
                self.status = "Workout complete! Great job.".to_string();
            } else {
                if auto_start {
                    session.resume(now);
                }
                self.status = format!("Next up: {}", session.current_exercise().name);
            }
            self.flush_events();
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, now: DateTime<Utc>) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('g') => self.generate(),
            KeyCode::Char(' ') => self.toggle(now),
            KeyCode::Char('n') | KeyCode::Right => self.step(now, Session::advance, "Skipped ahead"),
            KeyCode::Char('p') | KeyCode::Left => self.step(now, Session::retreat, "Moved back"),
            KeyCode::Char('r') => {
                self.step(now, Session::reset_current_timer, "Exercise restarted")
            }
            KeyCode::Char('s') => self.stop(now),
            KeyCode::Char('e') => self.export(now),
            KeyCode::Char('[') => {
                self.equipment = self.equipment.cycle(&self.catalog.equipment_types());
                self.status = format!("Equipment: {} (press g to regenerate)", self.equipment);
            }
            KeyCode::Char(']') => {
                self.focus = self.focus.cycle(&self.catalog.focus_areas());
                self.status = format!("Focus area: {} (press g to regenerate)", self.focus);
            }
            _ => {}
        }
        self.flush_events();
    }

    fn generate(&mut self) {
        match self
            .selector
            .new_session(&self.catalog, &self.equipment, &self.focus)
        {
            Ok(session) => {
                self.status = format!(
                    "Generated {} exercises. Press space to start.",
                    session.len()
                );
                self.session = Some(session);
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn toggle(&mut self, now: DateTime<Utc>) {
        let Some(session) = self.session.as_mut() else {
            self.status = "Press g to generate a workout first.".to_string();
            return;
        };
        if session.is_finished() {
            session.reset(now);
        }
        self.status = if session.start(now) {
            "Workout started!".to_string()
        } else if session.pause(now) {
            "Paused".to_string()
        } else if session.resume(now) {
            "Resumed".to_string()
        } else {
            return;
        };
    }

    /// Apply a navigation transition, keeping the countdown running if it was
    fn step(
        &mut self,
        now: DateTime<Utc>,
        transition: fn(&mut Session, DateTime<Utc>) -> bool,
        message: &str,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let was_running = session.is_running();
        if !transition(session, now) {
            return;
        }
        if session.is_finished() {
            self.status = "Workout complete! Great job.".to_string();
            return;
        }
        if was_running {
            session.resume(now);
        }
        self.status = format!("{}: {}", message, session.current_exercise().name);
    }

    fn stop(&mut self, now: DateTime<Utc>) {
        if let Some(session) = self.session.as_mut() {
            session.reset(now);
            self.status = "Workout stopped and reset".to_string();
        }
    }

    fn export(&mut self, now: DateTime<Utc>) {
        let Some(session) = self.session.as_ref() else {
            self.status = "Nothing to export yet".to_string();
            return;
        };
        let generated_at = export::local(now);
        let path = self
            .export_dir
            .join(export::default_file_name(generated_at));
        self.status = match export::write_text(&session.snapshot(now), &path, generated_at) {
            Ok(()) => format!("Workout exported to {}", path.display()),
            Err(e) => format!("Export failed: {}", e),
        };
    }

    fn flush_events(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let events = session.drain_events();
        if let Some(log) = &self.activity {
            if let Err(e) = log.append(&events) {
                warn!(error = %e, path = %log.path().display(), "Failed to write activity log");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quickfit_core::session::{ExerciseStatus, SessionEventKind};
    use tempfile::TempDir;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
    }

    fn app() -> App {
        let (catalog, report) = Catalog::from_json_str(&Catalog::builtin().to_json().unwrap()).unwrap();
        App::new(catalog, report, Config::default()).with_selector(WorkoutSelector::with_seed(5))
    }

    fn started_app() -> App {
        let mut app = app();
        app.handle_key(KeyCode::Char('g'), t(0));
        app.handle_key(KeyCode::Char(' '), t(0));
        app
    }

    #[test]
    fn test_space_without_session_prompts() {
        let mut app = app();
        app.handle_key(KeyCode::Char(' '), t(0));
        assert!(app.session().is_none());
        assert!(app.status.contains("generate"));
    }

    #[test]
    fn test_generate_and_start() {
        let app = started_app();
        let session = app.session().unwrap();
        assert_eq!(session.len(), 4);
        assert!(session.is_running());
        assert_eq!(app.status, "Workout started!");
    }

    #[test]
    fn test_space_pauses_and_resumes() {
        let mut app = started_app();
        app.handle_key(KeyCode::Char(' '), t(10));
        assert!(app.session().unwrap().is_paused());
        let remaining = app.session().unwrap().remaining(t(10));

        app.handle_key(KeyCode::Char(' '), t(100));
        assert!(app.session().unwrap().is_running());
        assert_eq!(app.session().unwrap().remaining(t(100)), remaining);
    }

    #[test]
    fn test_tick_auto_advances_once_and_starts_next() {
        let mut app = started_app();
        let first = app.session().unwrap().current_exercise().duration_secs as i64;

        app.tick(t(first - 1));
        assert_eq!(app.session().unwrap().current_index(), 0);

        app.tick(t(first));
        app.tick(t(first));
        let session = app.session().unwrap();
        assert_eq!(session.current_index(), 1);
        assert!(session.is_running());
        assert!(app.status.starts_with("Next up"));
    }

    #[test]
    fn test_tick_respects_auto_advance_off() {
        let mut config = Config::default();
        config.workout.auto_advance = false;
        let mut app = App::new(Catalog::builtin(), app().report, config)
            .with_selector(WorkoutSelector::with_seed(5));
        app.handle_key(KeyCode::Char('g'), t(0));
        app.handle_key(KeyCode::Char(' '), t(0));

        app.tick(t(600));
        assert_eq!(app.session().unwrap().current_index(), 0);
        assert_eq!(app.session().unwrap().remaining(t(600)), 0);
    }

    #[test]
    fn test_navigation_keeps_timer_running() {
        let mut app = started_app();
        app.handle_key(KeyCode::Char('n'), t(5));
        let session = app.session().unwrap();
        assert_eq!(session.current_index(), 1);
        assert!(session.is_running());

        app.handle_key(KeyCode::Char(' '), t(6));
        app.handle_key(KeyCode::Char('p'), t(7));
        let session = app.session().unwrap();
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_running());
        assert_eq!(
            session.snapshot(t(7)).exercises[0].status,
            ExerciseStatus::Active
        );
    }

    #[test]
    fn test_restart_and_stop() {
        let mut app = started_app();
        let full = app.session().unwrap().current_exercise().duration_secs;

        app.handle_key(KeyCode::Char('r'), t(20));
        assert_eq!(app.session().unwrap().remaining(t(20)), full);
        assert!(app.session().unwrap().is_running());

        app.handle_key(KeyCode::Char('s'), t(25));
        let session = app.session().unwrap();
        assert!(!session.is_started());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_finishing_then_space_restarts() {
        let mut app = started_app();
        for i in 1..=4 {
            app.handle_key(KeyCode::Char('n'), t(i));
        }
        assert!(app.session().unwrap().is_finished());
        assert!(app.status.contains("complete"));

        app.handle_key(KeyCode::Char(' '), t(10));
        let session = app.session().unwrap();
        assert!(session.is_started());
        assert!(!session.is_finished());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_previous_ignored_after_finish() {
        let mut app = started_app();
        for i in 1..=4 {
            app.handle_key(KeyCode::Char('n'), t(i));
        }
        app.handle_key(KeyCode::Char('p'), t(5));

        let session = app.session().unwrap();
        assert!(session.is_finished());
        assert!(app.status.contains("complete"));
        let snapshot = session.snapshot(t(5));
        assert_eq!(snapshot.completed_count, 4);
        assert!(
            snapshot
                .exercises
                .iter()
                .all(|e| e.status == ExerciseStatus::Completed)
        );
    }

    #[test]
    fn test_filter_keys_cycle() {
        let mut app = app();
        app.handle_key(KeyCode::Char('['), t(0));
        assert_eq!(app.equipment, Filter::parse("bodyweight"));
        app.handle_key(KeyCode::Char('['), t(0));
        assert_eq!(app.equipment, Filter::All);

        app.handle_key(KeyCode::Char(']'), t(0));
        assert_eq!(app.focus, Filter::parse("core"));
    }

    #[test]
    fn test_events_written_to_activity_log() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("activity.jsonl");
        let mut app = app().with_activity_log(ActivityLog::new(&log_path));

        app.handle_key(KeyCode::Char('g'), t(0));
        app.handle_key(KeyCode::Char(' '), t(0));
        app.handle_key(KeyCode::Char('n'), t(3));

        let events = ActivityLog::new(&log_path).read_all().unwrap();
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SessionEventKind::Started,
                SessionEventKind::ExerciseCompleted,
                SessionEventKind::Resumed,
            ]
        );
    }

    #[test]
    fn test_export_key_writes_file() {
        let dir = TempDir::new().unwrap();
        let mut app = started_app().with_export_dir(dir.path());
        app.handle_key(KeyCode::Char('e'), t(5));

        assert!(app.status.starts_with("Workout exported to"));
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Char('q'), t(0));
        assert!(app.should_quit());
    }
}
