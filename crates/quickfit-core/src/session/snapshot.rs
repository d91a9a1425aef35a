//! Read-only view of a session for rendering and export

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use super::session::{Session, TimingState};
use super::timer;

/// Per-exercise status derived from position and completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseStatus {
    Completed,
    Active,
    Upcoming,
}

impl ExerciseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Active => "active",
            Self::Upcoming => "upcoming",
        }
    }

    /// Short label used in listings
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Active => "Active",
            Self::Upcoming => "Upcoming",
        }
    }
}

impl fmt::Display for ExerciseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Timing state without the wall-clock anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingPhase {
    NotStarted,
    Running,
    Paused,
}

impl From<TimingState> for TimingPhase {
    fn from(state: TimingState) -> Self {
        match state {
            TimingState::NotStarted => Self::NotStarted,
            TimingState::Running { .. } => Self::Running,
            TimingState::Paused { .. } => Self::Paused,
        }
    }
}

/// One exercise as presented to the user
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseSnapshot {
    /// 1-based position in the workout
    pub position: usize,
    pub name: String,
    pub duration_secs: u32,
    pub equipment: String,
    pub focus_area: String,
    pub muscles_worked: Vec<String>,
    pub description: String,
    pub instructions: Vec<String>,
    pub tips: Vec<String>,
    pub status: ExerciseStatus,
}

/// Complete session state at one instant
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub captured_at: DateTime<Utc>,
    pub started: bool,
    pub finished: bool,
    pub current_index: usize,
    pub timing: TimingPhase,
    /// Seconds left on the current exercise
    pub remaining_secs: u32,
    pub completed_count: usize,
    pub exercises: Vec<ExerciseSnapshot>,
}

impl SessionSnapshot {
    pub fn capture(session: &Session, now: DateTime<Utc>) -> Self {
        let exercises = session
            .exercises()
            .iter()
            .enumerate()
            .map(|(i, e)| ExerciseSnapshot {
                position: i + 1,
                name: e.name.clone(),
                duration_secs: e.duration_secs,
                equipment: e.equipment.clone(),
                focus_area: e.focus_area.clone(),
                muscles_worked: e.muscles_worked.clone(),
                description: e.description.clone(),
                instructions: e.instructions.clone(),
                tips: e.tips.clone(),
                status: status_of(session, i),
            })
            .collect();

        Self {
            session_id: session.id(),
            captured_at: now,
            started: session.is_started(),
            finished: session.is_finished(),
            current_index: session.current_index(),
            timing: session.timing().into(),
            remaining_secs: timer::remaining(session, now),
            completed_count: session.completed_indices().len(),
            exercises,
        }
    }

    pub fn current(&self) -> &ExerciseSnapshot {
        &self.exercises[self.current_index]
    }

    /// Fraction of the workout reached, for progress bars
    pub fn progress(&self) -> f64 {
        if self.finished {
            1.0
        } else if self.started {
            (self.current_index + 1) as f64 / self.exercises.len() as f64
        } else {
            0.0
        }
    }

    /// Exercise time without rest, in seconds
    pub fn total_secs(&self) -> u64 {
        self.exercises.iter().map(|e| u64::from(e.duration_secs)).sum()
    }
}

fn status_of(session: &Session, index: usize) -> ExerciseStatus {
    if session.completed_indices().contains(&index) {
        ExerciseStatus::Completed
    } else if session.is_started() && index == session.current_index() {
        ExerciseStatus::Active
    } else {
        ExerciseStatus::Upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use chrono::Duration;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
    }

    fn statuses(snapshot: &SessionSnapshot) -> Vec<ExerciseStatus> {
        snapshot.exercises.iter().map(|e| e.status).collect()
    }

    #[test]
    fn test_statuses_follow_progress() {
        use ExerciseStatus::*;

        let mut session = Session::new(Catalog::builtin().exercises().to_vec()).unwrap();
        assert_eq!(statuses(&session.snapshot(t(0))), vec![Upcoming; 4]);

        session.start(t(0));
        session.advance(t(1));
        let snapshot = session.snapshot(t(2));
        assert_eq!(statuses(&snapshot), vec![Completed, Active, Upcoming, Upcoming]);
        assert_eq!(snapshot.current().name, "Push-Up");
        assert_eq!(snapshot.timing, TimingPhase::NotStarted);
        assert_eq!(snapshot.remaining_secs, 30);
        assert_eq!(snapshot.progress(), 0.5);

        for i in 2..=4 {
            session.advance(t(i));
        }
        let snapshot = session.snapshot(t(5));
        assert_eq!(statuses(&snapshot), vec![Completed; 4]);
        assert!(snapshot.finished);
        assert_eq!(snapshot.progress(), 1.0);
    }

    #[test]
    fn test_snapshot_carries_exercise_details() {
        let session = Session::new(Catalog::builtin().exercises().to_vec()).unwrap();
        let snapshot = session.snapshot(t(0));
        let squat = &snapshot.exercises[0];
        assert_eq!(squat.position, 1);
        assert_eq!(squat.duration_secs, 45);
        assert_eq!(squat.focus_area, "lower");
        assert_eq!(squat.instructions.len(), 3);
        assert_eq!(snapshot.total_secs(), 165);
    }

    #[test]
    fn test_total_secs_does_not_wrap() {
        let mut exercises = Catalog::builtin().exercises().to_vec();
        for exercise in &mut exercises {
            exercise.duration_secs = u32::MAX;
        }
        let session = Session::new(exercises).unwrap();
        assert_eq!(session.snapshot(t(0)).total_secs(), 4 * u64::from(u32::MAX));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut session = Session::new(Catalog::builtin().exercises().to_vec()).unwrap();
        session.start(t(0));
        session.pause(t(3));
        let json = serde_json::to_value(session.snapshot(t(3))).unwrap();
        assert_eq!(json["timing"], "paused");
        assert_eq!(json["remaining_secs"], 42);
        assert_eq!(json["exercises"][0]["status"], "active");
    }
}
