//! Session event types for tracking workout activity
//!
//! Events provide an audit trail of applied transitions. The session buffers
//! them until the caller drains them into a log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of session event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventKind {
    /// First exercise armed
    Started,
    /// Countdown paused
    Paused,
    /// Countdown resumed or armed for a new exercise
    Resumed,
    /// An exercise was passed forward from
    ExerciseCompleted,
    /// The last exercise was completed
    WorkoutCompleted,
    /// Moved back to the previous exercise
    MovedBack,
    /// Current exercise countdown restarted
    TimerReset,
    /// Whole session returned to its initial state
    SessionReset,
}

impl SessionEventKind {
    /// Create from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "started" => Some(Self::Started),
            "paused" => Some(Self::Paused),
            "resumed" => Some(Self::Resumed),
            "exercise_completed" => Some(Self::ExerciseCompleted),
            "workout_completed" => Some(Self::WorkoutCompleted),
            "moved_back" => Some(Self::MovedBack),
            "timer_reset" => Some(Self::TimerReset),
            "session_reset" => Some(Self::SessionReset),
            _ => None,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Paused => "paused",
            Self::Resumed => "resumed",
            Self::ExerciseCompleted => "exercise_completed",
            Self::WorkoutCompleted => "workout_completed",
            Self::MovedBack => "moved_back",
            Self::TimerReset => "timer_reset",
            Self::SessionReset => "session_reset",
        }
    }

    /// Whether this event marks progress through the workout
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::ExerciseCompleted | Self::WorkoutCompleted)
    }
}

impl std::fmt::Display for SessionEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A session event representing an applied transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Session this event belongs to
    pub session_id: Uuid,

    /// Type of event
    pub kind: SessionEventKind,

    /// Exercise position the event refers to
    pub exercise_index: usize,

    /// Exercise name at that position
    pub exercise_name: String,

    /// When the event occurred
    pub at: DateTime<Utc>,
}

impl SessionEvent {
    /// Create a new session event
    pub fn new(
        session_id: Uuid,
        kind: SessionEventKind,
        exercise_index: usize,
        exercise_name: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id,
            kind,
            exercise_index,
            exercise_name: exercise_name.into(),
            at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_round_trip_names() {
        for kind in [
            SessionEventKind::Started,
            SessionEventKind::Paused,
            SessionEventKind::Resumed,
            SessionEventKind::ExerciseCompleted,
            SessionEventKind::WorkoutCompleted,
            SessionEventKind::MovedBack,
            SessionEventKind::TimerReset,
            SessionEventKind::SessionReset,
        ] {
            assert_eq!(SessionEventKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(SessionEventKind::from_str("PAUSED"), Some(SessionEventKind::Paused));
        assert_eq!(SessionEventKind::from_str("invalid"), None);
    }

    #[test]
    fn test_is_completion() {
        assert!(SessionEventKind::ExerciseCompleted.is_completion());
        assert!(SessionEventKind::WorkoutCompleted.is_completion());
        assert!(!SessionEventKind::Paused.is_completion());
    }

    #[test]
    fn test_event_serializes_snake_case() {
        let event = SessionEvent::new(
            Uuid::nil(),
            SessionEventKind::WorkoutCompleted,
            3,
            "Plank",
            DateTime::<Utc>::UNIX_EPOCH,
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"workout_completed\""));
        assert!(json.contains("\"exercise_name\":\"Plank\""));
    }
}
