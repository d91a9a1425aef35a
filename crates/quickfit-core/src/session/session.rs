//! Session entity and timing state
//!
//! A `Session` is created from a non-empty exercise list and then mutated only
//! through its transition methods. Wall-clock instants are always passed in by
//! the caller.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;
use tracing::{debug, info};
use uuid::Uuid;

use super::event::{SessionEvent, SessionEventKind};
use super::snapshot::SessionSnapshot;
use super::timer;
use crate::catalog::ExerciseRecord;
use crate::error::{Error, Result};

/// Countdown state of the current exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingState {
    /// Timer not armed for this exercise
    #[default]
    NotStarted,
    /// Counting down since `anchor`, on top of time already `accumulated`
    Running {
        anchor: DateTime<Utc>,
        accumulated: Duration,
    },
    /// Frozen with `accumulated` time elapsed
    Paused { accumulated: Duration },
}

impl TimingState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused { .. })
    }

    /// Elapsed exercise time at `now`
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        match *self {
            Self::NotStarted => Duration::zero(),
            Self::Running {
                anchor,
                accumulated,
            } => accumulated + (now - anchor).max(Duration::zero()),
            Self::Paused { accumulated } => accumulated,
        }
    }
}

/// One in-progress walkthrough of an ordered exercise list
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    exercises: Vec<ExerciseRecord>,
    current_index: usize,
    completed: BTreeSet<usize>,
    timing: TimingState,
    started: bool,
    finished: bool,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create a session over `exercises`; the list is fixed from here on
    pub fn new(exercises: Vec<ExerciseRecord>) -> Result<Self> {
        if exercises.is_empty() {
            return Err(Error::EmptySelection);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            exercises,
            current_index: 0,
            completed: BTreeSet::new(),
            timing: TimingState::NotStarted,
            started: false,
            finished: false,
            events: Vec::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn exercises(&self) -> &[ExerciseRecord] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Always false; sessions cannot be built empty
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_exercise(&self) -> &ExerciseRecord {
        &self.exercises[self.current_index]
    }

    /// Indices the user has passed forward from
    pub fn completed_indices(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    pub fn timing(&self) -> TimingState {
        self.timing
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_running(&self) -> bool {
        self.timing.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.timing.is_paused()
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.exercises.len()
    }

    /// Seconds left on the current exercise at `now`
    pub fn remaining(&self, now: DateTime<Utc>) -> u32 {
        timer::remaining(self, now)
    }

    /// Read model for renderers and exporters
    pub fn snapshot(&self, now: DateTime<Utc>) -> SessionSnapshot {
        SessionSnapshot::capture(self, now)
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Arm the first exercise.
    ///
    /// No-op once started, or after finishing until [`Session::reset`].
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.started || self.finished {
            return false;
        }
        self.started = true;
        self.timing = TimingState::Running {
            anchor: now,
            accumulated: Duration::zero(),
        };
        info!(session_id = %self.id, exercises = self.len(), "Workout started");
        self.record(SessionEventKind::Started, now);
        true
    }

    /// Freeze the running countdown
    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        if !self.timing.is_running() {
            return false;
        }
        self.timing = TimingState::Paused {
            accumulated: self.timing.elapsed(now),
        };
        debug!(session_id = %self.id, index = self.current_index, "Exercise paused");
        self.record(SessionEventKind::Paused, now);
        true
    }

    /// Continue a paused countdown, or arm the current exercise if its timer
    /// has not been started yet (after advancing, retreating or a timer reset)
    pub fn resume(&mut self, now: DateTime<Utc>) -> bool {
        if !self.started {
            return false;
        }
        let accumulated = match self.timing {
            TimingState::Paused { accumulated } => accumulated,
            TimingState::NotStarted => Duration::zero(),
            TimingState::Running { .. } => return false,
        };
        self.timing = TimingState::Running {
            anchor: now,
            accumulated,
        };
        debug!(session_id = %self.id, index = self.current_index, "Exercise resumed");
        self.record(SessionEventKind::Resumed, now);
        true
    }

    /// Complete the current exercise and move forward; finishing the last one
    /// ends the workout
    pub fn advance(&mut self, now: DateTime<Utc>) -> bool {
        if !self.started {
            return false;
        }
        self.completed.insert(self.current_index);
        self.record(SessionEventKind::ExerciseCompleted, now);
        self.timing = TimingState::NotStarted;

        if self.is_last() {
            self.finished = true;
            self.started = false;
            info!(session_id = %self.id, exercises = self.len(), "Workout completed");
            self.record(SessionEventKind::WorkoutCompleted, now);
        } else {
            self.current_index += 1;
            debug!(session_id = %self.id, index = self.current_index, "Advanced to next exercise");
        }
        true
    }

    /// Step back one exercise, un-completing it.
    ///
    /// Only while started; a finished workout stays finished until reset.
    pub fn retreat(&mut self, now: DateTime<Utc>) -> bool {
        if !self.started || self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        self.timing = TimingState::NotStarted;
        self.completed.remove(&self.current_index);
        debug!(session_id = %self.id, index = self.current_index, "Moved back to previous exercise");
        self.record(SessionEventKind::MovedBack, now);
        true
    }

    /// Restart the current exercise's countdown without moving
    pub fn reset_current_timer(&mut self, now: DateTime<Utc>) -> bool {
        self.timing = TimingState::NotStarted;
        self.record(SessionEventKind::TimerReset, now);
        true
    }

    /// Return to the initial state, keeping the exercise list
    pub fn reset(&mut self, now: DateTime<Utc>) -> bool {
        self.started = false;
        self.finished = false;
        self.current_index = 0;
        self.timing = TimingState::NotStarted;
        self.completed.clear();
        info!(session_id = %self.id, "Workout reset");
        self.record(SessionEventKind::SessionReset, now);
        true
    }

    /// Advance once when the running countdown has reached zero.
    ///
    /// Advancing disarms the timer, so repeated polls after the same zero
    /// crossing do nothing.
    pub fn advance_if_expired(&mut self, now: DateTime<Utc>) -> bool {
        if timer::should_auto_advance(self, now) {
            self.advance(now)
        } else {
            false
        }
    }

    fn record(&mut self, kind: SessionEventKind, at: DateTime<Utc>) {
        let name = self.exercises[self.current_index].name.clone();
        self.events
            .push(SessionEvent::new(self.id, kind, self.current_index, name, at));
    }
}
