//! Work/break interval timer model
//!
//! Alternates work and break phases of fixed length. The model only tracks
//! which phase is current and how many work phases have been completed; the
//! caller owns the countdown cadence.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Longest phase accepted, in minutes
pub const MAX_PHASE_MINUTES: u32 = 24 * 60;

/// One phase of the interval cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalPhase {
    Work,
    Break,
}

impl IntervalPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Break => "Break",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }
}

impl fmt::Display for IntervalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Work and break lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalPlan {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl Default for IntervalPlan {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
        }
    }
}

impl IntervalPlan {
    pub fn new(work_minutes: u32, break_minutes: u32) -> Result<Self> {
        for (label, minutes) in [("work", work_minutes), ("break", break_minutes)] {
            if minutes > MAX_PHASE_MINUTES {
                return Err(Error::InvalidInput(format!(
                    "{} duration must be at most {} minutes",
                    label, MAX_PHASE_MINUTES
                )));
            }
        }
        Ok(Self {
            work_minutes,
            break_minutes,
        })
    }

    pub fn minutes(&self, phase: IntervalPhase) -> u32 {
        match phase {
            IntervalPhase::Work => self.work_minutes,
            IntervalPhase::Break => self.break_minutes,
        }
    }

    pub fn seconds(&self, phase: IntervalPhase) -> u32 {
        self.minutes(phase) * 60
    }
}

/// Position in the alternating work/break sequence
#[derive(Debug, Clone)]
pub struct IntervalCycle {
    plan: IntervalPlan,
    phase: IntervalPhase,
    completed_work: u32,
}

impl IntervalCycle {
    /// Start with a work phase
    pub fn new(plan: IntervalPlan) -> Self {
        Self {
            plan,
            phase: IntervalPhase::Work,
            completed_work: 0,
        }
    }

    pub fn plan(&self) -> IntervalPlan {
        self.plan
    }

    pub fn phase(&self) -> IntervalPhase {
        self.phase
    }

    /// Length of the current phase in seconds
    pub fn phase_secs(&self) -> u32 {
        self.plan.seconds(self.phase)
    }

    /// Work phases finished so far
    pub fn completed_work(&self) -> u32 {
        self.completed_work
    }

    /// Finish the current phase, returning it, and move to the next one
    pub fn complete_phase(&mut self) -> IntervalPhase {
        let finished = self.phase;
        if finished == IntervalPhase::Work {
            self.completed_work += 1;
        }
        self.phase = finished.next();
        finished
    }
}

/// Format seconds as `MM:SS`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan() {
        let plan = IntervalPlan::default();
        assert_eq!(plan.seconds(IntervalPhase::Work), 1500);
        assert_eq!(plan.seconds(IntervalPhase::Break), 300);
    }

    #[test]
    fn test_plan_rejects_absurd_lengths() {
        assert!(IntervalPlan::new(25, 5).is_ok());
        assert!(IntervalPlan::new(0, 0).is_ok());
        assert!(IntervalPlan::new(MAX_PHASE_MINUTES + 1, 5).is_err());
    }

    #[test]
    fn test_cycle_alternates_and_counts_work() {
        let mut cycle = IntervalCycle::new(IntervalPlan::new(1, 2).unwrap());
        assert_eq!(cycle.phase(), IntervalPhase::Work);
        assert_eq!(cycle.phase_secs(), 60);

        assert_eq!(cycle.complete_phase(), IntervalPhase::Work);
        assert_eq!(cycle.completed_work(), 1);
        assert_eq!(cycle.phase(), IntervalPhase::Break);
        assert_eq!(cycle.phase_secs(), 120);

        assert_eq!(cycle.complete_phase(), IntervalPhase::Break);
        assert_eq!(cycle.completed_work(), 1);
        assert_eq!(cycle.phase(), IntervalPhase::Work);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(61), "01:01");
    }
}
