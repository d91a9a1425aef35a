//! Workout statistics

use serde::Serialize;
use std::collections::BTreeSet;

use crate::catalog::ExerciseRecord;

/// Rest inserted between consecutive exercises when totalling a workout
pub const DEFAULT_REST_SECS: u32 = 10;

/// Summary of a selected workout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutStats {
    pub total_exercises: usize,
    /// Exercise time plus rest between exercises
    pub total_duration_secs: u64,
    /// Rounded to one decimal place
    pub total_duration_minutes: f64,
    pub muscles_worked: Vec<String>,
    pub equipment_needed: Vec<String>,
    pub focus_areas: Vec<String>,
}

impl WorkoutStats {
    /// Summarize exercises with the default rest interval
    pub fn from_exercises(exercises: &[ExerciseRecord]) -> Option<Self> {
        Self::with_rest(exercises, DEFAULT_REST_SECS)
    }

    /// Summarize exercises with `rest_secs` between each pair; `None` when empty
    pub fn with_rest(exercises: &[ExerciseRecord], rest_secs: u32) -> Option<Self> {
        if exercises.is_empty() {
            return None;
        }

        let rests = (exercises.len() - 1) as u64;
        let total_duration_secs = work_secs(exercises) + u64::from(rest_secs) * rests;

        let muscles: BTreeSet<&str> = exercises
            .iter()
            .flat_map(|e| e.muscles_worked.iter().map(String::as_str))
            .collect();
        let equipment: BTreeSet<&str> = exercises.iter().map(|e| e.equipment.as_str()).collect();
        let focus: BTreeSet<&str> = exercises.iter().map(|e| e.focus_area.as_str()).collect();

        Some(Self {
            total_exercises: exercises.len(),
            total_duration_secs,
            total_duration_minutes: (total_duration_secs as f64 / 60.0 * 10.0).round() / 10.0,
            muscles_worked: muscles.into_iter().map(str::to_string).collect(),
            equipment_needed: equipment.into_iter().map(str::to_string).collect(),
            focus_areas: focus.into_iter().map(str::to_string).collect(),
        })
    }
}

/// Sum of exercise durations without rest
pub fn work_secs(exercises: &[ExerciseRecord]) -> u64 {
    exercises.iter().map(|e| u64::from(e.duration_secs)).sum()
}
