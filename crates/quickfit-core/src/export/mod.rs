//! Session export
//!
//! Renders a [`SessionSnapshot`] as a human-readable workout plan or as JSON.

use chrono::{DateTime, Local, Utc};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::catalog::title_case;
use crate::error::Result;
use crate::session::SessionSnapshot;

const RULE_WIDTH: usize = 50;

/// Default export file name, e.g. `workout_20261019_073000.txt`
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("workout_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// Render the workout plan as plain text
pub fn render_text(snapshot: &SessionSnapshot, generated_at: DateTime<Local>) -> String {
    PlanText {
        snapshot,
        generated_at,
    }
    .to_string()
}

/// Text plan layout, written through `fmt::Write`
struct PlanText<'a> {
    snapshot: &'a SessionSnapshot,
    generated_at: DateTime<Local>,
}

impl fmt::Display for PlanText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;
        writeln!(f, "Your 10-Minute Workout Plan")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f)?;
        writeln!(f, "Generated on: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(
            f,
            "Progress: {}/{} exercises completed",
            snapshot.completed_count,
            snapshot.exercises.len()
        )?;
        writeln!(f)?;

        for exercise in &snapshot.exercises {
            writeln!(f, "{}. {} [{}]", exercise.position, exercise.name, exercise.status.label())?;
            writeln!(f, "Duration: {} seconds", exercise.duration_secs)?;
            writeln!(f, "Equipment: {}", title_case(&exercise.equipment))?;
            writeln!(f, "Focus Area: {}", title_case(&exercise.focus_area))?;
            writeln!(f, "Muscles: {}", exercise.muscles_worked.join(", "))?;
            writeln!(f, "Description: {}", exercise.description)?;
            writeln!(f)?;

            writeln!(f, "Instructions:")?;
            for (j, step) in exercise.instructions.iter().enumerate() {
                writeln!(f, "  {}. {}", j + 1, step)?;
            }

            writeln!(f)?;
            writeln!(f, "Tips:")?;
            for tip in &exercise.tips {
                writeln!(f, "  • {}", tip)?;
            }

            writeln!(f)?;
            writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render the snapshot as pretty-printed JSON
pub fn render_json(snapshot: &SessionSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Write a text export to `path`, creating parent directories
pub fn write_text(
    snapshot: &SessionSnapshot,
    path: impl AsRef<Path>,
    generated_at: DateTime<Local>,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_text(snapshot, generated_at))?;
    tracing::info!(path = %path.display(), "Workout exported");
    Ok(())
}

/// Local time for an export stamped from a UTC instant
pub fn local(at: DateTime<Utc>) -> DateTime<Local> {
    at.with_timezone(&Local)
}
