//! Plain-text log of finished interval phases

use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::open_append;
use crate::error::Result;
use crate::interval::IntervalPhase;

/// Appends `"<timestamp> - <Phase>: <n> minutes"` lines
#[derive(Debug, Clone)]
pub struct IntervalLog {
    path: PathBuf,
}

impl IntervalLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format one log line (without trailing newline)
    pub fn line(at: DateTime<Local>, phase: IntervalPhase, minutes: u32) -> String {
        format!("{} - {}: {} minutes", at.format("%Y-%m-%d %H:%M:%S"), phase, minutes)
    }

    /// Append one finished phase
    pub fn record(&self, at: DateTime<Local>, phase: IntervalPhase, minutes: u32) -> Result<()> {
        let mut file = open_append(&self.path)?;
        writeln!(file, "{}", Self::line(at, phase, minutes))?;
        tracing::debug!(path = %self.path.display(), phase = %phase, "Interval logged");
        Ok(())
    }
}
