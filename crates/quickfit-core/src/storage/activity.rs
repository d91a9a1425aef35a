//! JSON-lines log of session events

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::open_append;
use crate::error::Result;
use crate::session::SessionEvent;

/// Append-only store of [`SessionEvent`]s, one JSON object per line
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append events; returns how many were written
    pub fn append(&self, events: &[SessionEvent]) -> Result<usize> {
        if events.is_empty() {
            return Ok(0);
        }
        let mut file = open_append(&self.path)?;
        for event in events {
            writeln!(file, "{}", serde_json::to_string(event)?)?;
        }
        Ok(events.len())
    }

    /// Read every event back, skipping lines that do not parse
    pub fn read_all(&self) -> Result<Vec<SessionEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(fs::File::open(&self.path)?);
        let mut events = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(event) => events.push(event),
                Err(e) => tracing::warn!(error = %e, "Skipping unreadable activity line"),
            }
        }
        Ok(events)
    }
}
