//! Append-only logs
//!
//! - `IntervalLog`: one text line per finished work/break phase
//! - `ActivityLog`: session events as JSON lines

mod activity;
mod interval_log;

pub use activity::ActivityLog;
pub use interval_log::IntervalLog;

use std::fs::{self, File, OpenOptions};
use std::path::Path;

/// Open `path` for appending, creating it and its parent directories
pub(crate) fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
