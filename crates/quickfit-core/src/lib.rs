//! Quickfit Core Library
//!
//! This crate provides the core functionality for Quickfit, including:
//! - Exercise catalog loading, validation, and structure inspection
//! - Workout selection (filtered, randomized, bounded in size)
//! - Session state machine with pause/resume and manual navigation
//! - Timer evaluation as a pure function of session state and wall-clock time
//! - Text and JSON export of session snapshots
//! - Interval (work/break) timer model and append-only logs
//! - Ratatui widgets for the interactive runner

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod interval;
pub mod session;
pub mod storage;
pub mod visualization;
pub mod workout;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{Catalog, ExerciseRecord};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::session::{Session, SessionSnapshot, TimingState};
    pub use crate::workout::{Filter, WorkoutSelector};
}
