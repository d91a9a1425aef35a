//! Workout session domain module
//!
//! Drives a user through a selected exercise list.
//!
//! # Architecture
//!
//! - **Entity**: `Session` owns the exercise list, position, completion set and
//!   per-exercise timing state; it is mutated only through its transitions
//! - **Timer**: `remaining` / `should_auto_advance` are pure functions of a
//!   session and an injected wall-clock instant
//! - **Events**: each applied transition records a `SessionEvent` that the
//!   caller drains for logging
//! - **Snapshot**: `SessionSnapshot` is the read model handed to renderers and
//!   exporters
//!
//! # Transitions
//!
//! Preconditions are soft: a transition whose precondition does not hold is a
//! no-op and returns `false`. Nothing is ever half-applied.
//!
//! | Transition | Applies when |
//! |---|---|
//! | `start` | not started and not finished |
//! | `pause` | timer running |
//! | `resume` | started and timer paused or not yet armed |
//! | `advance` | started |
//! | `retreat` | started and not on the first exercise |
//! | `reset_current_timer` | always |
//! | `reset` | always |
//!
//! # Example
//!
//! ```ignore
//! use chrono::Utc;
//! use quickfit_core::session::Session;
//!
//! let mut session = Session::new(exercises)?;
//! session.start(Utc::now());
//!
//! // render loop, once per second
//! let now = Utc::now();
//! println!("{}", format_clock(session.remaining(now)));
//! session.advance_if_expired(now);
//! ```

pub mod event;
#[allow(clippy::module_inception)]
pub mod session;
pub mod snapshot;
pub mod timer;

pub use event::{SessionEvent, SessionEventKind};
pub use session::{Session, TimingState};
pub use snapshot::{ExerciseSnapshot, ExerciseStatus, SessionSnapshot, TimingPhase};
pub use timer::{elapsed, format_clock, remaining, should_auto_advance};
