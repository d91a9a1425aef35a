//! Countdown evaluation
//!
//! Pure functions of a session and an injected instant. Nothing here mutates
//! the session; callers poll `remaining` on their own cadence and use
//! `should_auto_advance` to decide when to call `advance`.

use chrono::{DateTime, Duration, Utc};

use super::session::{Session, TimingState};

/// Elapsed time on the current exercise
pub fn elapsed(session: &Session, now: DateTime<Utc>) -> Duration {
    if !session.is_started() {
        return Duration::zero();
    }
    session.timing().elapsed(now)
}

/// Whole seconds left on the current exercise, never negative.
///
/// Unstarted sessions and unarmed exercises report the full duration.
pub fn remaining(session: &Session, now: DateTime<Utc>) -> u32 {
    let duration = i64::from(session.current_exercise().duration_secs);
    let elapsed_secs = elapsed(session, now).num_seconds();
    // num_seconds truncates toward zero, which is floor for non-negative spans
    (duration - elapsed_secs).clamp(0, duration) as u32
}

/// True exactly while a running countdown sits at zero
pub fn should_auto_advance(session: &Session, now: DateTime<Utc>) -> bool {
    session.is_started()
        && matches!(session.timing(), TimingState::Running { .. })
        && remaining(session, now) == 0
}

/// Format seconds as `M:SS`
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
