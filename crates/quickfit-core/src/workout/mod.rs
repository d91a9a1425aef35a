//! Workout assembly
//!
//! - **Filter**: equipment / focus-area tag sets with an `all` sentinel
//! - **Selector**: randomized, size-bounded draw from the catalog
//! - **Stats**: totals and tag summaries for a selected workout

mod filter;
mod selector;
mod stats;

pub use filter::{ALL, Filter, TAG_SEPARATOR};
pub use selector::{MAX_EXERCISES, MIN_EXERCISES, WorkoutSelector};
pub use stats::{DEFAULT_REST_SECS, WorkoutStats, work_secs};
