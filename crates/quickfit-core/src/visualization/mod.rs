//! Session Visualization Module
//!
//! Ratatui widgets that draw a [`SessionSnapshot`](crate::session::SessionSnapshot):
//!
//! - **`TimerWidget`**: current exercise name, `M:SS` countdown and timing phase
//! - **`ExerciseListWidget`**: numbered exercise list with status badges
//!
//! # Example
//!
//! ```ignore
//! use quickfit_core::visualization::{SessionColors, TimerWidget};
//!
//! let snapshot = session.snapshot(Utc::now());
//! let widget = TimerWidget::new(&snapshot)
//!     .colors(SessionColors::default())
//!     .block(Block::default().title("Timer").borders(Borders::ALL));
//! frame.render_widget(widget, area);
//! ```

mod widget;

pub use widget::{ExerciseListWidget, SessionColors, TimerWidget, WARNING_SECS};
