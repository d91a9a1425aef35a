//! Ratatui widgets for the session runner

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::session::{ExerciseStatus, SessionSnapshot, TimingPhase, format_clock};

/// Countdown turns to the warning color at or below this many seconds
pub const WARNING_SECS: u32 = 5;

/// Color scheme for session widgets
#[derive(Debug, Clone)]
pub struct SessionColors {
    /// Countdown while running
    pub clock: Color,
    /// Countdown in the final seconds
    pub warning: Color,
    /// Completed exercises
    pub completed: Color,
    /// Active exercise
    pub active: Color,
    /// Upcoming exercises
    pub upcoming: Color,
    /// Paused label
    pub paused: Color,
    /// Secondary text
    pub muted: Color,
}

impl Default for SessionColors {
    fn default() -> Self {
        Self {
            clock: Color::Cyan,
            warning: Color::Red,
            completed: Color::Green,
            active: Color::Yellow,
            upcoming: Color::Gray,
            paused: Color::Magenta,
            muted: Color::DarkGray,
        }
    }
}

impl SessionColors {
    /// Get color for an exercise status
    pub fn for_status(&self, status: ExerciseStatus) -> Color {
        match status {
            ExerciseStatus::Completed => self.completed,
            ExerciseStatus::Active => self.active,
            ExerciseStatus::Upcoming => self.upcoming,
        }
    }

    /// Get color for the countdown
    pub fn for_remaining(&self, remaining_secs: u32) -> Color {
        if remaining_secs <= WARNING_SECS {
            self.warning
        } else {
            self.clock
        }
    }
}

fn render_in_block(block: Option<Block<'_>>, area: Rect, buf: &mut Buffer) -> Rect {
    match block {
        Some(block) => {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        }
        None => area,
    }
}

/// Countdown display for the current exercise
pub struct TimerWidget<'a> {
    snapshot: &'a SessionSnapshot,
    colors: SessionColors,
    block: Option<Block<'a>>,
}

impl<'a> TimerWidget<'a> {
    pub fn new(snapshot: &'a SessionSnapshot) -> Self {
        Self {
            snapshot,
            colors: SessionColors::default(),
            block: None,
        }
    }

    /// Set the color scheme
    pub fn colors(mut self, colors: SessionColors) -> Self {
        self.colors = colors;
        self
    }

    /// Set the block (border/title)
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn status_line(&self) -> Line<'a> {
        let snapshot = self.snapshot;
        let (text, color) = if snapshot.finished {
            ("Workout complete!", self.colors.completed)
        } else if !snapshot.started {
            ("Press space to start", self.colors.muted)
        } else {
            match snapshot.timing {
                TimingPhase::Running => ("Running", self.colors.active),
                TimingPhase::Paused => ("Paused", self.colors.paused),
                TimingPhase::NotStarted => ("Ready", self.colors.muted),
            }
        };
        Line::from(Span::styled(text, Style::default().fg(color)))
    }

    fn build_lines(&self) -> Vec<Line<'a>> {
        let snapshot = self.snapshot;
        let current = snapshot.current();
        let remaining = snapshot.remaining_secs;

        vec![
            Line::from(Span::styled(
                current.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format_clock(remaining),
                Style::default()
                    .fg(self.colors.for_remaining(remaining))
                    .add_modifier(Modifier::BOLD),
            )),
            self.status_line(),
            Line::from(Span::styled(
                format!(
                    "Exercise {} of {}",
                    snapshot.current_index + 1,
                    snapshot.exercises.len()
                ),
                Style::default().fg(self.colors.muted),
            )),
        ]
    }
}

impl Widget for TimerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.build_lines();
        let inner = render_in_block(self.block, area, buf);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

/// Exercise list with Completed/Active/Upcoming badges
pub struct ExerciseListWidget<'a> {
    snapshot: &'a SessionSnapshot,
    colors: SessionColors,
    block: Option<Block<'a>>,
    show_details: bool,
}

impl<'a> ExerciseListWidget<'a> {
    pub fn new(snapshot: &'a SessionSnapshot) -> Self {
        Self {
            snapshot,
            colors: SessionColors::default(),
            block: None,
            show_details: true,
        }
    }

    /// Set the color scheme
    pub fn colors(mut self, colors: SessionColors) -> Self {
        self.colors = colors;
        self
    }

    /// Set the block (border/title)
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Show duration and muscles under each name
    pub fn show_details(mut self, show: bool) -> Self {
        self.show_details = show;
        self
    }

    fn build_lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        for (index, exercise) in self.snapshot.exercises.iter().enumerate() {
            let color = self.colors.for_status(exercise.status);
            let is_current = index == self.snapshot.current_index && !self.snapshot.finished;

            let mut name_style = Style::default().fg(color);
            if is_current {
                name_style = name_style.add_modifier(Modifier::BOLD);
            }

            lines.push(Line::from(vec![
                Span::styled(
                    if is_current { "> " } else { "  " },
                    Style::default().fg(self.colors.active),
                ),
                Span::styled(format!("{}. {}", exercise.position, exercise.name), name_style),
                Span::styled(
                    format!(" [{}]", exercise.status.label()),
                    Style::default().fg(color),
                ),
            ]));

            if self.show_details {
                lines.push(Line::from(Span::styled(
                    format!(
                        "     {}s · {}",
                        exercise.duration_secs,
                        exercise.muscles_worked.join(", ")
                    ),
                    Style::default().fg(self.colors.muted),
                )));
            }
        }
        lines
    }
}

impl Widget for ExerciseListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.build_lines();
        let inner = render_in_block(self.block, area, buf);
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
