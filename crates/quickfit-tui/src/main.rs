//! Quickfit TUI - guided workout runner
//!
//! This TUI provides:
//! - Workout generation with equipment and focus filters
//! - A live countdown for the current exercise with auto-advance
//! - Progress, exercise list and exercise details
//! - Text export of the current workout

mod app;

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use anyhow::Context;
use app::App;
use chrono::{DateTime, Utc};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use quickfit_core::catalog::{Catalog, title_case};
use quickfit_core::config::Config;
use quickfit_core::session::SessionSnapshot;
use quickfit_core::storage::ActivityLog;
use quickfit_core::visualization::{ExerciseListWidget, SessionColors, TimerWidget};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

const KEY_HELP: &str = "g: Generate | space: Start/Pause | n/p: Next/Prev | r: Restart | s: Stop | e: Export | [ ]: Filters | q: Quit";

fn init_logging() -> anyhow::Result<()> {
    // Logs go to a file so they never draw over the alternate screen
    let dir = Config::config_dir()?;
    std::fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("quickfit-tui.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quickfit=warn".parse()?),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging()?;

    let config = Config::load()?;
    let (catalog, report) = if config.catalog.use_builtin_fallback {
        Catalog::load_or_builtin(&config.catalog.path)
    } else {
        Catalog::load(&config.catalog.path).with_context(|| {
            format!("Failed to load catalog: {}", config.catalog.path.display())
        })?
    };
    let activity = ActivityLog::new(config.activity_log_path()?);
    let mut app = App::new(catalog, report, config).with_activity_log(activity);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        let now = Utc::now();
        app.tick(now);
        terminal.draw(|frame| draw(frame, app, now))?;

        // Handle input
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, Utc::now());
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

fn draw(frame: &mut Frame, app: &App, now: DateTime<Utc>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    match app.snapshot(now) {
        Some(snapshot) => draw_session(frame, &snapshot, chunks[1]),
        None => draw_welcome(frame, app, chunks[1]),
    }

    let footer = Paragraph::new(KEY_HELP)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled("Equipment: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.equipment.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled("  Focus: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.focus.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled("  | ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.status.clone()),
    ]);
    let header = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title("Quickfit"));
    frame.render_widget(header, area);
}

fn draw_welcome(frame: &mut Frame, app: &App, area: Rect) {
    let catalog = app.catalog();
    let text = vec![
        Line::from(Span::styled(
            "Quick Workout Generator",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} exercises from {}",
            catalog.len(),
            app.report().source
        )),
        Line::from(format!("Equipment: {}", catalog.equipment_types().join(", "))),
        Line::from(format!("Focus areas: {}", catalog.focus_areas().join(", "))),
        Line::from(""),
        Line::from("Press g to generate a workout"),
    ];
    let welcome = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Welcome"));
    frame.render_widget(welcome, area);
}

fn draw_session(frame: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Timer
            Constraint::Length(3), // Progress
            Constraint::Min(4),    // Exercise list
        ])
        .split(columns[0]);

    let colors = SessionColors::default();

    frame.render_widget(
        TimerWidget::new(snapshot)
            .colors(colors.clone())
            .block(Block::default().borders(Borders::ALL).title("Timer")),
        left[0],
    );

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(colors.completed))
        .ratio(snapshot.progress().clamp(0.0, 1.0))
        .label(format!(
            "{}/{} completed",
            snapshot.completed_count,
            snapshot.exercises.len()
        ));
    frame.render_widget(gauge, left[1]);

    frame.render_widget(
        ExerciseListWidget::new(snapshot)
            .colors(colors)
            .block(Block::default().borders(Borders::ALL).title("Exercises")),
        left[2],
    );

    draw_details(frame, snapshot, columns[1]);
}

fn draw_details(frame: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let exercise = snapshot.current();
    let heading = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            exercise.name.clone(),
            heading.fg(Color::Cyan),
        )),
        Line::from(exercise.description.clone()),
        Line::from(""),
        Line::from(format!(
            "Equipment: {}   Focus: {}   Duration: {}s",
            title_case(&exercise.equipment),
            title_case(&exercise.focus_area),
            exercise.duration_secs
        )),
        Line::from(format!("Muscles: {}", exercise.muscles_worked.join(", "))),
        Line::from(""),
        Line::from(Span::styled("Instructions", heading)),
    ];
    lines.extend(
        exercise
            .instructions
            .iter()
            .enumerate()
            .map(|(i, step)| Line::from(format!("  {}. {}", i + 1, step))),
    );
    if !exercise.tips.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Tips", heading)));
        lines.extend(
            exercise
                .tips
                .iter()
                .map(|tip| Line::from(format!("  • {}", tip))),
        );
    }

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Details"));
    frame.render_widget(details, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use quickfit_core::workout::WorkoutSelector;
    use ratatui::backend::TestBackend;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::seconds(secs)
    }

    fn screen(app: &App, now: DateTime<Utc>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal.draw(|frame| draw(frame, app, now)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        let (catalog, report) = Catalog::load_or_builtin("/nonexistent/exercises.json");
        App::new(catalog, report, Config::default()).with_selector(WorkoutSelector::with_seed(2))
    }

    #[test]
    fn test_welcome_screen() {
        let text = screen(&app(), t(0));
        assert!(text.contains("Press g to generate a workout"));
        assert!(text.contains("built-in exercises"));
        assert!(text.contains("q: Quit"));
    }

    #[test]
    fn test_session_screen() {
        let mut app = app();
        app.handle_key(KeyCode::Char('g'), t(0));
        app.handle_key(KeyCode::Char(' '), t(0));

        let text = screen(&app, t(3));
        assert!(text.contains("Timer"));
        assert!(text.contains("Progress"));
        assert!(text.contains("[Active]"));
        assert!(text.contains("Instructions"));
        assert!(text.contains("Running"));
    }
}
