//! Quickfit CLI - quick workout generator and interval timer

use anyhow::Context;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use quickfit_core::catalog::{self, Catalog, ExerciseRecord, LoadReport, title_case};
use quickfit_core::config::Config;
use quickfit_core::export;
use quickfit_core::interval::{IntervalCycle, IntervalPhase, IntervalPlan, format_clock};
use quickfit_core::session::Session;
use quickfit_core::storage::IntervalLog;
use quickfit_core::workout::{Filter, WorkoutSelector, WorkoutStats};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "quickfit")]
#[command(author, version, about = "Quick workout generator and interval timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Exercise catalog file (overrides catalog.path)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a randomized workout
    Generate {
        /// Equipment filter, comma-separated (or "all")
        #[arg(short, long)]
        equipment: Option<String>,
        /// Focus areas, comma-separated, e.g. "lower,core" (or "all")
        #[arg(short, long)]
        focus: Option<String>,
        /// Seed for a reproducible selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Browse and edit the exercise catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Generate a workout and save it as a text plan
    Export {
        #[arg(short, long)]
        equipment: Option<String>,
        #[arg(short, long)]
        focus: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Output file (defaults to workout_YYYYMMDD_HHMMSS.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a work/break interval timer
    Interval {
        /// Work phase length in minutes
        #[arg(short, long)]
        work: Option<u32>,
        /// Break phase length in minutes
        #[arg(short, long = "break")]
        break_minutes: Option<u32>,
        /// Stop after this many work/break pairs
        #[arg(short, long)]
        cycles: Option<u32>,
        /// Interval log file
        #[arg(short, long)]
        log: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Run health check
    Doctor,

    /// Open the interactive workout runner
    Run,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all exercises
    List,
    /// List equipment types, focus areas and muscles
    Types,
    /// Show exercise details
    Show { name: String },
    /// Show catalog statistics
    Stats,
    /// Diagnose the catalog file structure
    Inspect,
    /// Add exercises from a JSON file (one record or a list)
    Add {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration
    List,
    /// Reset to defaults
    Reset,
    /// Show config file path
    Path,
}

/// Options shared by every command
struct CliContext {
    config: Config,
    catalog_path: PathBuf,
    format: OutputFormat,
    quiet: bool,
}

impl CliContext {
    fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn load_catalog(&self) -> anyhow::Result<(Catalog, LoadReport)> {
        let loaded = if self.config.catalog.use_builtin_fallback {
            Catalog::load_or_builtin(&self.catalog_path)
        } else {
            Catalog::load(&self.catalog_path).with_context(|| {
                format!("Failed to load catalog: {}", self.catalog_path.display())
            })?
        };
        let (_, report) = &loaded;
        if !self.quiet && !self.json() {
            for rejection in &report.rejected {
                eprintln!(
                    "Skipped exercise #{} '{}': {}",
                    rejection.index + 1,
                    rejection.name,
                    rejection.reason
                );
            }
        }
        Ok(loaded)
    }

    fn filters(&self, equipment: Option<&str>, focus: Option<&str>) -> (Filter, Filter) {
        (
            equipment.map_or_else(|| self.config.workout.equipment.clone(), Filter::parse),
            focus.map_or_else(|| self.config.workout.focus_area.clone(), Filter::parse),
        )
    }

    fn new_session(
        &self,
        equipment: Option<&str>,
        focus: Option<&str>,
        seed: Option<u64>,
    ) -> anyhow::Result<Session> {
        let (catalog, _) = self.load_catalog()?;
        let (equipment, focus) = self.filters(equipment, focus);
        let mut selector = match seed {
            Some(seed) => WorkoutSelector::with_seed(seed),
            None => WorkoutSelector::new(),
        };
        Ok(selector.new_session(&catalog, &equipment, &focus)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr keeps JSON output clean)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quickfit=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let quiet = cli.quiet;

    // Config is loaded lazily so `config` commands still work on a broken file
    let get_ctx = || -> anyhow::Result<CliContext> {
        let config = Config::load()?;
        Ok(CliContext {
            catalog_path: cli
                .catalog
                .clone()
                .unwrap_or_else(|| config.catalog.path.clone()),
            config,
            format: cli.format,
            quiet,
        })
    };

    match cli.command {
        Commands::Generate {
            ref equipment,
            ref focus,
            seed,
        } => cmd_generate(&get_ctx()?, equipment.as_deref(), focus.as_deref(), seed),

        Commands::Catalog { ref action } => cmd_catalog(&get_ctx()?, action),

        Commands::Export {
            ref equipment,
            ref focus,
            seed,
            ref output,
        } => cmd_export(
            &get_ctx()?,
            equipment.as_deref(),
            focus.as_deref(),
            seed,
            output.clone(),
        ),

        Commands::Interval {
            work,
            break_minutes,
            cycles,
            ref log,
        } => cmd_interval(&get_ctx()?, work, break_minutes, cycles, log.clone()).await,

        Commands::Config { ref action } => cmd_config(action, quiet),

        Commands::Doctor => cmd_doctor(&get_ctx()?),

        Commands::Run => cmd_run(quiet),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn cmd_generate(
    ctx: &CliContext,
    equipment: Option<&str>,
    focus: Option<&str>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let session = ctx.new_session(equipment, focus, seed)?;
    let stats = WorkoutStats::with_rest(session.exercises(), ctx.config.workout.rest_seconds);

    if ctx.json() {
        let output = json!({
            "exercises": session.exercises(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !ctx.quiet {
        println!("Your Quick Workout");
        println!("==================");
    }
    for (i, exercise) in session.exercises().iter().enumerate() {
        println!(
            "{}. {} ({}) - {} / {}",
            i + 1,
            exercise.name,
            exercise.duration_label(),
            title_case(&exercise.equipment),
            title_case(&exercise.focus_area)
        );
    }
    if let Some(stats) = stats.filter(|_| !ctx.quiet) {
        println!();
        println!(
            "Total: {} exercises, {:.1} minutes",
            stats.total_exercises, stats.total_duration_minutes
        );
        println!("Muscles: {}", stats.muscles_worked.join(", "));
        println!("\nStart it with `quickfit run` or save it with `quickfit export`.");
    }
    Ok(())
}

fn cmd_catalog(ctx: &CliContext, action: &CatalogAction) -> anyhow::Result<()> {
    match action {
        CatalogAction::List => {
            let (catalog, report) = ctx.load_catalog()?;
            if ctx.json() {
                println!("{}", catalog.to_json()?);
                return Ok(());
            }
            if !ctx.quiet {
                println!("Exercises ({}, from {}):", catalog.len(), report.source);
            }
            for exercise in catalog.iter() {
                println!(
                    "  {} - {}s ({}, {})",
                    exercise.name, exercise.duration_secs, exercise.equipment, exercise.focus_area
                );
            }
        }
        CatalogAction::Types => {
            let (catalog, _) = ctx.load_catalog()?;
            if ctx.json() {
                let output = json!({
                    "equipment": catalog.equipment_types(),
                    "focus_areas": catalog.focus_areas(),
                    "muscles_worked": catalog.muscles_worked(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }
            println!("Equipment: {}", catalog.equipment_types().join(", "));
            println!("Focus areas: {}", catalog.focus_areas().join(", "));
            println!("Muscles: {}", catalog.muscles_worked().join(", "));
        }
        CatalogAction::Show { name } => {
            let (catalog, _) = ctx.load_catalog()?;
            let exercise = catalog.get(name)?;
            if ctx.json() {
                println!("{}", serde_json::to_string_pretty(exercise)?);
            } else {
                print_exercise(exercise);
            }
        }
        CatalogAction::Stats => {
            let (catalog, _) = ctx.load_catalog()?;
            let stats = catalog_stats(&catalog);
            if ctx.json() {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("Exercises: {}", stats["exercises"]);
            println!("Total duration: {}s", stats["total_secs"]);
            println!("Average duration: {}s", stats["average_secs"]);
            for key in ["equipment", "focus_areas"] {
                println!("{}:", title_case(key));
                if let Some(counts) = stats[key].as_object() {
                    for (tag, count) in counts {
                        println!("  {}: {}", tag, count);
                    }
                }
            }
        }
        CatalogAction::Inspect => {
            let contents = fs::read_to_string(&ctx.catalog_path).with_context(|| {
                format!("Failed to read catalog: {}", ctx.catalog_path.display())
            })?;
            let inspection = catalog::inspect(&contents)?;
            if ctx.json() {
                println!("{}", serde_json::to_string_pretty(&inspection)?);
                return Ok(());
            }
            println!("Catalog: {}", ctx.catalog_path.display());
            println!("  Shape: {:?}", inspection.shape);
            println!("  Exercises: {}", inspection.exercise_count);
            println!(
                "  Fields: {}",
                inspection.fields.iter().cloned().collect::<Vec<_>>().join(", ")
            );
            println!("  Equipment:");
            for (tag, count) in &inspection.equipment_counts {
                println!("    {}: {}", tag, count);
            }
            println!("  Focus areas:");
            for (tag, count) in &inspection.focus_counts {
                println!("    {}: {}", tag, count);
            }
            if inspection.is_complete() {
                println!("[OK] All exercises have the required fields");
            } else {
                for (index, missing) in &inspection.missing_fields {
                    println!("[!!] Exercise #{} missing: {}", index + 1, missing.join(", "));
                }
            }
        }
        CatalogAction::Add { file } => {
            let (mut catalog, _) = ctx.load_catalog()?;
            let added = add_from_file(&mut catalog, file)?;
            catalog.save(&ctx.catalog_path)?;
            info!(added, path = %ctx.catalog_path.display(), "Catalog updated");
            if !ctx.quiet {
                println!(
                    "Added {} exercise(s) to {}",
                    added,
                    ctx.catalog_path.display()
                );
            }
        }
    }
    Ok(())
}

fn print_exercise(exercise: &ExerciseRecord) {
    println!("{}", exercise.name);
    println!("  Duration: {}", exercise.duration_label());
    println!("  Equipment: {}", title_case(&exercise.equipment));
    println!("  Focus Area: {}", title_case(&exercise.focus_area));
    println!("  Muscles: {}", exercise.muscles_worked.join(", "));
    println!("  Description: {}", exercise.description);
    println!("  Instructions:");
    for (i, step) in exercise.instructions.iter().enumerate() {
        println!("    {}. {}", i + 1, step);
    }
    if !exercise.tips.is_empty() {
        println!("  Tips:");
        for tip in &exercise.tips {
            println!("    • {}", tip);
        }
    }
}

fn catalog_stats(catalog: &Catalog) -> Value {
    let mut equipment: BTreeMap<&str, usize> = BTreeMap::new();
    let mut focus: BTreeMap<&str, usize> = BTreeMap::new();
    for exercise in catalog.iter() {
        *equipment.entry(exercise.equipment.as_str()).or_default() += 1;
        *focus.entry(exercise.focus_area.as_str()).or_default() += 1;
    }
    let total: u64 = catalog.iter().map(|e| u64::from(e.duration_secs)).sum();
    let average = if catalog.is_empty() {
        0
    } else {
        total / catalog.len() as u64
    };
    json!({
        "exercises": catalog.len(),
        "total_secs": total,
        "average_secs": average,
        "equipment": equipment,
        "focus_areas": focus,
    })
}

/// Validate and append records from a JSON file; nothing is added if any record fails
fn add_from_file(catalog: &mut Catalog, file: &Path) -> anyhow::Result<usize> {
    let contents = fs::read_to_string(file)
        .with_context(|| format!("Failed to read exercise file: {}", file.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid JSON in {}", file.display()))?;
    let items = match value {
        Value::Array(items) => items,
        single => vec![single],
    };

    let mut updated = catalog.clone();
    for item in &items {
        updated.add(ExerciseRecord::from_value(item)?)?;
    }
    *catalog = updated;
    Ok(items.len())
}

fn cmd_export(
    ctx: &CliContext,
    equipment: Option<&str>,
    focus: Option<&str>,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let session = ctx.new_session(equipment, focus, seed)?;
    let generated_at = Local::now();
    let snapshot = session.snapshot(Utc::now());

    let path = output.unwrap_or_else(|| PathBuf::from(export::default_file_name(generated_at)));
    if ctx.json() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, export::render_json(&snapshot)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        export::write_text(&snapshot, &path, generated_at)?;
    }

    if !ctx.quiet {
        println!("Workout exported to {}", path.display());
    }
    Ok(())
}

async fn cmd_interval(
    ctx: &CliContext,
    work: Option<u32>,
    break_minutes: Option<u32>,
    cycles: Option<u32>,
    log: Option<PathBuf>,
) -> anyhow::Result<()> {
    let plan = IntervalPlan::new(
        work.unwrap_or(ctx.config.interval.work_minutes),
        break_minutes.unwrap_or(ctx.config.interval.break_minutes),
    )?;
    let log = IntervalLog::new(match log {
        Some(path) => path,
        None => ctx.config.interval_log_path()?,
    });
    let mut cycle = IntervalCycle::new(plan);

    if !ctx.quiet {
        println!(
            "Interval timer: {} min work / {} min break. Press Ctrl+C to stop.",
            plan.work_minutes, plan.break_minutes
        );
    }
    info!(
        work = plan.work_minutes,
        break_minutes = plan.break_minutes,
        "Interval timer started"
    );

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let phase = cycle.phase();
        let mut remaining = cycle.phase_secs();
        let mut ticker = tokio::time::interval_at(
            tokio::time::Instant::now() + Duration::from_secs(1),
            Duration::from_secs(1),
        );

        while remaining > 0 {
            if !ctx.quiet {
                print!("\r{}: {}  ", phase, format_clock(remaining));
                std::io::stdout().flush()?;
            }
            tokio::select! {
                _ = ticker.tick() => remaining -= 1,
                _ = &mut ctrl_c => {
                    if !ctx.quiet {
                        println!(
                            "\nInterval timer stopped. Completed {} work session(s).",
                            cycle.completed_work()
                        );
                    }
                    return Ok(());
                }
            }
        }

        if let Err(e) = log.record(Local::now(), phase, plan.minutes(phase)) {
            warn!(error = %e, path = %log.path().display(), "Failed to write interval log");
        }
        cycle.complete_phase();

        if !ctx.quiet {
            match phase {
                IntervalPhase::Work => println!("\rWork session complete! Time for a break."),
                IntervalPhase::Break => println!("\rBreak over! Back to work."),
            }
        }

        if phase == IntervalPhase::Break
            && cycles.is_some_and(|limit| cycle.completed_work() >= limit)
        {
            break;
        }
    }

    if !ctx.quiet {
        println!(
            "Finished {} work session(s). Log: {}",
            cycle.completed_work(),
            log.path().display()
        );
    }
    Ok(())
}

fn cmd_config(action: &ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn cmd_doctor(ctx: &CliContext) -> anyhow::Result<()> {
    let quiet = ctx.quiet;
    if !quiet {
        println!("Quickfit Health Check");
        println!("=====================");
        println!();
    }

    let mut all_ok = true;

    match ctx.config.validate() {
        Ok(()) => {
            if !quiet {
                println!("[OK] Configuration: Valid");
            }
        }
        Err(e) => {
            all_ok = false;
            if !quiet {
                println!("[!!] Configuration: Error - {}", e);
            }
        }
    }

    if !quiet {
        match Config::config_path() {
            Ok(path) if path.exists() => println!("[OK] Config file: {}", path.display()),
            Ok(path) => println!("[--] Config file: {} (using defaults)", path.display()),
            Err(e) => println!("[!!] Config file: Error - {}", e),
        }
    }

    match Catalog::load(&ctx.catalog_path) {
        Ok((catalog, report)) => {
            if !quiet {
                println!(
                    "[OK] Catalog: {} exercises ({})",
                    catalog.len(),
                    ctx.catalog_path.display()
                );
                if !report.rejected.is_empty() {
                    println!(
                        "[!!] Catalog: {} invalid record(s) skipped",
                        report.rejected.len()
                    );
                    println!("     Run `quickfit catalog inspect` for details");
                }
            }
            if catalog.is_empty() {
                all_ok = false;
                if !quiet {
                    println!("[!!] Catalog: No valid exercises");
                }
            }
        }
        Err(e) => {
            if ctx.config.catalog.use_builtin_fallback {
                if !quiet {
                    println!("[--] Catalog: {} (using built-in exercises)", e);
                }
            } else {
                all_ok = false;
                if !quiet {
                    println!("[!!] Catalog: {}", e);
                }
            }
        }
    }

    if !quiet {
        for (label, path) in [
            ("Interval log", ctx.config.interval_log_path()),
            ("Activity log", ctx.config.activity_log_path()),
        ] {
            match path {
                Ok(path) => println!("[--] {}: {}", label, path.display()),
                Err(e) => println!("[!!] {}: Error - {}", label, e),
            }
        }
    }

    if !quiet {
        println!();
        if all_ok {
            println!("All checks passed!");
        } else {
            println!("Some checks failed. See above for details.");
        }
    }

    Ok(())
}

fn cmd_run(quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        info!("Starting workout runner...");
    }

    let result = std::process::Command::new("quickfit-tui").status();

    match result {
        Ok(status) if status.success() => Ok(()),
        Ok(_) => {
            if !quiet {
                println!("Workout runner exited with an error.");
            }
            Ok(())
        }
        Err(_) => {
            if !quiet {
                println!("Could not start the workout runner.");
                println!();
                println!("The binary 'quickfit-tui' is not in your PATH.");
                println!("Either:");
                println!("  1. Add the target/debug or target/release directory to PATH");
                println!("  2. Run `cargo run --bin quickfit-tui` from the project root");
                println!("  3. Install with `cargo install --path crates/quickfit-tui`");
            }
            Ok(())
        }
    }
}
