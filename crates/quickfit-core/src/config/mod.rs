//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::interval::MAX_PHASE_MINUTES;
use crate::workout::{DEFAULT_REST_SECS, Filter};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "QUICKFIT_CONFIG_DIR";

const KEYS: &[&str] = &[
    "catalog.path",
    "catalog.use_builtin_fallback",
    "workout.equipment",
    "workout.focus_area",
    "workout.auto_advance",
    "workout.auto_start_next",
    "workout.rest_seconds",
    "interval.work_minutes",
    "interval.break_minutes",
    "interval.log_path",
    "activity.log_path",
];

/// Quickfit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub workout: WorkoutConfig,
    pub interval: IntervalConfig,
    pub activity: ActivityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: PathBuf,
    pub use_builtin_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutConfig {
    pub equipment: Filter,
    pub focus_area: Filter,
    pub auto_advance: bool,
    pub auto_start_next: bool,
    pub rest_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalConfig {
    pub work_minutes: u32,
    pub break_minutes: u32,
    /// Defaults to `pomodoro_log.txt` in the config directory
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    /// Defaults to `activity.jsonl` in the config directory
    pub log_path: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("exercises.json"),
            use_builtin_fallback: true,
        }
    }
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            equipment: Filter::All,
            focus_area: Filter::All,
            auto_advance: true,
            auto_start_next: true,
            rest_seconds: DEFAULT_REST_SECS,
        }
    }
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
            log_path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            workout: WorkoutConfig::default(),
            interval: IntervalConfig::default(),
            activity: ActivityConfig::default(),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(anyhow!("Invalid boolean for {}: {} (use true or false)", key, value)),
    }
}

fn parse_minutes(key: &str, value: &str) -> anyhow::Result<u32> {
    let minutes: u32 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid {} value: {}", key, value))?;
    if minutes > MAX_PHASE_MINUTES {
        return Err(anyhow!("{} must be at most {}", key, MAX_PHASE_MINUTES));
    }
    Ok(minutes)
}

fn optional_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    (!value.is_empty()).then(|| PathBuf::from(value))
}

fn display_optional(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(default)".to_string())
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("quickfit")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.catalog.path.as_os_str().is_empty() {
            return Err(anyhow!("catalog.path must not be empty"));
        }
        if self.interval.work_minutes > MAX_PHASE_MINUTES
            || self.interval.break_minutes > MAX_PHASE_MINUTES
        {
            return Err(anyhow!(
                "Interval phases must be at most {} minutes",
                MAX_PHASE_MINUTES
            ));
        }
        if self.workout.rest_seconds > 600 {
            return Err(anyhow!("workout.rest_seconds must be at most 600"));
        }
        Ok(())
    }

    /// Where completed interval phases are logged
    pub fn interval_log_path(&self) -> anyhow::Result<PathBuf> {
        match &self.interval.log_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("pomodoro_log.txt")),
        }
    }

    /// Where session events are logged
    pub fn activity_log_path(&self) -> anyhow::Result<PathBuf> {
        match &self.activity.log_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("activity.jsonl")),
        }
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "catalog.path" => Ok(self.catalog.path.display().to_string()),
            "catalog.use_builtin_fallback" => Ok(self.catalog.use_builtin_fallback.to_string()),

            "workout.equipment" => Ok(self.workout.equipment.to_string()),
            "workout.focus_area" => Ok(self.workout.focus_area.to_string()),
            "workout.auto_advance" => Ok(self.workout.auto_advance.to_string()),
            "workout.auto_start_next" => Ok(self.workout.auto_start_next.to_string()),
            "workout.rest_seconds" => Ok(self.workout.rest_seconds.to_string()),

            "interval.work_minutes" => Ok(self.interval.work_minutes.to_string()),
            "interval.break_minutes" => Ok(self.interval.break_minutes.to_string()),
            "interval.log_path" => Ok(display_optional(&self.interval.log_path)),

            "activity.log_path" => Ok(display_optional(&self.activity.log_path)),

            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `quickfit config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "catalog.path" => {
                if value.trim().is_empty() {
                    return Err(anyhow!("catalog.path must not be empty"));
                }
                self.catalog.path = PathBuf::from(value.trim());
            }
            "catalog.use_builtin_fallback" => {
                self.catalog.use_builtin_fallback = parse_bool(key, value)?;
            }

            "workout.equipment" => self.workout.equipment = Filter::parse(value),
            "workout.focus_area" => self.workout.focus_area = Filter::parse(value),
            "workout.auto_advance" => self.workout.auto_advance = parse_bool(key, value)?,
            "workout.auto_start_next" => self.workout.auto_start_next = parse_bool(key, value)?,
            "workout.rest_seconds" => {
                let secs: u32 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid rest_seconds value: {}", value))?;
                if secs > 600 {
                    return Err(anyhow!("workout.rest_seconds must be at most 600"));
                }
                self.workout.rest_seconds = secs;
            }

            "interval.work_minutes" => self.interval.work_minutes = parse_minutes(key, value)?,
            "interval.break_minutes" => self.interval.break_minutes = parse_minutes(key, value)?,
            "interval.log_path" => self.interval.log_path = optional_path(value),

            "activity.log_path" => self.activity.log_path = optional_path(value),

            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `quickfit config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        KEYS.iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}
