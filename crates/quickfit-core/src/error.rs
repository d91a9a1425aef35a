//! Error types for Quickfit

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using Quickfit's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Quickfit error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Catalog errors (E001-E099)
    #[error("Exercise catalog not found at {}. Run `quickfit config set catalog.path <file>`.", .0.display())]
    CatalogNotFound(PathBuf),

    #[error("Could not parse exercise catalog: {0}. Run `quickfit catalog inspect` for details.")]
    CatalogParse(String),

    #[error("Invalid exercise '{name}': {reason}")]
    InvalidRecord { name: String, reason: String },

    #[error("Invalid duration '{0}'. Use seconds (45) or '<number> <unit>' (\"45 seconds\", \"1 minute\").")]
    InvalidDuration(String),

    #[error("Exercise '{0}' not found. Run `quickfit catalog list` to see all exercises.")]
    ExerciseNotFound(String),

    #[error("Exercise '{0}' already exists in the catalog.")]
    DuplicateExercise(String),

    // Selection errors (E100-E199)
    #[error("No exercises available: the catalog is empty.")]
    EmptySelection,

    // Session errors (E200-E299)
    #[error("Invalid session transition: {0}")]
    InvalidTransition(String),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::CatalogNotFound(_) => "E001",
            Self::CatalogParse(_) => "E002",
            Self::InvalidRecord { .. } => "E003",
            Self::InvalidDuration(_) => "E004",
            Self::ExerciseNotFound(_) => "E005",
            Self::DuplicateExercise(_) => "E006",
            Self::EmptySelection => "E100",
            Self::InvalidTransition(_) => "E200",
            Self::ConfigError(_) => "E600",
            Self::InvalidInput(_) => "E800",
            Self::Json(_) | Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::CatalogNotFound(_) => Some("quickfit config set catalog.path <file>".to_string()),
            Self::CatalogParse(_) => Some("quickfit catalog inspect".to_string()),
            Self::ExerciseNotFound(_) => Some("quickfit catalog list".to_string()),
            Self::EmptySelection => Some("quickfit config set catalog.use_builtin_fallback true".to_string()),
            Self::ConfigError(_) => Some("quickfit config list".to_string()),
            _ => None,
        }
    }

    /// Whether this error means a catalog record was unusable
    pub fn is_catalog_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRecord { .. } | Self::InvalidDuration(_) | Self::DuplicateExercise(_)
        )
    }
}
