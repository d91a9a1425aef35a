//! Catalog file loading and saving
//!
//! Accepts either a top-level JSON array of exercises or an object with an
//! `exercises` array. Invalid records are skipped and listed in the
//! [`LoadReport`].

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{Catalog, ExerciseRecord};
use crate::error::{Error, Result};

/// Where a catalog came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// Loaded from a file on disk
    File(PathBuf),
    /// Parsed from an in-memory string
    Inline,
    /// Built-in fallback exercises
    Builtin,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline => write!(f, "inline"),
            Self::Builtin => write!(f, "built-in exercises"),
        }
    }
}

/// A record that failed validation
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    /// Position in the source array
    pub index: usize,
    /// Name if one could be read
    pub name: String,
    pub reason: String,
}

/// Outcome of a catalog load
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub source: CatalogSource,
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
    /// Set when the fallback catalog replaced an unreadable file
    pub fallback_reason: Option<String>,
}

impl LoadReport {
    fn new(source: CatalogSource) -> Self {
        Self {
            source,
            accepted: 0,
            rejected: Vec::new(),
            fallback_reason: None,
        }
    }

    pub fn used_fallback(&self) -> bool {
        self.source == CatalogSource::Builtin
    }
}

/// Extract the exercise array from either supported container shape
pub(super) fn exercise_array(root: &Value) -> Result<&Vec<Value>> {
    match root {
        Value::Array(items) => Ok(items),
        Value::Object(map) => match map.get("exercises") {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(Error::CatalogParse("'exercises' must be a list".to_string())),
            None => Err(Error::CatalogParse("no 'exercises' key found in JSON object".to_string())),
        },
        _ => Err(Error::CatalogParse(
            "JSON is neither a list nor an object with an 'exercises' key".to_string(),
        )),
    }
}

impl Catalog {
    /// Parse and validate a catalog from JSON text
    pub fn from_json_str(contents: &str) -> Result<(Self, LoadReport)> {
        Self::parse(contents, CatalogSource::Inline)
    }

    /// Load and validate a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, LoadReport)> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::CatalogNotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        let (catalog, report) = Self::parse(&contents, CatalogSource::File(path.to_path_buf()))?;
        info!(
            path = %path.display(),
            accepted = report.accepted,
            rejected = report.rejected.len(),
            "Exercise catalog loaded"
        );
        Ok((catalog, report))
    }

    /// Load a catalog file, substituting the built-in exercises when the file
    /// is missing or cannot be parsed.
    ///
    /// Files that parse but contain no valid records are NOT replaced; an empty
    /// catalog is reported as such.
    pub fn load_or_builtin(path: impl AsRef<Path>) -> (Self, LoadReport) {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Using built-in exercises");
                let catalog = Self::builtin();
                let mut report = LoadReport::new(CatalogSource::Builtin);
                report.accepted = catalog.len();
                report.fallback_reason = Some(e.to_string());
                (catalog, report)
            }
        }
    }

    /// Write the catalog as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), exercises = self.len(), "Exercise catalog saved");
        Ok(())
    }

    /// Serialize to pretty JSON (array form)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.exercises)?)
    }

    fn parse(contents: &str, source: CatalogSource) -> Result<(Self, LoadReport)> {
        let root: Value =
            serde_json::from_str(contents).map_err(|e| Error::CatalogParse(e.to_string()))?;
        let items = exercise_array(&root)?;

        let mut catalog = Self::default();
        let mut report = LoadReport::new(source);

        for (index, item) in items.iter().enumerate() {
            let outcome = ExerciseRecord::from_value(item).and_then(|r| catalog.add(r));
            if let Err(e) = outcome {
                let name = item
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string();
                warn!(index, name = %name, error = %e, "Invalid exercise data skipped");
                report.rejected.push(Rejection {
                    index,
                    name,
                    reason: e.to_string(),
                });
            }
        }

        report.accepted = catalog.len();
        Ok((catalog, report))
    }
}
