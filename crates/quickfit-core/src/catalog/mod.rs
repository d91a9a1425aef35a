//! Exercise catalog
//!
//! An immutable, validated list of exercise records. Records are validated on
//! ingestion; anything malformed is reported and dropped before it can reach
//! the workout selector or a session.
//!
//! # Example
//!
//! ```ignore
//! use quickfit_core::catalog::Catalog;
//!
//! let (catalog, report) = Catalog::load("exercises.json")?;
//! println!("{} exercises ({} rejected)", catalog.len(), report.rejected.len());
//! ```

mod builtin;
mod inspect;
mod loader;
mod record;

pub use inspect::{CatalogInspection, ContainerShape, inspect};
pub use loader::{CatalogSource, LoadReport, Rejection};
pub use record::{
    DEFAULT_DURATION_SECS, ExerciseRecord, MAX_DURATION_SECS, REQUIRED_FIELDS, normalize_tag,
    parse_duration_text, parse_duration_value, title_case,
};

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::workout::Filter;

/// Validated, ordered collection of exercises with unique names
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    exercises: Vec<ExerciseRecord>,
}

impl Catalog {
    /// Build a catalog from already-constructed records.
    ///
    /// Fails on a zero duration or a case-insensitive duplicate name.
    pub fn from_records(records: Vec<ExerciseRecord>) -> Result<Self> {
        let mut catalog = Self::default();
        for record in records {
            catalog.add(record)?;
        }
        Ok(catalog)
    }

    /// The built-in four-exercise catalog
    pub fn builtin() -> Self {
        Self {
            exercises: builtin::exercises(),
        }
    }

    /// All exercises in catalog order
    pub fn exercises(&self) -> &[ExerciseRecord] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExerciseRecord> {
        self.exercises.iter()
    }

    /// Distinct equipment tags, sorted
    pub fn equipment_types(&self) -> Vec<String> {
        self.distinct(|e| std::iter::once(e.equipment.as_str()))
    }

    /// Distinct focus area tags, sorted
    pub fn focus_areas(&self) -> Vec<String> {
        self.distinct(|e| std::iter::once(e.focus_area.as_str()))
    }

    /// Distinct muscles across all exercises, sorted
    pub fn muscles_worked(&self) -> Vec<String> {
        self.distinct(|e| e.muscles_worked.iter().map(String::as_str))
    }

    /// Find an exercise by name, ignoring case
    pub fn find(&self, name: &str) -> Option<&ExerciseRecord> {
        self.exercises.iter().find(|e| e.is_named(name))
    }

    /// Like [`Catalog::find`] but returns `ExerciseNotFound`
    pub fn get(&self, name: &str) -> Result<&ExerciseRecord> {
        self.find(name)
            .ok_or_else(|| Error::ExerciseNotFound(name.trim().to_string()))
    }

    /// Exercises matching both filters, in catalog order
    pub fn filter(&self, equipment: &Filter, focus: &Filter) -> Vec<&ExerciseRecord> {
        self.exercises
            .iter()
            .filter(|e| equipment.matches(&e.equipment) && focus.matches(&e.focus_area))
            .collect()
    }

    /// Append a custom exercise
    pub fn add(&mut self, record: ExerciseRecord) -> Result<()> {
        if record.duration_secs == 0 {
            return Err(Error::InvalidDuration("0".to_string()));
        }
        if self.find(&record.name).is_some() {
            return Err(Error::DuplicateExercise(record.name));
        }
        tracing::debug!(name = %record.name, "Exercise added to catalog");
        self.exercises.push(record);
        Ok(())
    }

    fn distinct<'a, F, I>(&'a self, tags: F) -> Vec<String>
    where
        F: Fn(&'a ExerciseRecord) -> I,
        I: Iterator<Item = &'a str>,
    {
        self.exercises
            .iter()
            .flat_map(tags)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.equipment_types(), vec!["bodyweight"]);
        assert_eq!(
            catalog.focus_areas(),
            vec!["core", "full_body", "lower", "upper"]
        );
        assert!(catalog.muscles_worked().contains(&"Glutes".to_string()));
    }

    #[test]
    fn test_find_case_insensitive() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find("push-up").map(|e| e.duration_secs), Some(30));
        assert!(catalog.find("burpee").is_none());
        assert!(matches!(
            catalog.get("burpee"),
            Err(Error::ExerciseNotFound(name)) if name == "burpee"
        ));
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut catalog = Catalog::builtin();
        let mut plank = catalog.get("Plank").unwrap().clone();
        plank.name = "PLANK".to_string();
        assert!(matches!(catalog.add(plank), Err(Error::DuplicateExercise(_))));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_add_rejects_zero_duration() {
        let mut catalog = Catalog::default();
        let mut plank = Catalog::builtin().get("Plank").unwrap().clone();
        plank.duration_secs = 0;
        assert!(catalog.add(plank).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_filter_and_semantics() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.filter(&Filter::All, &Filter::All).len(), 4);
        let core = catalog.filter(&Filter::parse("bodyweight"), &Filter::parse("core"));
        assert_eq!(core.len(), 1);
        assert_eq!(core[0].name, "Plank");
        assert!(catalog.filter(&Filter::parse("dumbbells"), &Filter::parse("core")).is_empty());
    }

    #[test]
    fn test_from_records() {
        let records = Catalog::builtin().exercises().to_vec();
        let catalog = Catalog::from_records(records.clone()).unwrap();
        assert_eq!(catalog.len(), 4);

        let mut doubled = records.clone();
        doubled.extend(records);
        assert!(Catalog::from_records(doubled).is_err());
    }
}
