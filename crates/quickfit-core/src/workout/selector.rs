//! Randomized workout selection
//!
//! Filters the catalog by equipment and focus area (AND between the two, any
//! listed tag within each), falls back
//! to the whole catalog when nothing matches, and draws between
//! [`MIN_EXERCISES`] and [`MAX_EXERCISES`] exercises without replacement.

use rand::prelude::*;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::Filter;
use crate::catalog::{Catalog, ExerciseRecord};
use crate::error::{Error, Result};
use crate::session::Session;

/// Smallest session the selector builds when the catalog allows it
pub const MIN_EXERCISES: usize = 4;

/// Largest session the selector builds
pub const MAX_EXERCISES: usize = 6;

/// Draws workouts from a catalog using an injectable random source
#[derive(Debug, Clone)]
pub struct WorkoutSelector<R = ChaCha8Rng> {
    rng: R,
}

impl WorkoutSelector<ChaCha8Rng> {
    /// Create a selector seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Create a selector with a fixed seed (for reproducible workouts)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for WorkoutSelector<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> WorkoutSelector<R> {
    /// Use any random source
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Select the exercise list for a new workout.
    ///
    /// Returns `EmptySelection` only when the catalog itself is empty.
    pub fn select(
        &mut self,
        catalog: &Catalog,
        equipment: &Filter,
        focus: &Filter,
    ) -> Result<Vec<ExerciseRecord>> {
        if catalog.is_empty() {
            return Err(Error::EmptySelection);
        }

        let mut eligible = catalog.filter(equipment, focus);
        if eligible.is_empty() {
            info!(
                equipment = %equipment,
                focus = %focus,
                "No exercises match filters, using the full catalog"
            );
            eligible = catalog.iter().collect();
        }

        if eligible.len() < MIN_EXERCISES {
            debug!(count = eligible.len(), "Fewer eligible exercises than a full workout");
            return Ok(eligible.into_iter().cloned().collect());
        }

        let size = eligible.len().min(MAX_EXERCISES);
        let picked: Vec<ExerciseRecord> = index::sample(&mut self.rng, eligible.len(), size)
            .into_iter()
            .map(|i| eligible[i].clone())
            .collect();

        debug!(
            size,
            eligible = eligible.len(),
            "Workout selected"
        );
        Ok(picked)
    }

    /// Select exercises and wrap them in a fresh, not-yet-started session
    pub fn new_session(
        &mut self,
        catalog: &Catalog,
        equipment: &Filter,
        focus: &Filter,
    ) -> Result<Session> {
        let exercises = self.select(catalog, equipment, focus)?;
        Session::new(exercises)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn record(name: &str, equipment: &str, focus: &str) -> ExerciseRecord {
        ExerciseRecord {
            name: name.to_string(),
            description: format!("{} description", name),
            instructions: vec!["Move".to_string()],
            tips: Vec::new(),
            muscles_worked: vec!["Core".to_string()],
            equipment: equipment.to_string(),
            focus_area: focus.to_string(),
            duration_secs: 30,
        }
    }

    fn catalog(specs: &[(&str, &str)], count_each: usize) -> Catalog {
        let mut records = Vec::new();
        for (equipment, focus) in specs {
            for i in 0..count_each {
                records.push(record(&format!("{}-{}-{}", equipment, focus, i), equipment, focus));
            }
        }
        Catalog::from_records(records).unwrap()
    }

    #[test]
    fn test_select_bounds_and_filters() {
        let catalog = catalog(
            &[("bodyweight", "core"), ("dumbbells", "core"), ("dumbbells", "lower")],
            5,
        );
        let equipment = Filter::parse("dumbbells");
        let focus = Filter::parse("core");

        for seed in 0..50 {
            let mut selector = WorkoutSelector::with_seed(seed);
            let picked = selector.select(&catalog, &equipment, &focus).unwrap();

            assert!((MIN_EXERCISES..=MAX_EXERCISES).contains(&picked.len()));
            assert_eq!(picked.len(), 5);
            let names: HashSet<_> = picked.iter().map(|e| e.name.clone()).collect();
            assert_eq!(names.len(), picked.len(), "no duplicates");
            assert!(picked.iter().all(|e| e.equipment == "dumbbells" && e.focus_area == "core"));
        }
    }

    #[test]
    fn test_multiple_focus_areas_draw_from_union() {
        let catalog = catalog(
            &[
                ("bodyweight", "core"),
                ("bodyweight", "lower"),
                ("bodyweight", "upper"),
                ("dumbbells", "lower"),
            ],
            2,
        );
        let equipment = Filter::parse("bodyweight");
        let focus = Filter::parse("lower, core");

        let mut seen = HashSet::new();
        for seed in 0..20 {
            let picked = WorkoutSelector::with_seed(seed)
                .select(&catalog, &equipment, &focus)
                .unwrap();
            // Two core plus two lower bodyweight exercises are eligible
            assert_eq!(picked.len(), 4);
            assert!(picked.iter().all(|e| e.equipment == "bodyweight"));
            assert!(picked.iter().all(|e| e.focus_area != "upper"));
            seen.extend(picked.iter().map(|e| e.focus_area.clone()));
        }
        assert_eq!(seen, HashSet::from(["core".to_string(), "lower".to_string()]));
    }

    #[test]
    fn test_focus_list_with_unknown_tag_keeps_known_ones() {
        let catalog = catalog(&[("bodyweight", "core"), ("bodyweight", "upper")], 3);
        let picked = WorkoutSelector::with_seed(4)
            .select(&catalog, &Filter::All, &Filter::parse("core,cardio"))
            .unwrap();
        let names: Vec<_> = picked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["bodyweight-core-0", "bodyweight-core-1", "bodyweight-core-2"]
        );
    }

    #[test]
    fn test_select_caps_at_max() {
        let catalog = catalog(&[("bodyweight", "core")], 20);
        let mut selector = WorkoutSelector::with_seed(7);
        let picked = selector.select(&catalog, &Filter::All, &Filter::All).unwrap();
        assert_eq!(picked.len(), MAX_EXERCISES);
    }

    #[test]
    fn test_small_match_returned_as_is() {
        let mut records = vec![
            record("A", "dumbbells", "upper"),
            record("B", "dumbbells", "upper"),
        ];
        records.extend((0..6).map(|i| record(&format!("BW{}", i), "bodyweight", "core")));
        let catalog = Catalog::from_records(records).unwrap();

        let mut selector = WorkoutSelector::with_seed(1);
        let picked = selector
            .select(&catalog, &Filter::parse("dumbbells"), &Filter::All)
            .unwrap();
        let names: Vec<_> = picked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_no_match_falls_back_to_catalog() {
        let catalog = catalog(&[("bodyweight", "core"), ("bodyweight", "lower")], 4);
        let mut selector = WorkoutSelector::with_seed(3);
        let picked = selector
            .select(&catalog, &Filter::parse("dumbbells"), &Filter::All)
            .unwrap();
        assert!((MIN_EXERCISES..=MAX_EXERCISES).contains(&picked.len()));
        assert!(picked.iter().all(|e| e.equipment == "bodyweight"));
    }

    #[test]
    fn test_tiny_catalog_fallback_returns_everything() {
        let catalog = catalog(&[("bodyweight", "core")], 2);
        let mut selector = WorkoutSelector::with_seed(3);
        let picked = selector
            .select(&catalog, &Filter::parse("bands"), &Filter::parse("upper"))
            .unwrap();
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        let mut selector = WorkoutSelector::with_seed(3);
        let result = selector.select(&Catalog::default(), &Filter::All, &Filter::All);
        assert!(matches!(result, Err(Error::EmptySelection)));
    }

    #[test]
    fn test_same_seed_same_workout() {
        let catalog = catalog(&[("bodyweight", "core")], 12);
        let a = WorkoutSelector::with_seed(42)
            .select(&catalog, &Filter::All, &Filter::All)
            .unwrap();
        let b = WorkoutSelector::with_seed(42)
            .select(&catalog, &Filter::All, &Filter::All)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_new_session_is_not_started() {
        let mut selector = WorkoutSelector::with_seed(9);
        let session = selector
            .new_session(&Catalog::builtin(), &Filter::All, &Filter::All)
            .unwrap();
        assert_eq!(session.len(), 4);
        assert!(!session.is_started());
    }
}
