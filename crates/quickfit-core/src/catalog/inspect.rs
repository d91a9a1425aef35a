//! Structure diagnostics for raw catalog JSON
//!
//! Works on unvalidated input so it can explain why a file is rejected.

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::REQUIRED_FIELDS;
use super::loader::exercise_array;
use crate::error::{Error, Result};

/// Top-level shape of a catalog document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerShape {
    /// `[ {...}, {...} ]`
    List,
    /// `{ "exercises": [ ... ] }`
    Object,
}

/// Findings about a raw catalog document
#[derive(Debug, Clone, Serialize)]
pub struct CatalogInspection {
    pub shape: ContainerShape,
    pub exercise_count: usize,
    /// Every key seen on any record
    pub fields: BTreeSet<String>,
    /// Raw equipment values and how often they occur
    pub equipment_counts: BTreeMap<String, usize>,
    /// Raw focus area values and how often they occur
    pub focus_counts: BTreeMap<String, usize>,
    /// (record index, missing required fields) for incomplete records
    pub missing_fields: Vec<(usize, Vec<String>)>,
}

impl CatalogInspection {
    /// Whether every record has every required field
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }
}

/// Inspect raw catalog JSON without validating records
pub fn inspect(contents: &str) -> Result<CatalogInspection> {
    let root: Value =
        serde_json::from_str(contents).map_err(|e| Error::CatalogParse(e.to_string()))?;
    let shape = if root.is_array() {
        ContainerShape::List
    } else {
        ContainerShape::Object
    };
    let items = exercise_array(&root)?;

    let mut inspection = CatalogInspection {
        shape,
        exercise_count: items.len(),
        fields: BTreeSet::new(),
        equipment_counts: BTreeMap::new(),
        focus_counts: BTreeMap::new(),
        missing_fields: Vec::new(),
    };

    for (index, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            inspection
                .missing_fields
                .push((index, REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect()));
            continue;
        };

        inspection.fields.extend(obj.keys().cloned());

        if let Some(equipment) = obj.get("equipment").and_then(Value::as_str) {
            *inspection.equipment_counts.entry(equipment.to_string()).or_default() += 1;
        }
        if let Some(focus) = obj.get("focus_area").and_then(Value::as_str) {
            *inspection.focus_counts.entry(focus.to_string()).or_default() += 1;
        }

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|f| !obj.contains_key(**f))
            .map(|f| f.to_string())
            .collect();
        if !missing.is_empty() {
            inspection.missing_fields.push((index, missing));
        }
    }

    Ok(inspection)
}
