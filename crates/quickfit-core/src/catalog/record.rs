//! Exercise record entity and duration normalization
//!
//! Records are built from loosely-typed JSON so that each rejection carries a
//! precise reason. Once constructed, a record is immutable and always has a
//! positive duration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Duration applied when a record omits `duration`
pub const DEFAULT_DURATION_SECS: u32 = 30;

/// Longest accepted exercise, one day
pub const MAX_DURATION_SECS: u32 = 24 * 60 * 60;

/// Fields every record must carry
pub const REQUIRED_FIELDS: &[&str] = &[
    "name",
    "description",
    "instructions",
    "muscles_worked",
    "equipment",
    "focus_area",
];

/// A single validated exercise from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Unique name (compared case-insensitively)
    pub name: String,

    /// Short description of the movement
    pub description: String,

    /// Ordered steps to perform the exercise
    pub instructions: Vec<String>,

    /// Form cues
    #[serde(default)]
    pub tips: Vec<String>,

    /// Muscles targeted, without duplicates
    pub muscles_worked: Vec<String>,

    /// Equipment tag (lowercase)
    pub equipment: String,

    /// Focus area tag (lowercase)
    pub focus_area: String,

    /// Work duration in seconds, always > 0
    #[serde(rename = "duration")]
    pub duration_secs: u32,
}

impl ExerciseRecord {
    /// Build a record from a raw JSON object, validating required fields and types
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| Error::InvalidRecord {
            name: "unknown".to_string(),
            reason: "record is not a JSON object".to_string(),
        })?;

        let display_name = obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let invalid = |reason: String| Error::InvalidRecord {
            name: display_name.clone(),
            reason,
        };

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !obj.contains_key(**f)) {
            return Err(invalid(format!("missing field '{}'", missing)));
        }

        let name = required_string(obj.get("name"), "name").map_err(&invalid)?;
        if name.trim().is_empty() {
            return Err(invalid("'name' must not be empty".to_string()));
        }
        let description = required_string(obj.get("description"), "description").map_err(&invalid)?;
        let equipment = required_string(obj.get("equipment"), "equipment").map_err(&invalid)?;
        let focus_area = required_string(obj.get("focus_area"), "focus_area").map_err(&invalid)?;
        let instructions = string_list(obj.get("instructions"), "instructions").map_err(&invalid)?;
        let mut muscles_worked =
            string_list(obj.get("muscles_worked"), "muscles_worked").map_err(&invalid)?;
        let tips = match obj.get("tips") {
            None | Some(Value::Null) => Vec::new(),
            other => string_list(other, "tips").map_err(&invalid)?,
        };

        let mut seen = std::collections::HashSet::new();
        muscles_worked.retain(|m| seen.insert(m.to_lowercase()));

        let duration_secs = match obj.get("duration") {
            None | Some(Value::Null) => DEFAULT_DURATION_SECS,
            Some(raw) => parse_duration_value(raw)?,
        };

        Ok(Self {
            name: name.trim().to_string(),
            description,
            instructions,
            tips,
            muscles_worked,
            equipment: normalize_tag(&equipment),
            focus_area: normalize_tag(&focus_area),
            duration_secs,
        })
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Duration rendered for humans, e.g. "45 seconds"
    pub fn duration_label(&self) -> String {
        if self.duration_secs == 1 {
            "1 second".to_string()
        } else {
            format!("{} seconds", self.duration_secs)
        }
    }
}

/// Lowercase and trim a tag value
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// "full_body" -> "Full Body"
pub fn title_case(tag: &str) -> String {
    tag.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Normalize a duration given as an integer or as "<number> <unit>" text
pub fn parse_duration_value(raw: &Value) -> Result<u32> {
    match raw {
        Value::Number(n) => {
            let secs = n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
                .ok_or_else(|| Error::InvalidDuration(n.to_string()))?;
            positive_secs(secs, &n.to_string())
        }
        Value::String(text) => parse_duration_text(text),
        other => Err(Error::InvalidDuration(other.to_string())),
    }
}

/// Parse "45", "45 seconds", "1 min", "2 minutes" into seconds
pub fn parse_duration_text(text: &str) -> Result<u32> {
    let mut parts = text.split_whitespace();
    let amount: u64 = parts
        .next()
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| Error::InvalidDuration(text.to_string()))?;

    let multiplier = match parts.next().map(str::to_lowercase).as_deref() {
        None | Some("s" | "sec" | "secs" | "second" | "seconds") => 1,
        Some("m" | "min" | "mins" | "minute" | "minutes") => 60,
        Some(_) => return Err(Error::InvalidDuration(text.to_string())),
    };
    if parts.next().is_some() {
        return Err(Error::InvalidDuration(text.to_string()));
    }

    positive_secs(amount.saturating_mul(multiplier), text)
}

fn positive_secs(secs: u64, original: &str) -> Result<u32> {
    match u32::try_from(secs) {
        Ok(s) if s > 0 && s <= MAX_DURATION_SECS => Ok(s),
        _ => Err(Error::InvalidDuration(original.to_string())),
    }
}

fn required_string(value: Option<&Value>, field: &str) -> std::result::Result<String, String> {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("'{}' must be a string", field))
}

fn string_list(value: Option<&Value>, field: &str) -> std::result::Result<Vec<String>, String> {
    let items = value
        .and_then(Value::as_array)
        .ok_or_else(|| format!("'{}' must be a list", field))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| format!("'{}' must contain only strings", field))
        })
        .collect()
}
