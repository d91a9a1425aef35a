//! Tag filter with an `all` sentinel
//!
//! A filter is either unrestricted or a set of accepted tags. User input is a
//! comma-separated list such as `"lower,core"`; a record matches when its tag
//! is any one of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::catalog::normalize_tag;

/// Sentinel accepted in place of a tag
pub const ALL: &str = "all";

/// Separator between tags in filter input
pub const TAG_SEPARATOR: char = ',';

/// Equipment or focus-area criterion
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Filter {
    /// Matches every tag
    #[default]
    All,
    /// Matches any of these tags (lowercase, never empty)
    Any(BTreeSet<String>),
}

impl Filter {
    /// Parse user input; blank input or an `all` entry means no restriction
    pub fn parse(value: &str) -> Self {
        let tags: BTreeSet<String> = value
            .split(TAG_SEPARATOR)
            .map(normalize_tag)
            .filter(|tag| !tag.is_empty())
            .collect();
        if tags.is_empty() || tags.contains(ALL) {
            Self::All
        } else {
            Self::Any(tags)
        }
    }

    /// Filter for exactly one tag
    pub fn only(tag: &str) -> Self {
        let tag = normalize_tag(tag);
        if tag.is_empty() || tag == ALL {
            Self::All
        } else {
            Self::Any(BTreeSet::from([tag]))
        }
    }

    /// Check a record tag against this filter
    pub fn matches(&self, tag: &str) -> bool {
        match self {
            Self::All => true,
            Self::Any(wanted) => wanted.contains(&normalize_tag(tag)),
        }
    }

    /// Accepted tags in order; empty for `All`
    pub fn tags(&self) -> Vec<&str> {
        match self {
            Self::All => Vec::new(),
            Self::Any(tags) => tags.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Filter options for a set of observed tags: `all` followed by each tag
    pub fn options(tags: &[String]) -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(tags.iter().map(|t| Self::only(t)))
            .collect()
    }

    /// Next option after this one, wrapping around
    pub fn cycle(&self, tags: &[String]) -> Self {
        let options = Self::options(tags);
        let position = options.iter().position(|o| o == self).unwrap_or(0);
        options[(position + 1) % options.len()].clone()
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Any(_) => f.write_str(&self.tags().join(",")),
        }
    }
}
