//! Convention registry: convention id to fractional year
//!
//! Temporal weighting needs a date per convention. Ids missing from the table
//! resolve to [`DEFAULT_YEAR`]; that is a policy choice, never an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Year used for conventions absent from the registry
pub const DEFAULT_YEAR: f64 = 2020.0;

/// Static mapping from convention id to fractional year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConventionRegistry {
    /// Fallback for unknown ids
    #[serde(default = "default_year")]
    pub default_year: f64,

    /// Known conventions
    #[serde(default)]
    pub years: BTreeMap<String, f64>,
}

fn default_year() -> f64 {
    DEFAULT_YEAR
}

impl Default for ConventionRegistry {
    /// Built-in table
    fn default() -> Self {
        Self::empty().with_year("51bdk", 2018.89)
    }
}

impl ConventionRegistry {
    /// Registry with no known conventions
    pub fn empty() -> Self {
        Self {
            default_year: DEFAULT_YEAR,
            years: BTreeMap::new(),
        }
    }

    /// Add or replace a convention
    pub fn with_year(mut self, convention: impl Into<String>, year: f64) -> Self {
        self.insert(convention, year);
        self
    }

    /// Add or replace a convention
    pub fn insert(&mut self, convention: impl Into<String>, year: f64) {
        self.years.insert(convention.into(), year);
    }

    /// Fractional year of a convention, falling back to the default year
    pub fn year(&self, convention: &str) -> f64 {
        self.years
            .get(convention)
            .copied()
            .unwrap_or(self.default_year)
    }

    /// Whether the convention is registered
    pub fn contains(&self, convention: &str) -> bool {
        self.years.contains_key(convention)
    }

    /// Registered conventions in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.years.iter().map(|(id, year)| (id.as_str(), *year))
    }

    /// Number of registered conventions
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Whether no convention is registered
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Merge another table over this one
    pub fn extend<I, K>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        for (id, year) in entries {
            self.insert(id, year);
        }
    }

    /// Validate the table
    ///
    /// Years divide the temporal factor, so they must be finite and positive.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.default_year.is_finite() && self.default_year > 0.0) {
            return Err(format!("default_year must be a positive year, got {}", self.default_year));
        }
        for (id, year) in &self.years {
            if !(year.is_finite() && *year > 0.0) {
                return Err(format!("year for convention '{}' must be positive, got {}", id, year));
            }
        }
        Ok(())
    }
}
