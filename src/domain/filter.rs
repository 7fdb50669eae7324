//! Transient query objects used to narrow an expense collection.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

/// Closed interval of instants; both ends inclusive.
///
/// `start <= end` is the caller's responsibility. An inverted range simply
/// matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl DateRange {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, at: &DateTime<FixedOffset>) -> bool {
        self.start <= *at && *at <= self.end
    }
}

/// Amount bounds; `min` is always enforced, `max` only when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceRange {
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self { min: 0.0, max: None }
    }
}

impl PriceRange {
    pub fn new(min: f64, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && self.max.map_or(true, |max| amount <= max)
    }

    pub fn is_default(&self) -> bool {
        self.min <= 0.0 && self.max.is_none()
    }
}

/// The four constraint families a view can be narrowed by.
///
/// Unknown fields are rejected when deserialising.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterSpec {
    #[serde(default)]
    pub date_range: Option<DateRange>,
    /// Empty means no category constraint.
    #[serde(default)]
    pub categories: BTreeSet<EntityId>,
    #[serde(default)]
    pub price_range: PriceRange,
    #[serde(default)]
    pub search_text: String,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_category(mut self, id: impl Into<EntityId>) -> Self {
        self.categories.insert(id.into());
        self
    }

    pub fn with_categories(mut self, ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.categories.extend(ids);
        self
    }

    pub fn with_price_range(mut self, min: f64, max: Option<f64>) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Lower-cased, trimmed search text, or `None` when the clause is inert.
    pub fn search_needle(&self) -> Option<String> {
        search_needle(&self.search_text)
    }

    /// True when any constraint family would exclude something.
    pub fn is_active(&self) -> bool {
        self.date_range.is_some()
            || !self.categories.is_empty()
            || !self.price_range.is_default()
            || self.search_needle().is_some()
    }
}

pub(crate) fn search_needle(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
