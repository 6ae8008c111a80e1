use std::cmp::Ordering;

use herdwatch_api_types::TrendingEntry;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum TrendingSort {
    /// Current activity relative to baseline
    #[default]
    SpikePercent,
    /// Deviation in standard deviations, as reported on the entry
    SpikeFactor,
    Activity,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn matches(&self, entry: &TrendingEntry) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => entry.category == *category,
        }
    }
}

/// Sort and filter selection of the trending monitor
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TrendingQuery {
    pub sort: TrendingSort,
    pub category: CategoryFilter,
}

impl TrendingQuery {
    /// Filters, then sorts highest first. Ties keep their feed order.
    pub fn apply<'a>(&self, entries: &'a [TrendingEntry]) -> Vec<&'a TrendingEntry> {
        entries
            .iter()
            .filter(|entry| self.category.matches(entry))
            .sorted_by(|a, b| self.compare(b, a))
            .collect()
    }

    fn compare(&self, a: &TrendingEntry, b: &TrendingEntry) -> Ordering {
        match self.sort {
            TrendingSort::SpikePercent => {
                // entries without a baseline have an unbounded spike
                let ratio = |e: &TrendingEntry| e.activity_ratio().unwrap_or(f64::INFINITY);
                ratio(a).total_cmp(&ratio(b))
            }
            TrendingSort::SpikeFactor => a.spike_factor.total_cmp(&b.spike_factor),
            TrendingSort::Activity => a.current_activity.cmp(&b.current_activity),
        }
    }
}

/// Distinct categories in first-seen order, for building the filter menu
pub fn categories(entries: &[TrendingEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.category.as_str()).unique().collect()
}
