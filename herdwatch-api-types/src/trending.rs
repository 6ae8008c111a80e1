use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product experiencing an activity spike.
///
/// `spike_factor` is a display number only, it is never validated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub current_activity: u32,
    pub baseline: u32,
    pub spike_factor: f64,
    pub timestamp: DateTime<Utc>,
}

impl TrendingEntry {
    /// Ratio of current activity over the baseline, `None` when there is no baseline
    pub fn activity_ratio(&self) -> Option<f64> {
        (self.baseline > 0).then(|| self.current_activity as f64 / self.baseline as f64)
    }
}
