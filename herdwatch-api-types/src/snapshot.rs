use serde::{Deserialize, Serialize};

use crate::{Alert, Sample, TrendingEntry};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    #[default]
    Live,
    Paused,
}

impl FeedMode {
    pub fn from_live(is_live: bool) -> Self {
        if is_live {
            FeedMode::Live
        } else {
            FeedMode::Paused
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, FeedMode::Live)
    }

    pub fn toggled(self) -> Self {
        match self {
            FeedMode::Live => FeedMode::Paused,
            FeedMode::Paused => FeedMode::Live,
        }
    }
}

/// Everything the view layer needs to render one frame of the dashboard
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    /// Oldest sample first
    pub samples: Vec<Sample>,
    /// Newest entry first
    pub trending: Vec<TrendingEntry>,
    pub alerts: Vec<Alert>,
    pub mode: FeedMode,
    /// Number of ticks that mutated the feed
    pub tick: u64,
}
