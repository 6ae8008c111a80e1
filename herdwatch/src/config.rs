use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Tick interval must be greater than zero")]
    ZeroInterval,
    #[error("Sample window must hold at least one sample")]
    ZeroWindow,
    #[error("Trending list must hold at least one entry")]
    ZeroTrendingLimit,
    #[error("Spike probability {0} is not within 0.0..=1.0")]
    SpikeProbability(f64),
}

/// Settings for the simulated feed. Defaults mirror the dashboard: a tick every three seconds,
/// thirty samples on the chart, five trending products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub interval_ms: u64,
    pub window: usize,
    pub trending_limit: usize,
    pub spike_probability: f64,
    /// Product the activity window tracks
    pub product_id: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            window: 30,
            trending_limit: 5,
            spike_probability: 0.05,
            product_id: "p1".to_string(),
        }
    }
}

impl FeedConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.trending_limit == 0 {
            return Err(ConfigError::ZeroTrendingLimit);
        }
        if !(0.0..=1.0).contains(&self.spike_probability) {
            return Err(ConfigError::SpikeProbability(self.spike_probability));
        }
        Ok(())
    }
}
