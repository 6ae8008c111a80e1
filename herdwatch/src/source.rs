//! Mock activity generation.
//!
//! Everything random lives behind [`DataSource`] so the simulator can be fed by a real ingestion
//! pipeline later without the view layer noticing.

use std::ops::Range;

use chrono::{DateTime, Utc};
use herdwatch_api_types::{Sample, TrendingEntry};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::{ConfigError, FeedConfig};

pub const VIEWS_RANGE: Range<u32> = 200..700;
pub const CARTS_RANGE: Range<u32> = 10..60;
pub const ACTIVITY_RANGE: Range<u32> = 400..700;
pub const BASELINE_RANGE: Range<u32> = 20..70;
pub const SPIKE_FACTOR_RANGE: Range<f64> = 10.0..20.0;
const PRODUCT_NUMBER_RANGE: Range<u32> = 0..1000;
const GENERATED_CATEGORY: &str = "Electronics";

/// Produces the raw values the simulator folds into its state
pub trait DataSource: Send {
    fn next_sample(&mut self, now: DateTime<Utc>) -> Sample;

    /// Called once per live tick, returning `Some` when a new product should start trending
    fn maybe_trending(&mut self, now: DateTime<Utc>) -> Option<TrendingEntry>;
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn next_sample(&mut self, now: DateTime<Utc>) -> Sample {
        (**self).next_sample(now)
    }

    fn maybe_trending(&mut self, now: DateTime<Utc>) -> Option<TrendingEntry> {
        (**self).maybe_trending(now)
    }
}

#[derive(Debug)]
pub struct RandomSource<R = StdRng> {
    rng: R,
    product_id: String,
    spike_probability: f64,
    last_id_millis: i64,
    id_sequence: u32,
}

impl RandomSource<StdRng> {
    /// Seeded from the OS when `seed` is `None`
    pub fn from_config(config: &FeedConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng, config)
    }
}

impl<R: Rng> RandomSource<R> {
    pub fn with_rng(rng: R, config: &FeedConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng,
            product_id: config.product_id.clone(),
            spike_probability: config.spike_probability,
            last_id_millis: i64::MIN,
            id_sequence: 0,
        })
    }

    fn next_trending_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        if millis == self.last_id_millis {
            self.id_sequence += 1;
            format!("p{millis}-{}", self.id_sequence)
        } else {
            self.last_id_millis = millis;
            self.id_sequence = 0;
            format!("p{millis}")
        }
    }
}

impl<R: Rng + Send> DataSource for RandomSource<R> {
    fn next_sample(&mut self, now: DateTime<Utc>) -> Sample {
        Sample {
            timestamp: now,
            views: self.rng.gen_range(VIEWS_RANGE),
            carts: self.rng.gen_range(CARTS_RANGE),
            product_id: self.product_id.clone(),
        }
    }

    fn maybe_trending(&mut self, now: DateTime<Utc>) -> Option<TrendingEntry> {
        if !self.rng.gen_bool(self.spike_probability) {
            return None;
        }
        let id = self.next_trending_id(now);
        Some(TrendingEntry {
            id,
            name: format!("Product {}", self.rng.gen_range(PRODUCT_NUMBER_RANGE)),
            category: GENERATED_CATEGORY.to_string(),
            current_activity: self.rng.gen_range(ACTIVITY_RANGE),
            baseline: self.rng.gen_range(BASELINE_RANGE),
            spike_factor: self.rng.gen_range(SPIKE_FACTOR_RANGE),
            timestamp: now,
        })
    }
}
