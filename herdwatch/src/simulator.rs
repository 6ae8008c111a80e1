use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use herdwatch_api_types::{Alert, FeedMode, FeedSnapshot, Sample, TrendingEntry};

use crate::{config::FeedConfig, source::DataSource};

/// State rendered by the dashboard. Samples are stored oldest first, trending entries newest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedState {
    pub samples: VecDeque<Sample>,
    pub trending: VecDeque<TrendingEntry>,
    pub alerts: Vec<Alert>,
}

impl FeedState {
    pub fn snapshot(&self, mode: FeedMode, tick: u64) -> FeedSnapshot {
        FeedSnapshot {
            samples: self.samples.iter().cloned().collect(),
            trending: self.trending.iter().cloned().collect(),
            alerts: self.alerts.clone(),
            mode,
            tick,
        }
    }
}

/// What a single live tick did to the state
#[derive(Clone, Debug, PartialEq)]
pub struct TickChanges {
    pub sample: Sample,
    pub evicted_samples: Vec<Sample>,
    pub trending: Option<TrendingEntry>,
    pub evicted_trending: Vec<TrendingEntry>,
}

/// Folds values from a [`DataSource`] into a bounded [`FeedState`]
#[derive(Debug)]
pub struct LiveFeedSimulator<S> {
    source: S,
    window: usize,
    trending_limit: usize,
}

impl<S: DataSource> LiveFeedSimulator<S> {
    pub fn new(source: S, config: &FeedConfig) -> Self {
        Self {
            source,
            window: config.window.max(1),
            trending_limit: config.trending_limit.max(1),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn trending_limit(&self) -> usize {
        self.trending_limit
    }

    /// Advances the feed by one tick stamped with the current time
    pub fn tick(&mut self, state: FeedState, is_live: bool) -> FeedState {
        self.tick_at(state, is_live, Utc::now())
    }

    /// A paused tick hands the state back untouched
    pub fn tick_at(&mut self, mut state: FeedState, is_live: bool, now: DateTime<Utc>) -> FeedState {
        self.apply(&mut state, is_live, now);
        state
    }

    /// In-place form of [`Self::tick_at`] that reports what changed, `None` when paused
    pub fn apply(
        &mut self,
        state: &mut FeedState,
        is_live: bool,
        now: DateTime<Utc>,
    ) -> Option<TickChanges> {
        if !is_live {
            return None;
        }
        let sample = self.source.next_sample(now);
        state.samples.push_back(sample.clone());
        let overflow = state.samples.len().saturating_sub(self.window);
        let evicted_samples = state.samples.drain(..overflow).collect::<Vec<_>>();

        let trending = self.source.maybe_trending(now);
        if let Some(entry) = &trending {
            state.trending.push_front(entry.clone());
        }
        // seeded lists can start above a small limit, so trim on every live tick
        let keep = state.trending.len().min(self.trending_limit);
        let evicted_trending: Vec<TrendingEntry> = state.trending.drain(keep..).collect();
        Some(TickChanges {
            sample,
            evicted_samples,
            trending,
            evicted_trending,
        })
    }
}
