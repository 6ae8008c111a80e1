//! Fixed mock data the dashboard opens with.

use chrono::{DateTime, Duration, Utc};
use herdwatch_api_types::{Alert, AlertType, TrendingEntry};

use crate::{simulator::FeedState, source::DataSource};

/// Spacing between the back-filled samples of [`seeded_state`]
const HISTORY_STEP_SECONDS: i64 = 60;

fn product(
    id: &str,
    name: &str,
    category: &str,
    (current_activity, baseline, spike_factor): (u32, u32, f64),
    timestamp: DateTime<Utc>,
) -> TrendingEntry {
    TrendingEntry {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        current_activity,
        baseline,
        spike_factor,
        timestamp,
    }
}

pub fn trending_products(now: DateTime<Utc>) -> Vec<TrendingEntry> {
    vec![
        product(
            "p1",
            "Wireless AirPods Pro",
            "Electronics",
            (847, 45, 18.8),
            now,
        ),
        product(
            "p2",
            "Gaming Mechanical Keyboard",
            "Accessories",
            (623, 32, 19.5),
            now,
        ),
        product("p3", "Smart Home Hub", "Smart Home", (445, 28, 15.9), now),
    ]
}

pub fn alerts(now: DateTime<Utc>) -> Vec<Alert> {
    vec![
        Alert {
            id: "a1".to_string(),
            product_id: "p1".to_string(),
            product_name: "Wireless AirPods Pro".to_string(),
            alert_type: AlertType::Critical,
            message: "Activity spike detected: 1847% above baseline".to_string(),
            timestamp: now,
            severity: 9,
        },
        Alert {
            id: "a2".to_string(),
            product_id: "p2".to_string(),
            product_name: "Gaming Mechanical Keyboard".to_string(),
            alert_type: AlertType::Trending,
            message: "Trending up: 1950% increase in views".to_string(),
            timestamp: now - Duration::minutes(2),
            severity: 7,
        },
    ]
}

/// Seed products and alerts with an empty activity window
pub fn initial_state(now: DateTime<Utc>) -> FeedState {
    FeedState {
        samples: Default::default(),
        trending: trending_products(now).into(),
        alerts: alerts(now),
    }
}

/// Like [`initial_state`] but with a full window of one-minute-spaced history ending at `now`
pub fn seeded_state<S: DataSource>(source: &mut S, now: DateTime<Utc>, window: usize) -> FeedState {
    let mut state = initial_state(now);
    state.samples = (0..window)
        .rev()
        .map(|minutes_ago| {
            source.next_sample(now - Duration::seconds(HISTORY_STEP_SECONDS * minutes_ago as i64))
        })
        .collect();
    state
}

#[cfg(test)]
mod test {
    use chrono::{Duration, Utc};
    use itertools::Itertools;

    use super::{initial_state, seeded_state};
    use crate::{config::FeedConfig, source::RandomSource};

    #[test]
    fn test_initial_state() {
        let now = Utc::now();
        let state = initial_state(now);
        assert!(state.samples.is_empty());
        assert_eq!(state.trending.len(), 3);
        assert_eq!(state.trending[0].id, "p1");
        assert_eq!(state.alerts.len(), 2);
        assert_eq!(state.alerts[1].timestamp, now - Duration::minutes(2));
    }

    #[test]
    fn test_seeded_history_is_ordered() {
        let now = Utc::now();
        let config = FeedConfig::default();
        let mut source = RandomSource::from_config(&config, Some(1)).unwrap();
        let state = seeded_state(&mut source, now, config.window);
        assert_eq!(state.samples.len(), 30);
        assert_eq!(state.samples.back().unwrap().timestamp, now);
        assert_eq!(
            state.samples.front().unwrap().timestamp,
            now - Duration::minutes(29)
        );
        assert!(state
            .samples
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.timestamp < b.timestamp));
    }
}
