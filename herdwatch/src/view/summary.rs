use herdwatch_api_types::Sample;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Figures for the metric cards above the activity chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub samples: usize,
    pub total_views: u64,
    pub total_carts: u64,
    pub average_views: f64,
    pub average_carts: f64,
    pub peak_views: u32,
    /// Cart additions per view, zero when nothing was viewed
    pub conversion_rate: f64,
}

impl ActivitySummary {
    pub fn of(samples: &[Sample]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let total_views: u64 = samples.iter().map(|s| s.views as u64).sum();
        let total_carts: u64 = samples.iter().map(|s| s.carts as u64).sum();
        let count = samples.len() as f64;
        Self {
            samples: samples.len(),
            total_views,
            total_carts,
            average_views: total_views as f64 / count,
            average_carts: total_carts as f64 / count,
            peak_views: samples.iter().map(|s| s.views).max().unwrap_or_default(),
            conversion_rate: if total_views == 0 {
                0.0
            } else {
                total_carts as f64 / total_views as f64
            },
        }
    }
}

/// Groups digits by thousands, `12847` -> `12,847`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let bytes = digits.as_bytes();
    let head = bytes.len() % 3;
    let mut groups = vec![];
    if head > 0 {
        groups.push(&digits[..head]);
    }
    groups.extend(
        bytes[head..]
            .chunks(3)
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default()),
    );
    groups.into_iter().join(",")
}
