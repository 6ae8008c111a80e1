//! Derived display state for the dashboard panels. Nothing here touches the feed itself.

mod badges;
mod summary;
mod trending_query;

pub use badges::{AlertVariant, ChangeType, ConfidenceTier, HealthStatus, ReportedStatus};
pub use summary::{format_count, ActivitySummary};
pub use trending_query::{categories, CategoryFilter, TrendingQuery, TrendingSort};
