mod activity;
mod snapshot;

pub mod alerts;
pub mod trending;

pub use activity::Sample;
pub use alerts::{Alert, AlertType};
pub use snapshot::{FeedMode, FeedSnapshot};
pub use trending::TrendingEntry;
