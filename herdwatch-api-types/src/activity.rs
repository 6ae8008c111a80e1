use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One time-stamped activity measurement in the rolling window
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub views: u32,
    pub carts: u32,
    pub product_id: String,
}
