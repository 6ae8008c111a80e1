use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Spike,
    Trending,
    Critical,
}

impl AlertType {
    pub fn label(&self) -> &'static str {
        match self {
            AlertType::Spike => "SPIKE",
            AlertType::Trending => "TRENDING",
            AlertType::Critical => "CRITICAL",
        }
    }
}

/// Anomaly alert shown in the alerts panel.
/// Severity is nominally 0-10 but is not validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub severity: u8,
}
