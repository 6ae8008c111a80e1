use herdwatch_api_types::{Alert, AlertType};
use serde::{Deserialize, Serialize};

/// Badge style for an alert
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum AlertVariant {
    Destructive,
    Default,
    Secondary,
}

impl AlertVariant {
    pub fn of(alert_type: AlertType, severity: u8) -> Self {
        if alert_type == AlertType::Critical || severity >= 8 {
            AlertVariant::Destructive
        } else if alert_type == AlertType::Trending || severity >= 6 {
            AlertVariant::Default
        } else {
            AlertVariant::Secondary
        }
    }

    pub fn for_alert(alert: &Alert) -> Self {
        Self::of(alert.alert_type, alert.severity)
    }
}

/// Status a health check reports about itself, before thresholds are considered
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum ReportedStatus {
    #[default]
    Healthy,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Error,
}

impl HealthStatus {
    /// Escalates past 70% and 90% of the threshold, whatever the check reported
    pub fn of(reported: ReportedStatus, value: f64, threshold: f64) -> Self {
        if reported == ReportedStatus::Error || value > threshold * 0.9 {
            HealthStatus::Error
        } else if reported == ReportedStatus::Warning || value > threshold * 0.7 {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceTier {
    Low,
    Fair,
    Good,
    High,
}

impl ConfidenceTier {
    /// `confidence` is a percentage
    pub fn of(confidence: f64) -> Self {
        match confidence {
            c if c >= 95.0 => ConfidenceTier::High,
            c if c >= 85.0 => ConfidenceTier::Good,
            c if c >= 75.0 => ConfidenceTier::Fair,
            _ => ConfidenceTier::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ChangeType {
    Positive,
    Negative,
    Neutral,
}

impl ChangeType {
    pub fn of(percent_change: f64) -> Self {
        if percent_change > 0.0 {
            ChangeType::Positive
        } else if percent_change < 0.0 {
            ChangeType::Negative
        } else {
            ChangeType::Neutral
        }
    }
}

#[cfg(test)]
mod test {
    use herdwatch_api_types::AlertType;

    use super::*;

    #[test]
    fn test_alert_variant() {
        assert_eq!(AlertVariant::of(AlertType::Critical, 0), AlertVariant::Destructive);
        assert_eq!(AlertVariant::of(AlertType::Spike, 8), AlertVariant::Destructive);
        assert_eq!(AlertVariant::of(AlertType::Trending, 2), AlertVariant::Default);
        assert_eq!(AlertVariant::of(AlertType::Spike, 6), AlertVariant::Default);
        assert_eq!(AlertVariant::of(AlertType::Spike, 5), AlertVariant::Secondary);
        // severity is not clamped
        assert_eq!(AlertVariant::of(AlertType::Spike, 200), AlertVariant::Destructive);
    }

    #[test]
    fn test_health_thresholds() {
        use ReportedStatus::*;
        assert_eq!(HealthStatus::of(Healthy, 45.2, 80.0), HealthStatus::Healthy);
        assert_eq!(HealthStatus::of(Healthy, 62.8, 85.0), HealthStatus::Warning);
        assert_eq!(HealthStatus::of(Healthy, 73.0, 80.0), HealthStatus::Error);
        assert_eq!(HealthStatus::of(Healthy, 69.0, 100.0), HealthStatus::Healthy);
        assert_eq!(HealthStatus::of(Warning, 1.0, 100.0), HealthStatus::Warning);
        assert_eq!(HealthStatus::of(Error, 1.0, 100.0), HealthStatus::Error);
    }

    #[test]
    fn test_confidence_and_change() {
        assert_eq!(ConfidenceTier::of(98.5), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::of(95.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::of(89.2), ConfidenceTier::Good);
        assert_eq!(ConfidenceTier::of(76.5), ConfidenceTier::Fair);
        assert_eq!(ConfidenceTier::of(12.0), ConfidenceTier::Low);

        assert_eq!(ChangeType::of(23.0), ChangeType::Positive);
        assert_eq!(ChangeType::of(-4.5), ChangeType::Negative);
        assert_eq!(ChangeType::of(0.0), ChangeType::Neutral);
    }
}
