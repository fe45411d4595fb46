use std::fmt;

use auth::UserId;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::alert::errors::AlertError;
use crate::domain::sensor::errors::IdError;
use crate::domain::sensor::errors::LabelError;
use crate::domain::sensor::models::HiveId;
use crate::domain::sensor::models::SensorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertId(pub Uuid);

impl AlertId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s)
            .map(AlertId)
            .map_err(|e| IdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Alert category such as `temperature_high` or `battery_low`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertType(String);

impl AlertType {
    const MAX_LENGTH: usize = 50;

    pub fn new(alert_type: String) -> Result<Self, LabelError> {
        let trimmed = alert_type.trim();
        if trimmed.is_empty() {
            return Err(LabelError::Empty { field: "Alert type" });
        }

        let actual = trimmed.chars().count();
        if actual > Self::MAX_LENGTH {
            return Err(LabelError::TooLong {
                field: "Alert type",
                max: Self::MAX_LENGTH,
                actual,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub owner_id: UserId,
    pub sensor_id: SensorId,
    pub hive_id: HiveId,
    pub alert_type: AlertType,
    pub message: String,
    pub is_resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Mark resolved at `at`. Returns false, leaving the alert untouched,
    /// when it was already resolved.
    pub fn resolve(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_resolved {
            return false;
        }

        self.is_resolved = true;
        self.resolved_at = Some(at);
        self.updated_at = Some(at);
        true
    }
}

#[derive(Debug, Clone)]
pub struct RaiseAlertCommand {
    pub sensor_id: SensorId,
    pub alert_type: AlertType,
    pub message: String,
}

impl RaiseAlertCommand {
    pub fn new(
        sensor_id: SensorId,
        alert_type: AlertType,
        message: String,
    ) -> Result<Self, AlertError> {
        if message.trim().is_empty() {
            return Err(AlertError::EmptyMessage);
        }

        Ok(Self {
            sensor_id,
            alert_type,
            message,
        })
    }
}

/// Optional narrowing of an alert listing. Always scoped to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertFilter {
    pub sensor_id: Option<SensorId>,
    pub hive_id: Option<HiveId>,
    pub active_only: bool,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        self.sensor_id.map_or(true, |id| alert.sensor_id == id)
            && self.hive_id.map_or(true, |id| alert.hive_id == id)
            && !(self.active_only && alert.is_resolved)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn open_alert() -> Alert {
        Alert {
            id: AlertId::new(),
            owner_id: UserId::new(),
            sensor_id: SensorId::new(),
            hive_id: HiveId(Uuid::new_v4()),
            alert_type: AlertType::new("battery_low".to_string()).unwrap(),
            message: "Battery at 15%".to_string(),
            is_resolved: false,
            resolved_at: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_resolve_keeps_first_resolution_time() {
        let mut alert = open_alert();
        let first = Utc::now();

        assert!(alert.resolve(first));
        assert!(!alert.resolve(first + Duration::minutes(5)));
        assert!(alert.is_resolved);
        assert_eq!(alert.resolved_at, Some(first));
    }

    #[test]
    fn test_filter_matches() {
        let mut alert = open_alert();
        let other_sensor = AlertFilter {
            sensor_id: Some(SensorId::new()),
            ..Default::default()
        };
        let active = AlertFilter {
            active_only: true,
            ..Default::default()
        };

        assert!(AlertFilter::default().matches(&alert));
        assert!(!other_sensor.matches(&alert));
        assert!(active.matches(&alert));

        alert.resolve(Utc::now());
        assert!(!active.matches(&alert));
    }

    #[test]
    fn test_blank_message_rejected() {
        let result = RaiseAlertCommand::new(
            SensorId::new(),
            AlertType::new("temperature_high".to_string()).unwrap(),
            "  ".to_string(),
        );

        assert!(matches!(result, Err(AlertError::EmptyMessage)));
    }
}
