use async_trait::async_trait;
use auth::Caller;
use auth::Page;
use auth::UserId;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::alert::errors::AlertError;
use crate::domain::alert::models::Alert;
use crate::domain::alert::models::AlertFilter;
use crate::domain::alert::models::AlertId;
use crate::domain::alert::models::RaiseAlertCommand;

/// Port for alert operations.
#[async_trait]
pub trait AlertServicePort: Send + Sync + 'static {
    /// Raise an alert against one of the caller's sensors. The hive is taken
    /// from the sensor.
    ///
    /// # Errors
    /// * `Sensor(SensorNotFound)` - Sensor does not exist or belongs to someone else
    async fn raise_alert(&self, caller: &Caller, command: RaiseAlertCommand)
        -> Result<Alert, AlertError>;

    /// The caller's alerts, newest first.
    ///
    /// # Errors
    /// * `Sensor(SensorNotFound)` - Filtered sensor does not exist or belongs to someone else
    async fn list_alerts(
        &self,
        caller: &Caller,
        filter: AlertFilter,
        page: Page,
    ) -> Result<Vec<Alert>, AlertError>;

    /// Resolve an alert. Resolving twice is a no-op that keeps the first `resolved_at`.
    ///
    /// # Errors
    /// * `NotFound` - Alert does not exist
    /// * `Access(Forbidden)` - Alert belongs to someone else
    async fn resolve_alert(&self, caller: &Caller, id: &AlertId) -> Result<Alert, AlertError>;
}

/// Persistence operations for alerts.
#[async_trait]
pub trait AlertRepository: Send + Sync + 'static {
    async fn create_alert(&self, alert: Alert) -> Result<Alert, AlertError>;

    async fn find_alert(&self, id: &AlertId) -> Result<Option<Alert>, AlertError>;

    async fn list_alerts(
        &self,
        owner_id: &UserId,
        filter: AlertFilter,
        page: Page,
    ) -> Result<Vec<Alert>, AlertError>;

    /// Mark resolved, keeping an existing `resolved_at`, and return the stored row.
    ///
    /// # Errors
    /// * `NotFound` - Alert does not exist
    async fn resolve_alert(&self, id: &AlertId, at: DateTime<Utc>) -> Result<Alert, AlertError>;
}
