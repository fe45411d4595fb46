use std::sync::Arc;

use async_trait::async_trait;
use auth::Caller;
use auth::Page;
use chrono::Utc;

use crate::domain::alert::errors::AlertError;
use crate::domain::alert::models::Alert;
use crate::domain::alert::models::AlertFilter;
use crate::domain::alert::models::AlertId;
use crate::domain::alert::models::RaiseAlertCommand;
use crate::domain::alert::ports::AlertRepository;
use crate::domain::alert::ports::AlertServicePort;
use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::Sensor;
use crate::domain::sensor::models::SensorId;
use crate::domain::sensor::ports::SensorRepository;

/// Domain service implementation for alerts.
pub struct AlertService<AR, SR>
where
    AR: AlertRepository,
    SR: SensorRepository,
{
    repository: Arc<AR>,
    sensors: Arc<SR>,
}

impl<AR, SR> AlertService<AR, SR>
where
    AR: AlertRepository,
    SR: SensorRepository,
{
    pub fn new(repository: Arc<AR>, sensors: Arc<SR>) -> Self {
        Self {
            repository,
            sensors,
        }
    }

    async fn referenced_sensor(&self, caller: &Caller, id: &SensorId) -> Result<Sensor, AlertError> {
        match self.sensors.find_sensor(id).await? {
            Some(sensor) if caller.owns(sensor.owner_id) => Ok(sensor),
            _ => Err(SensorError::SensorNotFound(id.to_string()).into()),
        }
    }
}

#[async_trait]
impl<AR, SR> AlertServicePort for AlertService<AR, SR>
where
    AR: AlertRepository,
    SR: SensorRepository,
{
    async fn raise_alert(
        &self,
        caller: &Caller,
        command: RaiseAlertCommand,
    ) -> Result<Alert, AlertError> {
        let sensor = self.referenced_sensor(caller, &command.sensor_id).await?;

        let alert = Alert {
            id: AlertId::new(),
            owner_id: caller.id,
            sensor_id: sensor.id,
            hive_id: sensor.hive_id,
            alert_type: command.alert_type,
            message: command.message,
            is_resolved: false,
            resolved_at: None,
            created_at: Utc::now(),
            updated_at: None,
        };

        let created = self.repository.create_alert(alert).await?;
        tracing::info!(
            alert_id = %created.id,
            sensor_id = %created.sensor_id,
            alert_type = %created.alert_type.as_str(),
            "Alert raised"
        );

        Ok(created)
    }

    async fn list_alerts(
        &self,
        caller: &Caller,
        filter: AlertFilter,
        page: Page,
    ) -> Result<Vec<Alert>, AlertError> {
        if let Some(sensor_id) = filter.sensor_id {
            self.referenced_sensor(caller, &sensor_id).await?;
        }

        self.repository.list_alerts(&caller.id, filter, page).await
    }

    async fn resolve_alert(&self, caller: &Caller, id: &AlertId) -> Result<Alert, AlertError> {
        let mut alert = self
            .repository
            .find_alert(id)
            .await?
            .ok_or_else(|| AlertError::NotFound(id.to_string()))?;

        caller.ensure_owner(alert.owner_id)?;

        let now = Utc::now();
        if !alert.resolve(now) {
            return Ok(alert);
        }

        let resolved = self.repository.resolve_alert(id, now).await?;
        tracing::info!(alert_id = %resolved.id, resolved_by = %caller.username, "Alert resolved");

        Ok(resolved)
    }
}
