use std::sync::Arc;

use async_trait::async_trait;
use auth::Caller;
use auth::Page;
use chrono::Utc;

use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::CreateSensorCommand;
use crate::domain::sensor::models::HiveId;
use crate::domain::sensor::models::Measurement;
use crate::domain::sensor::models::MeasurementId;
use crate::domain::sensor::models::RecordMeasurementCommand;
use crate::domain::sensor::models::Sensor;
use crate::domain::sensor::models::SensorId;
use crate::domain::sensor::models::SensorStats;
use crate::domain::sensor::models::TimeRange;
use crate::domain::sensor::ports::HiveDirectory;
use crate::domain::sensor::ports::SensorRepository;
use crate::domain::sensor::ports::SensorServicePort;

/// Domain service implementation for sensors and their measurements.
pub struct SensorService<SR, HD>
where
    SR: SensorRepository,
    HD: HiveDirectory,
{
    repository: Arc<SR>,
    hives: Arc<HD>,
}

impl<SR, HD> SensorService<SR, HD>
where
    SR: SensorRepository,
    HD: HiveDirectory,
{
    pub fn new(repository: Arc<SR>, hives: Arc<HD>) -> Self {
        Self { repository, hives }
    }

    async fn ensure_hive_referenced(&self, caller: &Caller, hive_id: &HiveId) -> Result<(), SensorError> {
        match self.hives.hive_owner(hive_id).await? {
            Some(owner_id) if caller.owns(owner_id) => Ok(()),
            _ => Err(SensorError::HiveNotFound(hive_id.to_string())),
        }
    }

    async fn load_owned(&self, caller: &Caller, id: &SensorId) -> Result<Sensor, SensorError> {
        let sensor = self
            .repository
            .find_sensor(id)
            .await?
            .ok_or_else(|| SensorError::SensorNotFound(id.to_string()))?;

        caller.ensure_owner(sensor.owner_id)?;
        Ok(sensor)
    }

    async fn load_referenced(&self, caller: &Caller, id: &SensorId) -> Result<Sensor, SensorError> {
        match self.repository.find_sensor(id).await? {
            Some(sensor) if caller.owns(sensor.owner_id) => Ok(sensor),
            _ => Err(SensorError::SensorNotFound(id.to_string())),
        }
    }
}

#[async_trait]
impl<SR, HD> SensorServicePort for SensorService<SR, HD>
where
    SR: SensorRepository,
    HD: HiveDirectory,
{
    async fn create_sensor(
        &self,
        caller: &Caller,
        command: CreateSensorCommand,
    ) -> Result<Sensor, SensorError> {
        self.ensure_hive_referenced(caller, &command.hive_id).await?;

        let sensor = Sensor {
            id: SensorId::new(),
            owner_id: caller.id,
            hive_id: command.hive_id,
            name: command.name,
            sensor_type: command.sensor_type,
            is_active: command.is_active,
            created_at: Utc::now(),
            updated_at: None,
        };

        let created = self.repository.create_sensor(sensor).await?;
        tracing::info!(
            sensor_id = %created.id,
            hive_id = %created.hive_id,
            sensor_type = %created.sensor_type.as_str(),
            "Sensor registered"
        );

        Ok(created)
    }

    async fn list_sensors(&self, caller: &Caller, page: Page) -> Result<Vec<Sensor>, SensorError> {
        self.repository.list_sensors_by_owner(&caller.id, page).await
    }

    async fn get_sensor(&self, caller: &Caller, id: &SensorId) -> Result<Sensor, SensorError> {
        self.load_owned(caller, id).await
    }

    async fn delete_sensor(&self, caller: &Caller, id: &SensorId) -> Result<(), SensorError> {
        self.load_owned(caller, id).await?;
        self.repository.delete_sensor(id).await?;
        tracing::info!(sensor_id = %id, owner_id = %caller.id, "Sensor deleted");

        Ok(())
    }

    async fn list_hive_sensors(
        &self,
        caller: &Caller,
        hive_id: &HiveId,
        page: Page,
    ) -> Result<Vec<Sensor>, SensorError> {
        self.ensure_hive_referenced(caller, hive_id).await?;
        self.repository.list_sensors_by_hive(hive_id, page).await
    }

    async fn sensor_stats(
        &self,
        caller: &Caller,
        id: &SensorId,
    ) -> Result<SensorStats, SensorError> {
        let sensor = self.load_owned(caller, id).await?;
        let summary = self.repository.measurement_summary(id).await?;

        Ok(SensorStats::new(sensor, summary))
    }

    async fn record_measurement(
        &self,
        caller: &Caller,
        command: RecordMeasurementCommand,
    ) -> Result<Measurement, SensorError> {
        let sensor = self.load_referenced(caller, &command.sensor_id).await?;

        let measurement = Measurement {
            id: MeasurementId::new(),
            sensor_id: sensor.id,
            value: command.value,
            battery_level: command.battery_level,
            created_at: Utc::now(),
            updated_at: None,
        };

        let created = self.repository.create_measurement(measurement).await?;
        tracing::debug!(sensor_id = %created.sensor_id, value = created.value, "Measurement recorded");

        Ok(created)
    }

    async fn list_measurements(
        &self,
        caller: &Caller,
        sensor_id: Option<SensorId>,
        page: Page,
    ) -> Result<Vec<Measurement>, SensorError> {
        match sensor_id {
            Some(sensor_id) => {
                self.load_referenced(caller, &sensor_id).await?;
                self.repository
                    .list_measurements_by_sensor(&sensor_id, TimeRange::default(), page)
                    .await
            }
            None => {
                self.repository
                    .list_measurements_by_owner(&caller.id, page)
                    .await
            }
        }
    }

    async fn sensor_measurements(
        &self,
        caller: &Caller,
        id: &SensorId,
        range: TimeRange,
        page: Page,
    ) -> Result<Vec<Measurement>, SensorError> {
        self.load_referenced(caller, id).await?;
        self.repository
            .list_measurements_by_sensor(id, range, page)
            .await
    }
}
