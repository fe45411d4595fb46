use async_trait::async_trait;
use auth::Caller;
use auth::Page;
use auth::UserId;

use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::CreateSensorCommand;
use crate::domain::sensor::models::HiveId;
use crate::domain::sensor::models::Measurement;
use crate::domain::sensor::models::MeasurementSummary;
use crate::domain::sensor::models::RecordMeasurementCommand;
use crate::domain::sensor::models::Sensor;
use crate::domain::sensor::models::SensorId;
use crate::domain::sensor::models::SensorStats;
use crate::domain::sensor::models::TimeRange;

/// Port for sensor and measurement operations.
#[async_trait]
pub trait SensorServicePort: Send + Sync + 'static {
    /// Register a sensor on one of the caller's hives.
    ///
    /// # Errors
    /// * `HiveNotFound` - Hive does not exist or belongs to someone else
    async fn create_sensor(
        &self,
        caller: &Caller,
        command: CreateSensorCommand,
    ) -> Result<Sensor, SensorError>;

    async fn list_sensors(&self, caller: &Caller, page: Page) -> Result<Vec<Sensor>, SensorError>;

    /// # Errors
    /// * `SensorNotFound` - Sensor does not exist
    /// * `Access(Forbidden)` - Sensor belongs to someone else
    async fn get_sensor(&self, caller: &Caller, id: &SensorId) -> Result<Sensor, SensorError>;

    /// Delete a sensor together with its measurements and alerts.
    ///
    /// # Errors
    /// * `SensorNotFound` - Sensor does not exist
    /// * `Access(Forbidden)` - Sensor belongs to someone else
    async fn delete_sensor(&self, caller: &Caller, id: &SensorId) -> Result<(), SensorError>;

    /// # Errors
    /// * `HiveNotFound` - Hive does not exist or belongs to someone else
    async fn list_hive_sensors(
        &self,
        caller: &Caller,
        hive_id: &HiveId,
        page: Page,
    ) -> Result<Vec<Sensor>, SensorError>;

    /// # Errors
    /// * `SensorNotFound` - Sensor does not exist
    /// * `Access(Forbidden)` - Sensor belongs to someone else
    async fn sensor_stats(&self, caller: &Caller, id: &SensorId)
        -> Result<SensorStats, SensorError>;

    /// # Errors
    /// * `SensorNotFound` - Sensor does not exist or belongs to someone else
    async fn record_measurement(
        &self,
        caller: &Caller,
        command: RecordMeasurementCommand,
    ) -> Result<Measurement, SensorError>;

    /// Measurements of one sensor, or of all the caller's sensors when none is given.
    /// Newest first.
    ///
    /// # Errors
    /// * `SensorNotFound` - Given sensor does not exist or belongs to someone else
    async fn list_measurements(
        &self,
        caller: &Caller,
        sensor_id: Option<SensorId>,
        page: Page,
    ) -> Result<Vec<Measurement>, SensorError>;

    /// Measurements of one sensor inside a time range, newest first.
    ///
    /// # Errors
    /// * `SensorNotFound` - Sensor does not exist or belongs to someone else
    async fn sensor_measurements(
        &self,
        caller: &Caller,
        id: &SensorId,
        range: TimeRange,
        page: Page,
    ) -> Result<Vec<Measurement>, SensorError>;
}

/// Persistence operations for sensors and measurements.
#[async_trait]
pub trait SensorRepository: Send + Sync + 'static {
    async fn create_sensor(&self, sensor: Sensor) -> Result<Sensor, SensorError>;

    async fn find_sensor(&self, id: &SensorId) -> Result<Option<Sensor>, SensorError>;

    async fn list_sensors_by_owner(
        &self,
        owner_id: &UserId,
        page: Page,
    ) -> Result<Vec<Sensor>, SensorError>;

    async fn list_sensors_by_hive(
        &self,
        hive_id: &HiveId,
        page: Page,
    ) -> Result<Vec<Sensor>, SensorError>;

    /// # Errors
    /// * `SensorNotFound` - Sensor does not exist
    async fn delete_sensor(&self, id: &SensorId) -> Result<(), SensorError>;

    async fn create_measurement(&self, measurement: Measurement)
        -> Result<Measurement, SensorError>;

    async fn measurement_summary(&self, sensor_id: &SensorId)
        -> Result<MeasurementSummary, SensorError>;

    async fn list_measurements_by_sensor(
        &self,
        sensor_id: &SensorId,
        range: TimeRange,
        page: Page,
    ) -> Result<Vec<Measurement>, SensorError>;

    /// Measurements across every sensor the identity owns, newest first.
    async fn list_measurements_by_owner(
        &self,
        owner_id: &UserId,
        page: Page,
    ) -> Result<Vec<Measurement>, SensorError>;
}

/// Read access to hive ownership, which lives with the hive service's tables.
#[async_trait]
pub trait HiveDirectory: Send + Sync + 'static {
    async fn hive_owner(&self, hive_id: &HiveId) -> Result<Option<UserId>, SensorError>;
}
