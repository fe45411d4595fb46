use std::fmt;

use auth::UserId;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::sensor::errors::IdError;
use crate::domain::sensor::errors::LabelError;
use crate::domain::sensor::errors::MeasurementError;

fn parse_uuid(s: &str) -> Result<Uuid, IdError> {
    Uuid::parse_str(s).map_err(|e| IdError::InvalidFormat(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorId(pub Uuid);

impl SensorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, IdError> {
        parse_uuid(s).map(SensorId)
    }
}

impl Default for SensorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Id of a hive owned by the hive service; only referenced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HiveId(pub Uuid);

impl HiveId {
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        parse_uuid(s).map(HiveId)
    }
}

impl fmt::Display for HiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasurementId(pub Uuid);

impl MeasurementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MeasurementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn label(field: &'static str, value: String, max: usize) -> Result<String, LabelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LabelError::Empty { field });
    }

    let actual = trimmed.chars().count();
    if actual > max {
        return Err(LabelError::TooLong { field, max, actual });
    }

    Ok(trimmed.to_string())
}

/// Sensor display name, 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorName(String);

impl SensorName {
    pub fn new(name: String) -> Result<Self, LabelError> {
        label("Sensor name", name, 100).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form sensor kind such as `temperature`, `humidity` or `weight`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorType(String);

impl SensorType {
    pub fn new(sensor_type: String) -> Result<Self, LabelError> {
        label("Sensor type", sensor_type, 50).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sensor {
    pub id: SensorId,
    pub owner_id: UserId,
    pub hive_id: HiveId,
    pub name: SensorName,
    pub sensor_type: SensorType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A single reading. Owned through its sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub id: MeasurementId,
    pub sensor_id: SensorId,
    pub value: f64,
    pub battery_level: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Aggregates over a sensor's measurements as computed by storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasurementSummary {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub avg_value: Option<f64>,
    /// Value of the newest measurement.
    pub last_value: Option<f64>,
    /// Battery level reported with the newest measurement.
    pub battery_level: Option<f64>,
    pub last_measurement_time: Option<DateTime<Utc>>,
    pub measurement_count: i64,
}

/// Read-only statistics view of one sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorStats {
    pub sensor_id: SensorId,
    pub sensor_name: SensorName,
    pub sensor_type: SensorType,
    pub summary: MeasurementSummary,
}

impl SensorStats {
    pub fn new(sensor: Sensor, summary: MeasurementSummary) -> Self {
        Self {
            sensor_id: sensor.id,
            sensor_name: sensor.name,
            sensor_type: sensor.sensor_type,
            summary,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateSensorCommand {
    pub hive_id: HiveId,
    pub name: SensorName,
    pub sensor_type: SensorType,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct RecordMeasurementCommand {
    pub sensor_id: SensorId,
    pub value: f64,
    pub battery_level: Option<f64>,
}

impl RecordMeasurementCommand {
    /// # Errors
    /// * `NonFiniteValue` - NaN or infinite reading
    /// * `BatteryOutOfRange` - Battery level outside 0..=100
    pub fn new(
        sensor_id: SensorId,
        value: f64,
        battery_level: Option<f64>,
    ) -> Result<Self, MeasurementError> {
        if !value.is_finite() {
            return Err(MeasurementError::NonFiniteValue);
        }
        if let Some(level) = battery_level {
            if !(0.0..=100.0).contains(&level) {
                return Err(MeasurementError::BatteryOutOfRange(level));
            }
        }

        Ok(Self {
            sensor_id,
            value,
            battery_level,
        })
    }
}

/// Optional inclusive time bounds for a measurement query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRange {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, MeasurementError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(MeasurementError::InvertedRange);
            }
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at <= end)
    }
}
