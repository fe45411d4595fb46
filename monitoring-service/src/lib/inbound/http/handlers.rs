use auth::AccessError;
use auth::PageError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::alert::errors::AlertError;
use crate::domain::alert::models::Alert;
use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::Measurement;
use crate::domain::sensor::models::Sensor;
use crate::domain::sensor::models::SensorStats;

pub mod create_sensor;
pub mod delete_sensor;
pub mod get_sensor;
pub mod health;
pub mod list_alerts;
pub mod list_hive_sensors;
pub mod list_measurements;
pub mod list_sensors;
pub mod raise_alert;
pub mod record_measurement;
pub mod resolve_alert;
pub mod sensor_measurements;
pub mod sensor_stats;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Access(AccessError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Access(err) => return err.into_response(),
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
        };

        (status, Json(ApiResponseBody::new_error(status, kind, message))).into_response()
    }
}

impl From<SensorError> for ApiError {
    fn from(err: SensorError) -> Self {
        match err {
            SensorError::SensorNotFound(_) | SensorError::HiveNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            SensorError::Access(access) => ApiError::Access(access),
            SensorError::InvalidId(_)
            | SensorError::InvalidLabel(_)
            | SensorError::InvalidMeasurement(_)
            | SensorError::InvalidPage(_) => ApiError::UnprocessableEntity(err.to_string()),
            SensorError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AlertError> for ApiError {
    fn from(err: AlertError) -> Self {
        match err {
            AlertError::Sensor(sensor) => ApiError::from(sensor),
            AlertError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AlertError::Access(access) => ApiError::Access(access),
            AlertError::InvalidId(_)
            | AlertError::InvalidLabel(_)
            | AlertError::EmptyMessage
            | AlertError::InvalidPage(_) => ApiError::UnprocessableEntity(err.to_string()),
            AlertError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        ApiError::from(SensorError::from(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, kind: &'static str, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { kind, message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub kind: &'static str,
    pub message: String,
}

/// `?skip=&limit=` query parameters shared by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorData {
    pub id: String,
    pub owner_id: String,
    pub hive_id: String,
    pub name: String,
    pub sensor_type: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Sensor> for SensorData {
    fn from(sensor: &Sensor) -> Self {
        Self {
            id: sensor.id.to_string(),
            owner_id: sensor.owner_id.to_string(),
            hive_id: sensor.hive_id.to_string(),
            name: sensor.name.as_str().to_string(),
            sensor_type: sensor.sensor_type.as_str().to_string(),
            is_active: sensor.is_active,
            created_at: sensor.created_at,
            updated_at: sensor.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementData {
    pub id: String,
    pub sensor_id: String,
    pub value: f64,
    pub battery_level: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Measurement> for MeasurementData {
    fn from(measurement: &Measurement) -> Self {
        Self {
            id: measurement.id.to_string(),
            sensor_id: measurement.sensor_id.to_string(),
            value: measurement.value,
            battery_level: measurement.battery_level,
            created_at: measurement.created_at,
            updated_at: measurement.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorStatsData {
    pub sensor_id: String,
    pub sensor_name: String,
    pub sensor_type: String,
    pub last_value: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub avg_value: Option<f64>,
    pub battery_level: Option<f64>,
    pub last_measurement_time: Option<DateTime<Utc>>,
    pub measurement_count: i64,
}

impl From<&SensorStats> for SensorStatsData {
    fn from(stats: &SensorStats) -> Self {
        Self {
            sensor_id: stats.sensor_id.to_string(),
            sensor_name: stats.sensor_name.as_str().to_string(),
            sensor_type: stats.sensor_type.as_str().to_string(),
            last_value: stats.summary.last_value,
            min_value: stats.summary.min_value,
            max_value: stats.summary.max_value,
            avg_value: stats.summary.avg_value,
            battery_level: stats.summary.battery_level,
            last_measurement_time: stats.summary.last_measurement_time,
            measurement_count: stats.summary.measurement_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertData {
    pub id: String,
    pub owner_id: String,
    pub sensor_id: String,
    pub hive_id: String,
    pub alert_type: String,
    pub message: String,
    pub is_resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Alert> for AlertData {
    fn from(alert: &Alert) -> Self {
        Self {
            id: alert.id.to_string(),
            owner_id: alert.owner_id.to_string(),
            sensor_id: alert.sensor_id.to_string(),
            hive_id: alert.hive_id.to_string(),
            alert_type: alert.alert_type.as_str().to_string(),
            message: alert.message.clone(),
            is_resolved: alert.is_resolved,
            resolved_at: alert.resolved_at,
            created_at: alert.created_at,
            updated_at: alert.updated_at,
        }
    }
}
