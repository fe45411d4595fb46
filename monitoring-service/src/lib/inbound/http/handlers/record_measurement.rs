use auth::Caller;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MeasurementData;
use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::RecordMeasurementCommand;
use crate::domain::sensor::models::SensorId;
use crate::inbound::http::router::AppState;

pub async fn record_measurement(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<RecordMeasurementRequest>,
) -> Result<ApiSuccess<MeasurementData>, ApiError> {
    state
        .sensor_service
        .record_measurement(&caller, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref measurement| ApiSuccess::new(StatusCode::CREATED, measurement.into()))
}

/// HTTP request body for a sensor reading (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordMeasurementRequest {
    sensor_id: String,
    value: f64,
    battery_level: Option<f64>,
}

impl RecordMeasurementRequest {
    fn try_into_command(self) -> Result<RecordMeasurementCommand, SensorError> {
        let sensor_id = SensorId::from_string(&self.sensor_id)?;
        Ok(RecordMeasurementCommand::new(
            sensor_id,
            self.value,
            self.battery_level,
        )?)
    }
}
