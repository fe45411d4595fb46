use auth::Caller;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SensorData;
use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::CreateSensorCommand;
use crate::domain::sensor::models::HiveId;
use crate::domain::sensor::models::SensorName;
use crate::domain::sensor::models::SensorType;
use crate::inbound::http::router::AppState;

pub async fn create_sensor(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<CreateSensorRequest>,
) -> Result<ApiSuccess<SensorData>, ApiError> {
    state
        .sensor_service
        .create_sensor(&caller, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref sensor| ApiSuccess::new(StatusCode::CREATED, sensor.into()))
}

/// HTTP request body for registering a sensor (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSensorRequest {
    hive_id: String,
    name: String,
    sensor_type: String,
    #[serde(default = "active_by_default")]
    is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl CreateSensorRequest {
    fn try_into_command(self) -> Result<CreateSensorCommand, SensorError> {
        Ok(CreateSensorCommand {
            hive_id: HiveId::from_string(&self.hive_id)?,
            name: SensorName::new(self.name)?,
            sensor_type: SensorType::new(self.sensor_type)?,
            is_active: self.is_active,
        })
    }
}
