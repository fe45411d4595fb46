use auth::Caller;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::SensorData;
use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::SensorId;
use crate::inbound::http::router::AppState;

pub async fn get_sensor(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<SensorData>, ApiError> {
    let sensor_id = SensorId::from_string(&id).map_err(SensorError::from)?;

    state
        .sensor_service
        .get_sensor(&caller, &sensor_id)
        .await
        .map_err(ApiError::from)
        .map(|ref sensor| ApiSuccess::new(StatusCode::OK, sensor.into()))
}
