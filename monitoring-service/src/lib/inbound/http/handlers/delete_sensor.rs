use auth::Caller;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::SensorId;
use crate::inbound::http::router::AppState;

pub async fn delete_sensor(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let sensor_id = SensorId::from_string(&id).map_err(SensorError::from)?;

    state
        .sensor_service
        .delete_sensor(&caller, &sensor_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
