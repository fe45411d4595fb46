use auth::Caller;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::SensorStatsData;
use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::SensorId;
use crate::inbound::http::router::AppState;

pub async fn sensor_stats(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<SensorStatsData>, ApiError> {
    let sensor_id = SensorId::from_string(&id).map_err(SensorError::from)?;

    state
        .sensor_service
        .sensor_stats(&caller, &sensor_id)
        .await
        .map_err(ApiError::from)
        .map(|ref stats| ApiSuccess::new(StatusCode::OK, stats.into()))
}
