use auth::Caller;
use auth::Page;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::PageParams;
use super::SensorData;
use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::HiveId;
use crate::inbound::http::router::AppState;

pub async fn list_hive_sensors(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<Vec<SensorData>>, ApiError> {
    let hive_id = HiveId::from_string(&id).map_err(SensorError::from)?;
    let page = Page::new(params.skip, params.limit)?;

    state
        .sensor_service
        .list_hive_sensors(&caller, &hive_id, page)
        .await
        .map_err(ApiError::from)
        .map(|sensors| ApiSuccess::new(StatusCode::OK, sensors.iter().map(SensorData::from).collect()))
}
