use auth::Caller;
use auth::Page;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::PageParams;
use super::SensorData;
use crate::inbound::http::router::AppState;

pub async fn list_sensors(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<Vec<SensorData>>, ApiError> {
    let page = Page::new(params.skip, params.limit)?;

    state
        .sensor_service
        .list_sensors(&caller, page)
        .await
        .map_err(ApiError::from)
        .map(|sensors| ApiSuccess::new(StatusCode::OK, sensors.iter().map(SensorData::from).collect()))
}
