use auth::Caller;
use auth::Page;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MeasurementData;
use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::SensorId;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMeasurementsParams {
    pub sensor_id: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn list_measurements(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<ListMeasurementsParams>,
) -> Result<ApiSuccess<Vec<MeasurementData>>, ApiError> {
    let sensor_id = params
        .sensor_id
        .as_deref()
        .map(SensorId::from_string)
        .transpose()
        .map_err(SensorError::from)?;
    let page = Page::new(params.skip, params.limit)?;

    state
        .sensor_service
        .list_measurements(&caller, sensor_id, page)
        .await
        .map_err(ApiError::from)
        .map(|measurements| {
            ApiSuccess::new(
                StatusCode::OK,
                measurements.iter().map(MeasurementData::from).collect(),
            )
        })
}
