use auth::Caller;
use auth::Page;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MeasurementData;
use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::SensorId;
use crate::domain::sensor::models::TimeRange;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorMeasurementsParams {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn sensor_measurements(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    Query(params): Query<SensorMeasurementsParams>,
) -> Result<ApiSuccess<Vec<MeasurementData>>, ApiError> {
    let sensor_id = SensorId::from_string(&id).map_err(SensorError::from)?;
    let range = TimeRange::new(params.start_date, params.end_date).map_err(SensorError::from)?;
    let page = Page::new(params.skip, params.limit)?;

    state
        .sensor_service
        .sensor_measurements(&caller, &sensor_id, range, page)
        .await
        .map_err(ApiError::from)
        .map(|measurements| {
            ApiSuccess::new(
                StatusCode::OK,
                measurements.iter().map(MeasurementData::from).collect(),
            )
        })
}
