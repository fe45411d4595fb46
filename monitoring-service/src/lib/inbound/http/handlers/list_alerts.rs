use auth::Caller;
use auth::Page;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::AlertData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::alert::errors::AlertError;
use crate::domain::alert::models::AlertFilter;
use crate::domain::sensor::models::HiveId;
use crate::domain::sensor::models::SensorId;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAlertsParams {
    pub sensor_id: Option<String>,
    pub hive_id: Option<String>,
    pub active_only: Option<bool>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListAlertsParams {
    fn filter(&self) -> Result<AlertFilter, AlertError> {
        Ok(AlertFilter {
            sensor_id: self
                .sensor_id
                .as_deref()
                .map(SensorId::from_string)
                .transpose()?,
            hive_id: self
                .hive_id
                .as_deref()
                .map(HiveId::from_string)
                .transpose()?,
            active_only: self.active_only.unwrap_or(false),
        })
    }
}

pub async fn list_alerts(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<ListAlertsParams>,
) -> Result<ApiSuccess<Vec<AlertData>>, ApiError> {
    let filter = params.filter()?;
    let page = Page::new(params.skip, params.limit)?;

    state
        .alert_service
        .list_alerts(&caller, filter, page)
        .await
        .map_err(ApiError::from)
        .map(|alerts| ApiSuccess::new(StatusCode::OK, alerts.iter().map(AlertData::from).collect()))
}
