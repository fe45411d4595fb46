use auth::Caller;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::InspectionData;
use crate::domain::hive::errors::HiveError;
use crate::domain::hive::models::HiveId;
use crate::domain::hive::models::HiveStatus;
use crate::domain::hive::models::RecordInspectionCommand;
use crate::inbound::http::router::AppState;

pub async fn record_inspection(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<RecordInspectionRequest>,
) -> Result<ApiSuccess<InspectionData>, ApiError> {
    state
        .hive_service
        .record_inspection(&caller, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref inspection| ApiSuccess::new(StatusCode::CREATED, inspection.into()))
}

/// HTTP request body for recording an inspection (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordInspectionRequest {
    hive_id: String,
    temperature: Option<f64>,
    humidity: Option<f64>,
    weight: Option<f64>,
    notes: Option<String>,
    status: Option<String>,
}

impl RecordInspectionRequest {
    fn try_into_command(self) -> Result<RecordInspectionCommand, HiveError> {
        Ok(RecordInspectionCommand {
            hive_id: HiveId::from_string(&self.hive_id)?,
            temperature: self.temperature,
            humidity: self.humidity,
            weight: self.weight,
            notes: self.notes,
            status: self.status.map(|s| s.parse::<HiveStatus>()).transpose()?,
        })
    }
}
