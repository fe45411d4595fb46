use auth::Caller;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::HiveData;
use crate::domain::hive::errors::HiveError;
use crate::domain::hive::models::HiveId;
use crate::domain::hive::models::HiveName;
use crate::domain::hive::models::HiveStatus;
use crate::domain::hive::models::UpdateHiveCommand;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a hive (raw JSON). Absent fields are left as they are.
#[derive(Debug, Deserialize)]
pub struct UpdateHiveRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub queen_year: Option<i32>,
    pub frames_count: Option<i32>,
}

impl UpdateHiveRequest {
    fn try_into_command(self) -> Result<UpdateHiveCommand, HiveError> {
        UpdateHiveCommand {
            name: self.name.map(HiveName::new).transpose()?,
            location: self.location,
            description: self.description,
            status: self.status.map(|s| s.parse::<HiveStatus>()).transpose()?,
            queen_year: self.queen_year,
            frames_count: self.frames_count,
        }
        .validated()
    }
}

pub async fn update_hive(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    Json(req): Json<UpdateHiveRequest>,
) -> Result<ApiSuccess<HiveData>, ApiError> {
    let hive_id = HiveId::from_string(&id).map_err(HiveError::from)?;
    let command = req.try_into_command()?;

    state
        .hive_service
        .update_hive(&caller, &hive_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref hive| ApiSuccess::new(StatusCode::OK, hive.into()))
}
