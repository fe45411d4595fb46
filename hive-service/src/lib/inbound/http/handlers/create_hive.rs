use auth::Caller;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::HiveData;
use crate::domain::hive::errors::HiveError;
use crate::domain::hive::models::CreateHiveCommand;
use crate::domain::hive::models::HiveName;
use crate::domain::hive::models::HiveStatus;
use crate::inbound::http::router::AppState;

pub async fn create_hive(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<CreateHiveRequest>,
) -> Result<ApiSuccess<HiveData>, ApiError> {
    state
        .hive_service
        .create_hive(&caller, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref hive| ApiSuccess::new(StatusCode::CREATED, hive.into()))
}

/// HTTP request body for creating a hive (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateHiveRequest {
    name: String,
    location: Option<String>,
    description: Option<String>,
    status: Option<String>,
    queen_year: Option<i32>,
    frames_count: Option<i32>,
}

impl CreateHiveRequest {
    fn try_into_command(self) -> Result<CreateHiveCommand, HiveError> {
        let name = HiveName::new(self.name)?;
        let status = self.status.map(|s| s.parse::<HiveStatus>()).transpose()?;
        CreateHiveCommand::new(
            name,
            self.location,
            self.description,
            status,
            self.queen_year,
            self.frames_count,
        )
    }
}
