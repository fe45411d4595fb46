use auth::Caller;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::HiveDetailData;
use crate::domain::hive::errors::HiveError;
use crate::domain::hive::models::HiveId;
use crate::inbound::http::router::AppState;

pub async fn get_hive(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<HiveDetailData>, ApiError> {
    let hive_id = HiveId::from_string(&id).map_err(HiveError::from)?;

    state
        .hive_service
        .get_hive(&caller, &hive_id)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}
