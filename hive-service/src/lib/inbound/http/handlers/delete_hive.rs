use auth::Caller;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::hive::errors::HiveError;
use crate::domain::hive::models::HiveId;
use crate::inbound::http::router::AppState;

pub async fn delete_hive(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let hive_id = HiveId::from_string(&id).map_err(HiveError::from)?;

    state.hive_service.delete_hive(&caller, &hive_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: "Hive deleted successfully".to_string(),
        },
    ))
}
