use auth::Caller;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::SettingsData;
use crate::inbound::http::router::AppState;

pub async fn get_my_settings(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<ApiSuccess<SettingsData>, ApiError> {
    state
        .settings_service
        .get_my_settings(&caller)
        .await
        .map_err(ApiError::from)
        .map(|ref settings| ApiSuccess::new(StatusCode::OK, settings.into()))
}
