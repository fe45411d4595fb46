use auth::Caller;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn change_password(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let command = ChangePasswordCommand {
        current_password: body.current_password,
        new_password: Password::new(body.new_password).map_err(UserError::from)?,
    };

    state.user_service.change_password(&caller, command).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: "Password changed successfully".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordRequest {
    current_password: String,
    new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}
