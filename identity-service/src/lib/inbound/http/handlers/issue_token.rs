use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::router::AppState;

/// OAuth2 password-grant style login: form-encoded username and password.
pub async fn issue_token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequestForm>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let (user, issued) = state
        .user_service
        .issue_token(&form.username, &form.password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            access_token: issued.access_token,
            token_type: "bearer",
            expires_at: issued.expires_at,
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequestForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub user: UserData,
}
