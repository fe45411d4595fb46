use auth::Caller;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::AlertData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::alert::errors::AlertError;
use crate::domain::alert::models::AlertId;
use crate::inbound::http::router::AppState;

pub async fn resolve_alert(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<AlertData>, ApiError> {
    let alert_id = AlertId::from_string(&id).map_err(AlertError::from)?;

    state
        .alert_service
        .resolve_alert(&caller, &alert_id)
        .await
        .map_err(ApiError::from)
        .map(|ref alert| ApiSuccess::new(StatusCode::OK, alert.into()))
}
