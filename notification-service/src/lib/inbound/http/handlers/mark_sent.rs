use auth::Caller;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::NotificationData;
use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::models::NotificationId;
use crate::inbound::http::router::AppState;

/// Optional dispatch outcome. An empty body means the send succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MarkSentRequest {
    error_message: Option<String>,
}

pub async fn mark_sent(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    body: Option<Json<MarkSentRequest>>,
) -> Result<ApiSuccess<NotificationData>, ApiError> {
    let notification_id = NotificationId::from_string(&id).map_err(NotificationError::from)?;
    let error_message = body.and_then(|Json(request)| request.error_message);

    state
        .notification_service
        .mark_sent(&caller, &notification_id, error_message)
        .await
        .map_err(ApiError::from)
        .map(|ref notification| ApiSuccess::new(StatusCode::OK, notification.into()))
}
