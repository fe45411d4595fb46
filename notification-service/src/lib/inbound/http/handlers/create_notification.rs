use auth::Caller;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::NotificationData;
use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::models::CreateNotificationCommand;
use crate::domain::notification::models::Priority;
use crate::domain::template::models::NotificationType;
use crate::domain::template::models::Subject;
use crate::domain::template::models::TemplateId;
use crate::inbound::http::router::AppState;

pub async fn create_notification(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<CreateNotificationRequest>,
) -> Result<ApiSuccess<NotificationData>, ApiError> {
    state
        .notification_service
        .create_notification(&caller, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref notification| ApiSuccess::new(StatusCode::CREATED, notification.into()))
}

/// HTTP request body for queueing a notification (raw JSON). Omitted channel,
/// subject and body come from the template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateNotificationRequest {
    template_id: String,
    notification_type: Option<String>,
    priority: Option<String>,
    subject: Option<String>,
    body: Option<String>,
}

impl CreateNotificationRequest {
    fn try_into_command(self) -> Result<CreateNotificationCommand, NotificationError> {
        Ok(CreateNotificationCommand {
            template_id: TemplateId::from_string(&self.template_id)?,
            notification_type: self
                .notification_type
                .as_deref()
                .map(str::parse::<NotificationType>)
                .transpose()?,
            priority: self
                .priority
                .as_deref()
                .map(str::parse::<Priority>)
                .transpose()?,
            subject: self.subject.map(Subject::new).transpose()?,
            body: self.body,
        })
    }
}
