use auth::AccessError;
use auth::PageError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::models::Notification;
use crate::domain::settings::errors::SettingsError;
use crate::domain::settings::models::NotificationSettings;
use crate::domain::template::errors::TemplateError;
use crate::domain::template::models::Template;

pub mod create_notification;
pub mod create_settings;
pub mod create_template;
pub mod get_my_settings;
pub mod health;
pub mod list_notifications;
pub mod list_pending;
pub mod list_templates;
pub mod mark_sent;
pub mod update_my_settings;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Access(AccessError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Access(err) => return err.into_response(),
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
        };

        (status, Json(ApiResponseBody::new_error(status, kind, message))).into_response()
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TemplateError::DuplicateName(_) => ApiError::Conflict(err.to_string()),
            TemplateError::Access(access) => ApiError::Access(access),
            TemplateError::InvalidId(_)
            | TemplateError::InvalidLabel(_)
            | TemplateError::InvalidVariant(_)
            | TemplateError::InvalidPage(_) => ApiError::UnprocessableEntity(err.to_string()),
            TemplateError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::NotFound(_) => ApiError::NotFound(err.to_string()),
            SettingsError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            SettingsError::InvalidLabel(_) | SettingsError::InvalidVariant(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            SettingsError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<NotificationError> for ApiError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::Template(template) => ApiError::from(template),
            NotificationError::NotFound(_) => ApiError::NotFound(err.to_string()),
            NotificationError::Access(access) => ApiError::Access(access),
            NotificationError::InvalidId(_)
            | NotificationError::InvalidLabel(_)
            | NotificationError::InvalidVariant(_)
            | NotificationError::InvalidPage(_) => ApiError::UnprocessableEntity(err.to_string()),
            NotificationError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        ApiError::from(NotificationError::from(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, kind: &'static str, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { kind, message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub kind: &'static str,
    pub message: String,
}

/// `?skip=&limit=` query parameters shared by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateData {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub notification_type: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Template> for TemplateData {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id.to_string(),
            name: template.name.as_str().to_string(),
            subject: template.subject.as_str().to_string(),
            body: template.body.clone(),
            notification_type: template.notification_type.as_str(),
            created_at: template.created_at,
            updated_at: template.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsData {
    pub id: String,
    pub owner_id: String,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub push_enabled: bool,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub min_priority: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&NotificationSettings> for SettingsData {
    fn from(settings: &NotificationSettings) -> Self {
        Self {
            id: settings.id.to_string(),
            owner_id: settings.owner_id.to_string(),
            email_enabled: settings.email_enabled,
            sms_enabled: settings.sms_enabled,
            push_enabled: settings.push_enabled,
            email_address: settings.email_address.clone(),
            phone_number: settings.phone_number.clone(),
            min_priority: settings.min_priority.as_str(),
            created_at: settings.created_at,
            updated_at: settings.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationData {
    pub id: String,
    pub owner_id: String,
    pub template_id: String,
    pub notification_type: &'static str,
    pub priority: &'static str,
    pub subject: String,
    pub body: String,
    pub is_sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Notification> for NotificationData {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            owner_id: notification.owner_id.to_string(),
            template_id: notification.template_id.to_string(),
            notification_type: notification.notification_type.as_str(),
            priority: notification.priority.as_str(),
            subject: notification.subject.as_str().to_string(),
            body: notification.body.clone(),
            is_sent: notification.is_sent,
            sent_at: notification.sent_at,
            error_message: notification.error_message.clone(),
            created_at: notification.created_at,
            updated_at: notification.updated_at,
        }
    }
}
