use auth::Caller;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TemplateData;
use crate::domain::template::errors::TemplateError;
use crate::domain::template::models::CreateTemplateCommand;
use crate::domain::template::models::Subject;
use crate::domain::template::models::TemplateName;
use crate::inbound::http::router::AppState;

pub async fn create_template(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<CreateTemplateRequest>,
) -> Result<ApiSuccess<TemplateData>, ApiError> {
    state
        .template_service
        .create_template(&caller, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref template| ApiSuccess::new(StatusCode::CREATED, template.into()))
}

/// HTTP request body for creating a template (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTemplateRequest {
    name: String,
    subject: String,
    body: String,
    notification_type: String,
}

impl CreateTemplateRequest {
    fn try_into_command(self) -> Result<CreateTemplateCommand, TemplateError> {
        Ok(CreateTemplateCommand::new(
            TemplateName::new(self.name)?,
            Subject::new(self.subject)?,
            self.body,
            self.notification_type.parse()?,
        )?)
    }
}
