use auth::Caller;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SettingsData;
use crate::domain::notification::models::Priority;
use crate::domain::settings::errors::SettingsError;
use crate::domain::settings::models::contact;
use crate::domain::settings::models::CreateSettingsCommand;
use crate::inbound::http::router::AppState;

pub(super) const EMAIL_ADDRESS_MAX: usize = 255;
pub(super) const PHONE_NUMBER_MAX: usize = 32;

pub async fn create_settings(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<CreateSettingsRequest>,
) -> Result<ApiSuccess<SettingsData>, ApiError> {
    state
        .settings_service
        .create_settings(&caller, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref settings| ApiSuccess::new(StatusCode::CREATED, settings.into()))
}

/// HTTP request body for creating settings (raw JSON). Omitted fields take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateSettingsRequest {
    email_enabled: Option<bool>,
    sms_enabled: Option<bool>,
    push_enabled: Option<bool>,
    email_address: Option<String>,
    phone_number: Option<String>,
    min_priority: Option<String>,
}

impl CreateSettingsRequest {
    fn try_into_command(self) -> Result<CreateSettingsCommand, SettingsError> {
        Ok(CreateSettingsCommand {
            email_enabled: self.email_enabled,
            sms_enabled: self.sms_enabled,
            push_enabled: self.push_enabled,
            email_address: contact(self.email_address, "Email address", EMAIL_ADDRESS_MAX)?,
            phone_number: contact(self.phone_number, "Phone number", PHONE_NUMBER_MAX)?,
            min_priority: self
                .min_priority
                .as_deref()
                .map(str::parse::<Priority>)
                .transpose()?,
        })
    }
}
