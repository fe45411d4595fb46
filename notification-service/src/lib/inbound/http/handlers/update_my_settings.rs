use auth::Caller;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::create_settings::EMAIL_ADDRESS_MAX;
use super::create_settings::PHONE_NUMBER_MAX;
use super::ApiError;
use super::ApiSuccess;
use super::SettingsData;
use crate::domain::notification::models::Priority;
use crate::domain::settings::errors::SettingsError;
use crate::domain::settings::models::contact;
use crate::domain::settings::models::UpdateSettingsCommand;
use crate::inbound::http::router::AppState;

pub async fn update_my_settings(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<UpdateSettingsRequest>,
) -> Result<ApiSuccess<SettingsData>, ApiError> {
    state
        .settings_service
        .update_my_settings(&caller, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref settings| ApiSuccess::new(StatusCode::OK, settings.into()))
}

/// HTTP request body for a partial settings update (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateSettingsRequest {
    email_enabled: Option<bool>,
    sms_enabled: Option<bool>,
    push_enabled: Option<bool>,
    email_address: Option<String>,
    phone_number: Option<String>,
    min_priority: Option<String>,
}

impl UpdateSettingsRequest {
    fn try_into_command(self) -> Result<UpdateSettingsCommand, SettingsError> {
        Ok(UpdateSettingsCommand {
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
