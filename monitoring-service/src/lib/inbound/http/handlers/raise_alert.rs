use auth::Caller;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::AlertData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::alert::errors::AlertError;
use crate::domain::alert::models::AlertType;
use crate::domain::alert::models::RaiseAlertCommand;
use crate::domain::sensor::models::SensorId;
use crate::inbound::http::router::AppState;

pub async fn raise_alert(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<RaiseAlertRequest>,
) -> Result<ApiSuccess<AlertData>, ApiError> {
    state
        .alert_service
        .raise_alert(&caller, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref alert| ApiSuccess::new(StatusCode::CREATED, alert.into()))
}

/// HTTP request body for raising an alert (raw JSON). Any `hive_id` sent by the
/// client is ignored; the sensor decides it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RaiseAlertRequest {
    sensor_id: String,
    alert_type: String,
    message: String,
}

impl RaiseAlertRequest {
    fn try_into_command(self) -> Result<RaiseAlertCommand, AlertError> {
        RaiseAlertCommand::new(
            SensorId::from_string(&self.sensor_id)?,
            AlertType::new(self.alert_type)?,
            self.message,
        )
    }
}
