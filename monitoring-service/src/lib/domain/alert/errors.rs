use auth::AccessError;
use auth::PageError;
use thiserror::Error;

use crate::domain::sensor::errors::IdError;
use crate::domain::sensor::errors::LabelError;
use crate::domain::sensor::errors::SensorError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AlertError {
    #[error("Invalid id: {0}")]
    InvalidId(#[from] IdError),

    #[error(transparent)]
    InvalidLabel(#[from] LabelError),

    #[error("Alert message cannot be empty")]
    EmptyMessage,

    #[error("Invalid page: {0}")]
    InvalidPage(#[from] PageError),

    #[error("Alert not found: {0}")]
    NotFound(String),

    /// Failure while resolving the alert's sensor.
    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
