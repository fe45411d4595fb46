use thiserror::Error;

use crate::domain::template::errors::LabelError;
use crate::domain::template::errors::VariantError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error(transparent)]
    InvalidLabel(#[from] LabelError),

    #[error(transparent)]
    InvalidVariant(#[from] VariantError),

    #[error("Notification settings not found for user {0}")]
    NotFound(String),

    #[error("Notification settings already exist for user {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
