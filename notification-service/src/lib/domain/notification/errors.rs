use auth::AccessError;
use auth::PageError;
use thiserror::Error;

use crate::domain::template::errors::IdError;
use crate::domain::template::errors::LabelError;
use crate::domain::template::errors::TemplateError;
use crate::domain::template::errors::VariantError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Invalid id: {0}")]
    InvalidId(#[from] IdError),

    #[error(transparent)]
    InvalidLabel(#[from] LabelError),

    #[error(transparent)]
    InvalidVariant(#[from] VariantError),

    #[error("Invalid page: {0}")]
    InvalidPage(#[from] PageError),

    #[error("Notification not found: {0}")]
    NotFound(String),

    /// Failure while resolving the notification's template.
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
