use auth::AccessError;
use auth::PageError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for free-text fields with a length limit
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// A channel or priority value outside its fixed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown {field} '{value}', expected one of: {expected}")]
pub struct VariantError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Invalid id: {0}")]
    InvalidId(#[from] IdError),

    #[error(transparent)]
    InvalidLabel(#[from] LabelError),

    #[error(transparent)]
    InvalidVariant(#[from] VariantError),

    #[error("Invalid page: {0}")]
    InvalidPage(#[from] PageError),

    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template name already in use: {0}")]
    DuplicateName(String),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
