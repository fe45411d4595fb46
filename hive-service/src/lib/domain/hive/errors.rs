use auth::AccessError;
use auth::PageError;
use thiserror::Error;

/// Error for HiveId and InspectionId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for HiveName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HiveNameError {
    #[error("Hive name cannot be empty")]
    Empty,

    #[error("Hive name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown hive status '{0}' (expected healthy, warning or critical)")]
pub struct HiveStatusError(pub String);

/// Top-level error for hive and inspection operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HiveError {
    #[error("Invalid id: {0}")]
    InvalidId(#[from] IdError),

    #[error("Invalid hive name: {0}")]
    InvalidName(#[from] HiveNameError),

    #[error(transparent)]
    InvalidStatus(#[from] HiveStatusError),

    #[error("Frames count cannot be negative, got {0}")]
    NegativeFramesCount(i32),

    #[error("Invalid page: {0}")]
    InvalidPage(#[from] PageError),

    #[error("Hive not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
