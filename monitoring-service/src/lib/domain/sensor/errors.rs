use auth::AccessError;
use auth::PageError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for sensor name and type labels
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

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MeasurementError {
    #[error("Measurement value must be a finite number")]
    NonFiniteValue,

    #[error("Battery level must be between 0 and 100, got {0}")]
    BatteryOutOfRange(f64),

    #[error("Range start must not be after its end")]
    InvertedRange,
}

/// Top-level error for sensor and measurement operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SensorError {
    #[error("Invalid id: {0}")]
    InvalidId(#[from] IdError),

    #[error(transparent)]
    InvalidLabel(#[from] LabelError),

    #[error(transparent)]
    InvalidMeasurement(#[from] MeasurementError),

    #[error("Invalid page: {0}")]
    InvalidPage(#[from] PageError),

    #[error("Sensor not found: {0}")]
    SensorNotFound(String),

    #[error("Hive not found: {0}")]
    HiveNotFound(String),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
