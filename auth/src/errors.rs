use axum::http::StatusCode;
use thiserror::Error;

/// Rejections produced while admitting a caller or checking ownership.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Could not validate credentials: {0}")]
    Unauthenticated(String),

    #[error("Inactive user")]
    InactiveAccount,

    #[error("Not enough permissions")]
    Forbidden,

    #[error("Identity lookup failed: {0}")]
    DirectoryUnavailable(String),
}

impl AccessError {
    /// Machine-readable error kind carried in response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AccessError::Unauthenticated(_) => "unauthenticated",
            AccessError::InactiveAccount => "inactive_account",
            AccessError::Forbidden => "forbidden",
            AccessError::DirectoryUnavailable(_) => "internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AccessError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AccessError::InactiveAccount => StatusCode::BAD_REQUEST,
            AccessError::Forbidden => StatusCode::FORBIDDEN,
            AccessError::DirectoryUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AccessError::Unauthenticated("missing token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AccessError::InactiveAccount.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AccessError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AccessError::DirectoryUnavailable("pool closed".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_failures_do_not_leak_as_auth_kinds() {
        assert_eq!(
            AccessError::DirectoryUnavailable("pool closed".into()).kind(),
            "internal"
        );
    }
}
