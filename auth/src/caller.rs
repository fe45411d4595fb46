use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::errors::AccessError;

/// Identity id shared by every service as the owner reference of its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid user id: {0}")]
pub struct UserIdError(pub String);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity behind an admitted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: UserId,
    pub username: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl Caller {
    pub fn owns(&self, owner_id: UserId) -> bool {
        self.id == owner_id
    }

    /// Reject access to a record owned by someone else.
    ///
    /// # Errors
    /// * `Forbidden` - `owner_id` is not the caller's id
    pub fn ensure_owner(&self, owner_id: UserId) -> Result<(), AccessError> {
        if self.owns(owner_id) {
            Ok(())
        } else {
            Err(AccessError::Forbidden)
        }
    }

    /// Like `ensure_owner`, but a privileged caller always passes.
    /// Only identity-management operations use this.
    pub fn ensure_owner_or_privileged(&self, owner_id: UserId) -> Result<(), AccessError> {
        if self.is_superuser {
            return Ok(());
        }
        self.ensure_owner(owner_id)
    }

    pub fn ensure_privileged(&self) -> Result<(), AccessError> {
        if self.is_superuser {
            Ok(())
        } else {
            Err(AccessError::Forbidden)
        }
    }
}

/// Lookup of callers by the token subject.
#[async_trait]
pub trait CallerDirectory: Send + Sync + 'static {
    /// Find a caller by username. Returns `None` when no such identity exists.
    ///
    /// # Errors
    /// * `DirectoryUnavailable` - Storage failure
    async fn find_by_username(&self, username: &str) -> Result<Option<Caller>, AccessError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(is_superuser: bool) -> Caller {
        Caller {
            id: UserId::new(),
            username: "alice".to_string(),
            is_active: true,
            is_superuser,
        }
    }

    #[test]
    fn test_owner_passes() {
        let alice = caller(false);

        assert!(alice.owns(alice.id));
        assert_eq!(alice.ensure_owner(alice.id), Ok(()));
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let alice = caller(false);

        assert_eq!(alice.ensure_owner(UserId::new()), Err(AccessError::Forbidden));
        assert_eq!(
            alice.ensure_owner_or_privileged(UserId::new()),
            Err(AccessError::Forbidden)
        );
        assert_eq!(alice.ensure_privileged(), Err(AccessError::Forbidden));
    }

    #[test]
    fn test_privilege_does_not_bypass_plain_ownership() {
        let admin = caller(true);

        assert_eq!(admin.ensure_owner(UserId::new()), Err(AccessError::Forbidden));
        assert_eq!(admin.ensure_owner_or_privileged(UserId::new()), Ok(()));
        assert_eq!(admin.ensure_privileged(), Ok(()));
    }

    #[test]
    fn test_user_id_from_string() {
        let id = UserId::new();

        assert_eq!(UserId::from_string(&id.to_string()), Ok(id));
        assert!(UserId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_user_id_serializes_as_plain_uuid() {
        let id = UserId::new();

        let json = serde_json::to_value(id).unwrap();

        assert_eq!(json, serde_json::Value::String(id.0.to_string()));
    }
}
