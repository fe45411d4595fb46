use std::sync::Arc;

use crate::authenticator::Authenticator;
use crate::caller::Caller;
use crate::caller::CallerDirectory;
use crate::errors::AccessError;

/// Turns a bearer token into an admitted `Caller`.
///
/// The directory is consulted on every request, so a deactivated identity is
/// rejected on its next call even while its token is still unexpired.
#[derive(Clone)]
pub struct AccessGuard {
    authenticator: Arc<Authenticator>,
    directory: Arc<dyn CallerDirectory>,
}

impl AccessGuard {
    pub fn new(authenticator: Arc<Authenticator>, directory: Arc<dyn CallerDirectory>) -> Self {
        Self {
            authenticator,
            directory,
        }
    }

    pub fn authenticator(&self) -> &Arc<Authenticator> {
        &self.authenticator
    }

    /// Verify `token` and resolve the caller it was issued to.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token invalid or expired, or identity unknown
    /// * `InactiveAccount` - Identity exists but is deactivated
    /// * `DirectoryUnavailable` - Identity lookup failed
    pub async fn admit(&self, token: &str) -> Result<Caller, AccessError> {
        let subject = self.authenticator.verify_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Token verification failed");
            AccessError::Unauthenticated(e.to_string())
        })?;

        let caller = self
            .directory
            .find_by_username(&subject)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %subject, "Token subject has no identity");
                AccessError::Unauthenticated("unknown identity".to_string())
            })?;

        if !caller.is_active {
            tracing::warn!(username = %caller.username, "Inactive identity rejected");
            return Err(AccessError::InactiveAccount);
        }

        Ok(caller)
    }
}
