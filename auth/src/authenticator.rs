use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenSettings;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Token issuer/verifier combined with secret hashing.
///
/// Built once from `TokenSettings` and shared behind an `Arc`. Holds no
/// mutable state, so issuing and verifying never contend.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    default_ttl: Duration,
}

/// A freshly signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator from process-wide token settings.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Configured algorithm is not HS256/HS384/HS512
    pub fn new(settings: &TokenSettings) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(settings.secret.as_bytes(), &settings.algorithm)?,
            default_ttl: settings.ttl(),
        })
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Hash a secret for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Compare a candidate secret with a stored hash.
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash cannot be parsed
    pub fn verify_password(&self, candidate: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(candidate, stored_hash)
    }

    /// Verify a secret and, on success, issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Secret does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject)?)
    }

    /// Issue a token for `subject` with the configured lifetime.
    pub fn issue_token(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.issue_token_with_ttl(subject, self.default_ttl)
    }

    /// Issue a token for `subject` that expires `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_token_with_ttl(&self, subject: &str, ttl: Duration) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_subject(subject, Utc::now(), ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            expires_at: claims.expires_at(),
        })
    }

    /// Verify a token and return the subject it was issued to.
    ///
    /// # Errors
    /// * `InvalidSignature`, `TokenExpired`, `Malformed` - Token is not valid
    pub fn verify_token(&self, token: &str) -> Result<String, JwtError> {
        self.jwt_handler.decode(token).map(|claims| claims.sub)
    }
}
