//! Shared authentication and access control for the apiary services.
//!
//! Every service composes the same pieces:
//!
//! * [`Authenticator`] hashes secrets with Argon2 and issues/verifies HMAC-signed JWTs.
//! * [`AccessGuard`] turns a bearer token into a [`Caller`] by looking the token
//!   subject up in a [`CallerDirectory`].
//! * [`require_caller`] is the axum middleware that runs the guard and stores the
//!   `Caller` in the request extensions.
//! * [`Caller::ensure_owner`] and friends implement the per-record ownership rules.
//! * [`Page`] is the `skip`/`limit` window every owner-scoped list accepts.
//!
//! ```
//! use auth::Authenticator;
//! use auth::TokenSettings;
//!
//! let authenticator = Authenticator::new(&TokenSettings::new("a_secret_of_at_least_32_bytes!!!")).unwrap();
//! let issued = authenticator.issue_token("alice").unwrap();
//!
//! assert_eq!(authenticator.verify_token(&issued.access_token).unwrap(), "alice");
//! ```
//!
//! ```
//! use auth::AccessError;
//! use auth::Caller;
//! use auth::UserId;
//!
//! let alice = Caller {
//!     id: UserId::new(),
//!     username: "alice".to_string(),
//!     is_active: true,
//!     is_superuser: false,
//! };
//!
//! assert!(alice.ensure_owner(alice.id).is_ok());
//! assert_eq!(alice.ensure_owner(UserId::new()), Err(AccessError::Forbidden));
//! ```

pub mod authenticator;
pub mod caller;
pub mod directory;
pub mod errors;
pub mod guard;
pub mod http;
pub mod jwt;
pub mod pagination;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use caller::Caller;
pub use caller::CallerDirectory;
pub use caller::UserId;
pub use caller::UserIdError;
pub use directory::PostgresCallerDirectory;
pub use errors::AccessError;
pub use guard::AccessGuard;
pub use http::cors_layer;
pub use http::require_caller;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenSettings;
pub use pagination::Page;
pub use pagination::PageError;
pub use password::PasswordError;
pub use password::PasswordHasher;
