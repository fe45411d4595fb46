use async_trait::async_trait;
use auth::Caller;
use auth::IssuedToken;
use auth::Page;
use auth::UserId;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for identity domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new active, unprivileged identity.
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Username or email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Check credentials and issue an access token bound to the username.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    async fn issue_token(&self, username: &str, password: &str)
        -> Result<(User, IssuedToken), UserError>;

    /// The caller's own identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity vanished after admission
    async fn current_user(&self, caller: &Caller) -> Result<User, UserError>;

    /// Retrieve an identity by id; self or privileged callers only.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Caller is neither the identity nor privileged
    /// * `NotFound` - Identity does not exist
    async fn get_user(&self, caller: &Caller, id: &UserId) -> Result<User, UserError>;

    /// List identities; privileged callers only.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Caller is not privileged
    async fn list_users(&self, caller: &Caller, page: Page) -> Result<Vec<User>, UserError>;

    /// Apply a partial update to an identity.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Caller is neither the identity nor privileged, or
    ///   an unprivileged caller tried to change account flags
    /// * `NotFound` - Identity does not exist
    /// * `DuplicateIdentity` - New username or email is taken
    async fn update_user(
        &self,
        caller: &Caller,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError>;

    /// Replace the caller's password after checking the current one.
    ///
    /// # Errors
    /// * `IncorrectPassword` - Current password does not match
    async fn change_password(
        &self,
        caller: &Caller,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError>;
}

/// Persistence operations for identities.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// # Errors
    /// * `DuplicateIdentity` - Unique constraint on username or email violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Identities ordered by creation time, oldest first.
    async fn list(&self, page: Page) -> Result<Vec<User>, UserError>;

    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DuplicateIdentity` - Unique constraint on username or email violated
    async fn update(&self, user: User) -> Result<User, UserError>;
}
