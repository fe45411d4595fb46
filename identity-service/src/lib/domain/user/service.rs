use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Caller;
use auth::IssuedToken;
use auth::Page;
use auth::UserId;
use chrono::Utc;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for identity operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn load(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn ensure_username_free(&self, username: &str, owner: Option<UserId>) -> Result<(), UserError> {
        match self.repository.find_by_username(username).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(UserError::DuplicateIdentity("Username".to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<UserId>) -> Result<(), UserError> {
        match self.repository.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(UserError::DuplicateIdentity("Email".to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        self.ensure_email_free(command.email.as_str(), None).await?;
        self.ensure_username_free(command.username.as_str(), None)
            .await?;

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            is_active: true,
            is_superuser: false,
            created_at: Utc::now(),
            updated_at: None,
        };

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, username = %created.username, "Identity registered");

        Ok(created)
    }

    async fn issue_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, IssuedToken), UserError> {
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %username, "Token requested for unknown identity");
                UserError::InvalidCredentials
            })?;

        let issued = self
            .authenticator
            .authenticate(password, &user.password_hash, user.username.as_str())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(username = %username, "Token requested with wrong password");
                    UserError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => UserError::Hashing(err),
                AuthenticationError::JwtError(err) => UserError::Token(err),
            })?;

        Ok((user, issued))
    }

    async fn current_user(&self, caller: &Caller) -> Result<User, UserError> {
        self.load(&caller.id).await
    }

    async fn get_user(&self, caller: &Caller, id: &UserId) -> Result<User, UserError> {
        caller.ensure_owner_or_privileged(*id)?;
        self.load(id).await
    }

    async fn list_users(&self, caller: &Caller, page: Page) -> Result<Vec<User>, UserError> {
        caller.ensure_privileged()?;
        self.repository.list(page).await
    }

    async fn update_user(
        &self,
        caller: &Caller,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        caller.ensure_owner_or_privileged(*id)?;
        if command.changes_privileges() {
            caller.ensure_privileged()?;
        }

        let mut user = self.load(id).await?;

        if let Some(username) = command.username {
            self.ensure_username_free(username.as_str(), Some(user.id))
                .await?;
            user.username = username;
        }

        if let Some(email) = command.email {
            self.ensure_email_free(email.as_str(), Some(user.id)).await?;
            user.email = email;
        }

        if let Some(password) = command.password {
            user.password_hash = self.authenticator.hash_password(password.expose())?;
        }

        if let Some(is_active) = command.is_active {
            user.is_active = is_active;
        }

        if let Some(is_superuser) = command.is_superuser {
            user.is_superuser = is_superuser;
        }

        user.updated_at = Some(Utc::now());

        let updated = self.repository.update(user).await?;
        tracing::info!(user_id = %updated.id, updated_by = %caller.username, "Identity updated");

        Ok(updated)
    }

    async fn change_password(
        &self,
        caller: &Caller,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError> {
        let mut user = self.load(&caller.id).await?;

        if !self
            .authenticator
            .verify_password(&command.current_password, &user.password_hash)?
        {
            return Err(UserError::IncorrectPassword);
        }

        user.password_hash = self
            .authenticator
            .hash_password(command.new_password.expose())?;
        user.updated_at = Some(Utc::now());

        self.repository.update(user).await?;
        tracing::info!(user_id = %caller.id, "Password changed");

        Ok(())
    }
}
