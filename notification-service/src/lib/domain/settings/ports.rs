use async_trait::async_trait;
use auth::Caller;
use auth::UserId;

use crate::domain::settings::errors::SettingsError;
use crate::domain::settings::models::CreateSettingsCommand;
use crate::domain::settings::models::NotificationSettings;
use crate::domain::settings::models::UpdateSettingsCommand;

/// Port for the caller's own notification settings.
#[async_trait]
pub trait SettingsServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `NotFound` - Caller has not created settings yet
    async fn get_my_settings(&self, caller: &Caller) -> Result<NotificationSettings, SettingsError>;

    /// # Errors
    /// * `AlreadyExists` - Caller already has settings
    async fn create_settings(
        &self,
        caller: &Caller,
        command: CreateSettingsCommand,
    ) -> Result<NotificationSettings, SettingsError>;

    /// # Errors
    /// * `NotFound` - Caller has not created settings yet
    async fn update_my_settings(
        &self,
        caller: &Caller,
        command: UpdateSettingsCommand,
    ) -> Result<NotificationSettings, SettingsError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync + 'static {
    async fn find_settings(&self, owner_id: &UserId)
        -> Result<Option<NotificationSettings>, SettingsError>;

    /// # Errors
    /// * `AlreadyExists` - Owner already has a row
    async fn create_settings(
        &self,
        settings: NotificationSettings,
    ) -> Result<NotificationSettings, SettingsError>;

    /// # Errors
    /// * `NotFound` - Row does not exist
    async fn update_settings(
        &self,
        settings: NotificationSettings,
    ) -> Result<NotificationSettings, SettingsError>;
}
