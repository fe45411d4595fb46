use std::sync::Arc;

use async_trait::async_trait;
use auth::Caller;
use chrono::Utc;

use crate::domain::settings::errors::SettingsError;
use crate::domain::settings::models::CreateSettingsCommand;
use crate::domain::settings::models::NotificationSettings;
use crate::domain::settings::models::UpdateSettingsCommand;
use crate::domain::settings::ports::SettingsRepository;
use crate::domain::settings::ports::SettingsServicePort;

pub struct SettingsService<SR>
where
    SR: SettingsRepository,
{
    repository: Arc<SR>,
}

impl<SR> SettingsService<SR>
where
    SR: SettingsRepository,
{
    pub fn new(repository: Arc<SR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<SR> SettingsServicePort for SettingsService<SR>
where
    SR: SettingsRepository,
{
    async fn get_my_settings(&self, caller: &Caller) -> Result<NotificationSettings, SettingsError> {
        self.repository
            .find_settings(&caller.id)
            .await?
            .ok_or_else(|| SettingsError::NotFound(caller.id.to_string()))
    }

    async fn create_settings(
        &self,
        caller: &Caller,
        command: CreateSettingsCommand,
    ) -> Result<NotificationSettings, SettingsError> {
        if self.repository.find_settings(&caller.id).await?.is_some() {
            return Err(SettingsError::AlreadyExists(caller.id.to_string()));
        }

        let settings = NotificationSettings::new(caller.id, command, Utc::now());
        let created = self.repository.create_settings(settings).await?;
        tracing::info!(user_id = %caller.id, "Notification settings created");

        Ok(created)
    }

    async fn update_my_settings(
        &self,
        caller: &Caller,
        command: UpdateSettingsCommand,
    ) -> Result<NotificationSettings, SettingsError> {
        let mut settings = self.get_my_settings(caller).await?;
        command.apply(&mut settings, Utc::now());

        let updated = self.repository.update_settings(settings).await?;
        tracing::info!(user_id = %caller.id, "Notification settings updated");

        Ok(updated)
    }
}
