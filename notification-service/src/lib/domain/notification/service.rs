use std::sync::Arc;

use async_trait::async_trait;
use auth::Caller;
use auth::Page;
use chrono::Utc;

use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::models::CreateNotificationCommand;
use crate::domain::notification::models::Notification;
use crate::domain::notification::models::NotificationId;
use crate::domain::notification::ports::NotificationRepository;
use crate::domain::notification::ports::NotificationServicePort;
use crate::domain::template::errors::TemplateError;
use crate::domain::template::ports::TemplateRepository;

/// Domain service implementation for notifications.
pub struct NotificationService<NR, TR>
where
    NR: NotificationRepository,
    TR: TemplateRepository,
{
    repository: Arc<NR>,
    templates: Arc<TR>,
}

impl<NR, TR> NotificationService<NR, TR>
where
    NR: NotificationRepository,
    TR: TemplateRepository,
{
    pub fn new(repository: Arc<NR>, templates: Arc<TR>) -> Self {
        Self {
            repository,
            templates,
        }
    }
}

#[async_trait]
impl<NR, TR> NotificationServicePort for NotificationService<NR, TR>
where
    NR: NotificationRepository,
    TR: TemplateRepository,
{
    async fn create_notification(
        &self,
        caller: &Caller,
        command: CreateNotificationCommand,
    ) -> Result<Notification, NotificationError> {
        let template = self
            .templates
            .find_template(&command.template_id)
            .await?
            .ok_or_else(|| TemplateError::NotFound(command.template_id.to_string()))?;

        let notification = Notification::from_template(caller.id, &template, command, Utc::now());
        let created = self.repository.create_notification(notification).await?;
        tracing::info!(
            notification_id = %created.id,
            template_id = %created.template_id,
            priority = %created.priority,
            "Notification queued"
        );

        Ok(created)
    }

    async fn list_notifications(
        &self,
        caller: &Caller,
        page: Page,
    ) -> Result<Vec<Notification>, NotificationError> {
        self.repository
            .list_notifications_by_owner(&caller.id, page)
            .await
    }

    async fn list_pending(
        &self,
        caller: &Caller,
        page: Page,
    ) -> Result<Vec<Notification>, NotificationError> {
        caller.ensure_privileged()?;
        self.repository.list_pending(page).await
    }

    async fn mark_sent(
        &self,
        caller: &Caller,
        id: &NotificationId,
        error_message: Option<String>,
    ) -> Result<Notification, NotificationError> {
        caller.ensure_privileged()?;

        let mut notification = self
            .repository
            .find_notification(id)
            .await?
            .ok_or_else(|| NotificationError::NotFound(id.to_string()))?;

        notification.mark_sent(Utc::now(), error_message);
        let updated = self.repository.update_notification(notification).await?;

        match &updated.error_message {
            Some(error) => tracing::warn!(notification_id = %updated.id, error = %error, "Notification sent with error"),
            None => tracing::info!(notification_id = %updated.id, "Notification sent"),
        }

        Ok(updated)
    }
}
