use async_trait::async_trait;
use auth::Caller;
use auth::Page;
use auth::UserId;

use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::models::CreateNotificationCommand;
use crate::domain::notification::models::Notification;
use crate::domain::notification::models::NotificationId;

/// Port for notification bookkeeping.
#[async_trait]
pub trait NotificationServicePort: Send + Sync + 'static {
    /// Queue a notification for the caller from an existing template.
    ///
    /// # Errors
    /// * `Template(NotFound)` - Template does not exist
    async fn create_notification(
        &self,
        caller: &Caller,
        command: CreateNotificationCommand,
    ) -> Result<Notification, NotificationError>;

    /// The caller's notifications, newest first.
    async fn list_notifications(
        &self,
        caller: &Caller,
        page: Page,
    ) -> Result<Vec<Notification>, NotificationError>;

    /// Unsent notifications of every identity, oldest first.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Caller is not privileged
    async fn list_pending(
        &self,
        caller: &Caller,
        page: Page,
    ) -> Result<Vec<Notification>, NotificationError>;

    /// Record that a dispatcher handled the notification, optionally with an error.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Caller is not privileged
    /// * `NotFound` - Notification does not exist
    async fn mark_sent(
        &self,
        caller: &Caller,
        id: &NotificationId,
        error_message: Option<String>,
    ) -> Result<Notification, NotificationError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync + 'static {
    async fn create_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, NotificationError>;

    async fn find_notification(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, NotificationError>;

    async fn list_notifications_by_owner(
        &self,
        owner_id: &UserId,
        page: Page,
    ) -> Result<Vec<Notification>, NotificationError>;

    async fn list_pending(&self, page: Page) -> Result<Vec<Notification>, NotificationError>;

    /// # Errors
    /// * `NotFound` - Notification does not exist
    async fn update_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, NotificationError>;
}
