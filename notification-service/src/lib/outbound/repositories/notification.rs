use async_trait::async_trait;
use auth::Page;
use auth::UserId;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::models::Notification;
use crate::domain::notification::models::NotificationId;
use crate::domain::notification::ports::NotificationRepository;
use crate::domain::template::models::Subject;
use crate::domain::template::models::TemplateId;

const NOTIFICATION_COLUMNS: &str = "id, owner_id, template_id, notification_type, priority, subject, body, is_sent, sent_at, error_message, created_at, updated_at";

pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    owner_id: Uuid,
    template_id: Uuid,
    notification_type: String,
    priority: String,
    subject: String,
    body: String,
    is_sent: bool,
    sent_at: Option<DateTime<Utc>>,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = NotificationError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: NotificationId(row.id),
            owner_id: UserId(row.owner_id),
            template_id: TemplateId(row.template_id),
            notification_type: row.notification_type.parse()?,
            priority: row.priority.parse()?,
            subject: Subject::new(row.subject)?,
            body: row.body,
            is_sent: row.is_sent,
            sent_at: row.sent_at,
            error_message: row.error_message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> NotificationError {
    tracing::error!(error = %e, "Notification query failed");
    NotificationError::DatabaseError(e.to_string())
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn create_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, NotificationError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, owner_id, template_id, notification_type, priority, subject, body, is_sent, sent_at, error_message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(notification.id.0)
        .bind(notification.owner_id.0)
        .bind(notification.template_id.0)
        .bind(notification.notification_type.as_str())
        .bind(notification.priority.as_str())
        .bind(notification.subject.as_str())
        .bind(&notification.body)
        .bind(notification.is_sent)
        .bind(notification.sent_at)
        .bind(&notification.error_message)
        .bind(notification.created_at)
        .bind(notification.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(notification)
    }

    async fn find_notification(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, NotificationError> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Notification::try_from).transpose()
    }

    async fn list_notifications_by_owner(
        &self,
        owner_id: &UserId,
        page: Page,
    ) -> Result<Vec<Notification>, NotificationError> {
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE owner_id = $1 ORDER BY created_at DESC, id OFFSET $2 LIMIT $3"
        ))
        .bind(owner_id.0)
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn list_pending(&self, page: Page) -> Result<Vec<Notification>, NotificationError> {
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE is_sent = FALSE ORDER BY created_at, id OFFSET $1 LIMIT $2"
        ))
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn update_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, NotificationError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_sent = $2, sent_at = $3, error_message = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(notification.id.0)
        .bind(notification.is_sent)
        .bind(notification.sent_at)
        .bind(&notification.error_message)
        .bind(notification.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(NotificationError::NotFound(notification.id.to_string()));
        }

        Ok(notification)
    }
}
