use async_trait::async_trait;
use auth::UserId;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::settings::errors::SettingsError;
use crate::domain::settings::models::NotificationSettings;
use crate::domain::settings::models::SettingsId;
use crate::domain::settings::ports::SettingsRepository;

const SETTINGS_COLUMNS: &str = "id, owner_id, email_enabled, sms_enabled, push_enabled, email_address, phone_number, min_priority, created_at, updated_at";

pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SettingsRow {
    id: Uuid,
    owner_id: Uuid,
    email_enabled: bool,
    sms_enabled: bool,
    push_enabled: bool,
    email_address: Option<String>,
    phone_number: Option<String>,
    min_priority: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<SettingsRow> for NotificationSettings {
    type Error = SettingsError;

    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        Ok(NotificationSettings {
            id: SettingsId(row.id),
            owner_id: UserId(row.owner_id),
            email_enabled: row.email_enabled,
            sms_enabled: row.sms_enabled,
            push_enabled: row.push_enabled,
            email_address: row.email_address,
            phone_number: row.phone_number,
            min_priority: row.min_priority.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> SettingsError {
    tracing::error!(error = %e, "Settings query failed");
    SettingsError::DatabaseError(e.to_string())
}

fn write_error(e: sqlx::Error, owner_id: &UserId) -> SettingsError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return SettingsError::AlreadyExists(owner_id.to_string());
        }
    }
    database_error(e)
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn find_settings(
        &self,
        owner_id: &UserId,
    ) -> Result<Option<NotificationSettings>, SettingsError> {
        let row = sqlx::query_as::<_, SettingsRow>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM notification_settings WHERE owner_id = $1"
        ))
        .bind(owner_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(NotificationSettings::try_from).transpose()
    }

    async fn create_settings(
        &self,
        settings: NotificationSettings,
    ) -> Result<NotificationSettings, SettingsError> {
        sqlx::query(
            r#"
            INSERT INTO notification_settings (id, owner_id, email_enabled, sms_enabled, push_enabled, email_address, phone_number, min_priority, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(settings.id.0)
        .bind(settings.owner_id.0)
        .bind(settings.email_enabled)
        .bind(settings.sms_enabled)
        .bind(settings.push_enabled)
        .bind(&settings.email_address)
        .bind(&settings.phone_number)
        .bind(settings.min_priority.as_str())
        .bind(settings.created_at)
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &settings.owner_id))?;

        Ok(settings)
    }

    async fn update_settings(
        &self,
        settings: NotificationSettings,
    ) -> Result<NotificationSettings, SettingsError> {
        let result = sqlx::query(
            r#"
            UPDATE notification_settings
            SET email_enabled = $2, sms_enabled = $3, push_enabled = $4, email_address = $5,
                phone_number = $6, min_priority = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(settings.id.0)
        .bind(settings.email_enabled)
        .bind(settings.sms_enabled)
        .bind(settings.push_enabled)
        .bind(&settings.email_address)
        .bind(&settings.phone_number)
        .bind(settings.min_priority.as_str())
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(SettingsError::NotFound(settings.owner_id.to_string()));
        }

        Ok(settings)
    }
}
