use async_trait::async_trait;
use auth::Page;
use auth::UserId;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::alert::errors::AlertError;
use crate::domain::alert::models::Alert;
use crate::domain::alert::models::AlertFilter;
use crate::domain::alert::models::AlertId;
use crate::domain::alert::models::AlertType;
use crate::domain::alert::ports::AlertRepository;
use crate::domain::sensor::models::HiveId;
use crate::domain::sensor::models::SensorId;

const ALERT_COLUMNS: &str = "id, owner_id, sensor_id, hive_id, alert_type, message, is_resolved, resolved_at, created_at, updated_at";

pub struct PostgresAlertRepository {
    pool: PgPool,
}

impl PostgresAlertRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AlertRow {
    id: Uuid,
    owner_id: Uuid,
    sensor_id: Uuid,
    hive_id: Uuid,
    alert_type: String,
    message: String,
    is_resolved: bool,
    resolved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<AlertRow> for Alert {
    type Error = AlertError;

    fn try_from(row: AlertRow) -> Result<Self, Self::Error> {
        Ok(Alert {
            id: AlertId(row.id),
            owner_id: UserId(row.owner_id),
            sensor_id: SensorId(row.sensor_id),
            hive_id: HiveId(row.hive_id),
            alert_type: AlertType::new(row.alert_type)?,
            message: row.message,
            is_resolved: row.is_resolved,
            resolved_at: row.resolved_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> AlertError {
    tracing::error!(error = %e, "Alert query failed");
    AlertError::DatabaseError(e.to_string())
}

#[async_trait]
impl AlertRepository for PostgresAlertRepository {
    async fn create_alert(&self, alert: Alert) -> Result<Alert, AlertError> {
        sqlx::query(
            r#"
            INSERT INTO alerts (id, owner_id, sensor_id, hive_id, alert_type, message, is_resolved, resolved_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(alert.id.0)
        .bind(alert.owner_id.0)
        .bind(alert.sensor_id.0)
        .bind(alert.hive_id.0)
        .bind(alert.alert_type.as_str())
        .bind(&alert.message)
        .bind(alert.is_resolved)
        .bind(alert.resolved_at)
        .bind(alert.created_at)
        .bind(alert.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(alert)
    }

    async fn find_alert(&self, id: &AlertId) -> Result<Option<Alert>, AlertError> {
        let row = sqlx::query_as::<_, AlertRow>(&format!(
            "SELECT {ALERT_COLUMNS} FROM alerts WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Alert::try_from).transpose()
    }

    async fn list_alerts(
        &self,
        owner_id: &UserId,
        filter: AlertFilter,
        page: Page,
    ) -> Result<Vec<Alert>, AlertError> {
        let rows = sqlx::query_as::<_, AlertRow>(&format!(
            r#"
            SELECT {ALERT_COLUMNS} FROM alerts
            WHERE owner_id = $1
              AND ($2::uuid IS NULL OR sensor_id = $2)
              AND ($3::uuid IS NULL OR hive_id = $3)
              AND (NOT $4 OR is_resolved = FALSE)
            ORDER BY created_at DESC, id
            OFFSET $5 LIMIT $6
            "#
        ))
        .bind(owner_id.0)
        .bind(filter.sensor_id.map(|id| id.0))
        .bind(filter.hive_id.map(|id| id.0))
        .bind(filter.active_only)
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Alert::try_from).collect()
    }

    async fn resolve_alert(&self, id: &AlertId, at: DateTime<Utc>) -> Result<Alert, AlertError> {
        let row = sqlx::query_as::<_, AlertRow>(&format!(
            r#"
            UPDATE alerts
            SET is_resolved = TRUE,
                resolved_at = COALESCE(resolved_at, $2),
                updated_at = CASE WHEN is_resolved THEN updated_at ELSE $2 END
            WHERE id = $1
            RETURNING {ALERT_COLUMNS}
            "#
        ))
        .bind(id.0)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or_else(|| AlertError::NotFound(id.to_string()))?;

        Alert::try_from(row)
    }
}
