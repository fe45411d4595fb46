use async_trait::async_trait;
use auth::Page;
use auth::UserId;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::hive::errors::HiveError;
use crate::domain::hive::models::Hive;
use crate::domain::hive::models::HiveId;
use crate::domain::hive::models::HiveName;
use crate::domain::hive::models::HiveStats;
use crate::domain::hive::models::HiveStatus;
use crate::domain::hive::models::Inspection;
use crate::domain::hive::models::InspectionId;
use crate::domain::hive::ports::HiveRepository;

const HIVE_COLUMNS: &str = "id, owner_id, name, location, description, status, queen_year, frames_count, created_at, updated_at";

const INSPECTION_COLUMNS: &str =
    "id, hive_id, owner_id, temperature, humidity, weight, notes, status, created_at, updated_at";

pub struct PostgresHiveRepository {
    pool: PgPool,
}

impl PostgresHiveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct HiveRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    location: Option<String>,
    description: Option<String>,
    status: String,
    queen_year: Option<i32>,
    frames_count: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<HiveRow> for Hive {
    type Error = HiveError;

    fn try_from(row: HiveRow) -> Result<Self, Self::Error> {
        Ok(Hive {
            id: HiveId(row.id),
            owner_id: UserId(row.owner_id),
            name: HiveName::new(row.name)?,
            location: row.location,
            description: row.description,
            status: row.status.parse()?,
            queen_year: row.queen_year,
            frames_count: row.frames_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct InspectionRow {
    id: Uuid,
    hive_id: Uuid,
    owner_id: Uuid,
    temperature: Option<f64>,
    humidity: Option<f64>,
    weight: Option<f64>,
    notes: Option<String>,
    status: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<InspectionRow> for Inspection {
    type Error = HiveError;

    fn try_from(row: InspectionRow) -> Result<Self, Self::Error> {
        Ok(Inspection {
            id: InspectionId(row.id),
            hive_id: HiveId(row.hive_id),
            owner_id: UserId(row.owner_id),
            temperature: row.temperature,
            humidity: row.humidity,
            weight: row.weight,
            notes: row.notes,
            status: row.status.map(|s| s.parse::<HiveStatus>()).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct HiveStatsRow {
    avg_temperature: Option<f64>,
    avg_humidity: Option<f64>,
    avg_weight: Option<f64>,
    last_inspection_date: Option<DateTime<Utc>>,
    latest_status: Option<String>,
}

fn database_error(e: sqlx::Error) -> HiveError {
    tracing::error!(error = %e, "Hive query failed");
    HiveError::DatabaseError(e.to_string())
}

#[async_trait]
impl HiveRepository for PostgresHiveRepository {
    async fn create_hive(&self, hive: Hive) -> Result<Hive, HiveError> {
        sqlx::query(
            r#"
            INSERT INTO hives (id, owner_id, name, location, description, status, queen_year, frames_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(hive.id.0)
        .bind(hive.owner_id.0)
        .bind(hive.name.as_str())
        .bind(&hive.location)
        .bind(&hive.description)
        .bind(hive.status.as_str())
        .bind(hive.queen_year)
        .bind(hive.frames_count)
        .bind(hive.created_at)
        .bind(hive.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(hive)
    }

    async fn find_hive(&self, id: &HiveId) -> Result<Option<Hive>, HiveError> {
        let row = sqlx::query_as::<_, HiveRow>(&format!(
            "SELECT {HIVE_COLUMNS} FROM hives WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Hive::try_from).transpose()
    }

    async fn list_hives_by_owner(
        &self,
        owner_id: &UserId,
        page: Page,
    ) -> Result<Vec<Hive>, HiveError> {
        let rows = sqlx::query_as::<_, HiveRow>(&format!(
            "SELECT {HIVE_COLUMNS} FROM hives WHERE owner_id = $1 ORDER BY created_at, id OFFSET $2 LIMIT $3"
        ))
        .bind(owner_id.0)
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Hive::try_from).collect()
    }

    async fn update_hive(&self, hive: Hive) -> Result<Hive, HiveError> {
        let result = sqlx::query(
            r#"
            UPDATE hives
            SET name = $2, location = $3, description = $4, status = $5, queen_year = $6, frames_count = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(hive.id.0)
        .bind(hive.name.as_str())
        .bind(&hive.location)
        .bind(&hive.description)
        .bind(hive.status.as_str())
        .bind(hive.queen_year)
        .bind(hive.frames_count)
        .bind(hive.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(HiveError::NotFound(hive.id.to_string()));
        }

        Ok(hive)
    }

    async fn delete_hive(&self, id: &HiveId) -> Result<(), HiveError> {
        let result = sqlx::query("DELETE FROM hives WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(HiveError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn hive_stats(&self, id: &HiveId) -> Result<HiveStats, HiveError> {
        let row = sqlx::query_as::<_, HiveStatsRow>(
            r#"
            SELECT
                AVG(temperature) AS avg_temperature,
                AVG(humidity) AS avg_humidity,
                AVG(weight) AS avg_weight,
                MAX(created_at) AS last_inspection_date,
                (
                    SELECT status FROM inspections
                    WHERE hive_id = $1 AND status IS NOT NULL
                    ORDER BY created_at DESC
                    LIMIT 1
                ) AS latest_status
            FROM inspections
            WHERE hive_id = $1
            "#,
        )
        .bind(id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(HiveStats {
            avg_temperature: row.avg_temperature,
            avg_humidity: row.avg_humidity,
            avg_weight: row.avg_weight,
            last_inspection_date: row.last_inspection_date,
            latest_status: row.latest_status.map(|s| s.parse()).transpose()?,
        })
    }

    async fn create_inspection(&self, inspection: Inspection) -> Result<Inspection, HiveError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO inspections (id, hive_id, owner_id, temperature, humidity, weight, notes, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(inspection.id.0)
        .bind(inspection.hive_id.0)
        .bind(inspection.owner_id.0)
        .bind(inspection.temperature)
        .bind(inspection.humidity)
        .bind(inspection.weight)
        .bind(&inspection.notes)
        .bind(inspection.status.map(|s| s.as_str()))
        .bind(inspection.created_at)
        .bind(inspection.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        if let Some(status) = inspection.status {
            sqlx::query("UPDATE hives SET status = $2, updated_at = $3 WHERE id = $1")
                .bind(inspection.hive_id.0)
                .bind(status.as_str())
                .bind(inspection.created_at)
                .execute(&mut *tx)
                .await
                .map_err(database_error)?;
        }

        tx.commit().await.map_err(database_error)?;

        Ok(inspection)
    }

    async fn list_inspections(
        &self,
        hive_id: &HiveId,
        page: Page,
    ) -> Result<Vec<Inspection>, HiveError> {
        let rows = sqlx::query_as::<_, InspectionRow>(&format!(
            "SELECT {INSPECTION_COLUMNS} FROM inspections WHERE hive_id = $1 ORDER BY created_at DESC, id OFFSET $2 LIMIT $3"
        ))
        .bind(hive_id.0)
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Inspection::try_from).collect()
    }
}
