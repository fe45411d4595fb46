use async_trait::async_trait;
use auth::Page;
use auth::UserId;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::HiveId;
use crate::domain::sensor::models::Measurement;
use crate::domain::sensor::models::MeasurementId;
use crate::domain::sensor::models::MeasurementSummary;
use crate::domain::sensor::models::Sensor;
use crate::domain::sensor::models::SensorId;
use crate::domain::sensor::models::SensorName;
use crate::domain::sensor::models::SensorType;
use crate::domain::sensor::models::TimeRange;
use crate::domain::sensor::ports::SensorRepository;

const SENSOR_COLUMNS: &str =
    "id, owner_id, hive_id, name, sensor_type, is_active, created_at, updated_at";

const MEASUREMENT_COLUMNS: &str = "id, sensor_id, value, battery_level, created_at, updated_at";

pub struct PostgresSensorRepository {
    pool: PgPool,
}

impl PostgresSensorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SensorRow {
    id: Uuid,
    owner_id: Uuid,
    hive_id: Uuid,
    name: String,
    sensor_type: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<SensorRow> for Sensor {
    type Error = SensorError;

    fn try_from(row: SensorRow) -> Result<Self, Self::Error> {
        Ok(Sensor {
            id: SensorId(row.id),
            owner_id: UserId(row.owner_id),
            hive_id: HiveId(row.hive_id),
            name: SensorName::new(row.name)?,
            sensor_type: SensorType::new(row.sensor_type)?,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MeasurementRow {
    id: Uuid,
    sensor_id: Uuid,
    value: f64,
    battery_level: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<MeasurementRow> for Measurement {
    fn from(row: MeasurementRow) -> Self {
        Measurement {
            id: MeasurementId(row.id),
            sensor_id: SensorId(row.sensor_id),
            value: row.value,
            battery_level: row.battery_level,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    min_value: Option<f64>,
    max_value: Option<f64>,
    avg_value: Option<f64>,
    last_value: Option<f64>,
    battery_level: Option<f64>,
    last_measurement_time: Option<DateTime<Utc>>,
    measurement_count: i64,
}

fn database_error(e: sqlx::Error) -> SensorError {
    tracing::error!(error = %e, "Sensor query failed");
    SensorError::DatabaseError(e.to_string())
}

#[async_trait]
impl SensorRepository for PostgresSensorRepository {
    async fn create_sensor(&self, sensor: Sensor) -> Result<Sensor, SensorError> {
        sqlx::query(
            r#"
            INSERT INTO sensors (id, owner_id, hive_id, name, sensor_type, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(sensor.id.0)
        .bind(sensor.owner_id.0)
        .bind(sensor.hive_id.0)
        .bind(sensor.name.as_str())
        .bind(sensor.sensor_type.as_str())
        .bind(sensor.is_active)
        .bind(sensor.created_at)
        .bind(sensor.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(sensor)
    }

    async fn find_sensor(&self, id: &SensorId) -> Result<Option<Sensor>, SensorError> {
        let row = sqlx::query_as::<_, SensorRow>(&format!(
            "SELECT {SENSOR_COLUMNS} FROM sensors WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Sensor::try_from).transpose()
    }

    async fn list_sensors_by_owner(
        &self,
        owner_id: &UserId,
        page: Page,
    ) -> Result<Vec<Sensor>, SensorError> {
        let rows = sqlx::query_as::<_, SensorRow>(&format!(
            "SELECT {SENSOR_COLUMNS} FROM sensors WHERE owner_id = $1 ORDER BY created_at, id OFFSET $2 LIMIT $3"
        ))
        .bind(owner_id.0)
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Sensor::try_from).collect()
    }

    async fn list_sensors_by_hive(
        &self,
        hive_id: &HiveId,
        page: Page,
    ) -> Result<Vec<Sensor>, SensorError> {
        let rows = sqlx::query_as::<_, SensorRow>(&format!(
            "SELECT {SENSOR_COLUMNS} FROM sensors WHERE hive_id = $1 ORDER BY created_at, id OFFSET $2 LIMIT $3"
        ))
        .bind(hive_id.0)
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Sensor::try_from).collect()
    }

    async fn delete_sensor(&self, id: &SensorId) -> Result<(), SensorError> {
        let result = sqlx::query("DELETE FROM sensors WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(SensorError::SensorNotFound(id.to_string()));
        }

        Ok(())
    }

    async fn create_measurement(
        &self,
        measurement: Measurement,
    ) -> Result<Measurement, SensorError> {
        sqlx::query(
            r#"
            INSERT INTO measurements (id, sensor_id, value, battery_level, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(measurement.id.0)
        .bind(measurement.sensor_id.0)
        .bind(measurement.value)
        .bind(measurement.battery_level)
        .bind(measurement.created_at)
        .bind(measurement.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(measurement)
    }

    async fn measurement_summary(
        &self,
        sensor_id: &SensorId,
    ) -> Result<MeasurementSummary, SensorError> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                MIN(m.value) AS min_value,
                MAX(m.value) AS max_value,
                AVG(m.value) AS avg_value,
                latest.value AS last_value,
                latest.battery_level AS battery_level,
                MAX(m.created_at) AS last_measurement_time,
                COUNT(m.id) AS measurement_count
            FROM measurements m
            LEFT JOIN LATERAL (
                SELECT value, battery_level FROM measurements
                WHERE sensor_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) latest ON TRUE
            WHERE m.sensor_id = $1
            GROUP BY latest.value, latest.battery_level
            "#,
        )
        .bind(sensor_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        // No rows at all means no measurements yet.
        Ok(row
            .map(|row| MeasurementSummary {
                min_value: row.min_value,
                max_value: row.max_value,
                avg_value: row.avg_value,
                last_value: row.last_value,
                battery_level: row.battery_level,
                last_measurement_time: row.last_measurement_time,
                measurement_count: row.measurement_count,
            })
            .unwrap_or_default())
    }

    async fn list_measurements_by_sensor(
        &self,
        sensor_id: &SensorId,
        range: TimeRange,
        page: Page,
    ) -> Result<Vec<Measurement>, SensorError> {
        let rows = sqlx::query_as::<_, MeasurementRow>(&format!(
            r#"
            SELECT {MEASUREMENT_COLUMNS} FROM measurements
            WHERE sensor_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at <= $3)
            ORDER BY created_at DESC, id
            OFFSET $4 LIMIT $5
            "#
        ))
        .bind(sensor_id.0)
        .bind(range.start())
        .bind(range.end())
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Measurement::from).collect())
    }

    async fn list_measurements_by_owner(
        &self,
        owner_id: &UserId,
        page: Page,
    ) -> Result<Vec<Measurement>, SensorError> {
        let rows = sqlx::query_as::<_, MeasurementRow>(
            r#"
            SELECT m.id, m.sensor_id, m.value, m.battery_level, m.created_at, m.updated_at
            FROM measurements m
            JOIN sensors s ON s.id = m.sensor_id
            WHERE s.owner_id = $1
            ORDER BY m.created_at DESC, m.id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(owner_id.0)
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Measurement::from).collect())
    }
}
