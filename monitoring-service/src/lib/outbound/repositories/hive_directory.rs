use async_trait::async_trait;
use auth::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::sensor::errors::SensorError;
use crate::domain::sensor::models::HiveId;
use crate::domain::sensor::ports::HiveDirectory;

/// Reads hive ownership straight from the shared `hives` table.
pub struct PostgresHiveDirectory {
    pool: PgPool,
}

impl PostgresHiveDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HiveDirectory for PostgresHiveDirectory {
    async fn hive_owner(&self, hive_id: &HiveId) -> Result<Option<UserId>, SensorError> {
        let owner: Option<Uuid> = sqlx::query_scalar("SELECT owner_id FROM hives WHERE id = $1")
            .bind(hive_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Hive lookup failed");
                SensorError::DatabaseError(e.to_string())
            })?;

        Ok(owner.map(UserId))
    }
}
