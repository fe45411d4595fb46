use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::caller::Caller;
use crate::caller::CallerDirectory;
use crate::caller::UserId;
use crate::errors::AccessError;

/// Reads callers straight from the shared `users` table.
#[derive(Clone)]
pub struct PostgresCallerDirectory {
    pool: PgPool,
}

impl PostgresCallerDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CallerRecord {
    id: Uuid,
    username: String,
    is_active: bool,
    is_superuser: bool,
}

impl From<CallerRecord> for Caller {
    fn from(record: CallerRecord) -> Self {
        Caller {
            id: UserId(record.id),
            username: record.username,
            is_active: record.is_active,
            is_superuser: record.is_superuser,
        }
    }
}

#[async_trait]
impl CallerDirectory for PostgresCallerDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<Caller>, AccessError> {
        let record = sqlx::query_as::<_, CallerRecord>(
            "SELECT id, username, is_active, is_superuser FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Caller lookup failed");
            AccessError::DirectoryUnavailable(e.to_string())
        })?;

        Ok(record.map(Caller::from))
    }
}
