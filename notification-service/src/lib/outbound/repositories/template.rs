use async_trait::async_trait;
use auth::Page;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::template::errors::TemplateError;
use crate::domain::template::models::Subject;
use crate::domain::template::models::Template;
use crate::domain::template::models::TemplateId;
use crate::domain::template::models::TemplateName;
use crate::domain::template::ports::TemplateRepository;

const TEMPLATE_COLUMNS: &str = "id, name, subject, body, notification_type, created_at, updated_at";

pub struct PostgresTemplateRepository {
    pool: PgPool,
}

impl PostgresTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TemplateRow {
    id: Uuid,
    name: String,
    subject: String,
    body: String,
    notification_type: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<TemplateRow> for Template {
    type Error = TemplateError;

    fn try_from(row: TemplateRow) -> Result<Self, Self::Error> {
        Ok(Template {
            id: TemplateId(row.id),
            name: TemplateName::new(row.name)?,
            subject: Subject::new(row.subject)?,
            body: row.body,
            notification_type: row.notification_type.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> TemplateError {
    tracing::error!(error = %e, "Template query failed");
    TemplateError::DatabaseError(e.to_string())
}

fn write_error(e: sqlx::Error, name: &TemplateName) -> TemplateError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return TemplateError::DuplicateName(name.as_str().to_string());
        }
    }
    database_error(e)
}

#[async_trait]
impl TemplateRepository for PostgresTemplateRepository {
    async fn create_template(&self, template: Template) -> Result<Template, TemplateError> {
        sqlx::query(
            r#"
            INSERT INTO notification_templates (id, name, subject, body, notification_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(template.id.0)
        .bind(template.name.as_str())
        .bind(template.subject.as_str())
        .bind(&template.body)
        .bind(template.notification_type.as_str())
        .bind(template.created_at)
        .bind(template.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &template.name))?;

        Ok(template)
    }

    async fn find_template(&self, id: &TemplateId) -> Result<Option<Template>, TemplateError> {
        let row = sqlx::query_as::<_, TemplateRow>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM notification_templates WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Template::try_from).transpose()
    }

    async fn find_template_by_name(
        &self,
        name: &TemplateName,
    ) -> Result<Option<Template>, TemplateError> {
        let row = sqlx::query_as::<_, TemplateRow>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM notification_templates WHERE name = $1"
        ))
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Template::try_from).transpose()
    }

    async fn list_templates(&self, page: Page) -> Result<Vec<Template>, TemplateError> {
        let rows = sqlx::query_as::<_, TemplateRow>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM notification_templates ORDER BY created_at, id OFFSET $1 LIMIT $2"
        ))
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Template::try_from).collect()
    }
}
