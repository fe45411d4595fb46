use std::sync::Arc;

use async_trait::async_trait;
use auth::Caller;
use auth::Page;
use chrono::Utc;

use crate::domain::template::errors::TemplateError;
use crate::domain::template::models::CreateTemplateCommand;
use crate::domain::template::models::Template;
use crate::domain::template::models::TemplateId;
use crate::domain::template::ports::TemplateRepository;
use crate::domain::template::ports::TemplateServicePort;

/// Domain service implementation for templates.
pub struct TemplateService<TR>
where
    TR: TemplateRepository,
{
    repository: Arc<TR>,
}

impl<TR> TemplateService<TR>
where
    TR: TemplateRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TemplateServicePort for TemplateService<TR>
where
    TR: TemplateRepository,
{
    async fn create_template(
        &self,
        caller: &Caller,
        command: CreateTemplateCommand,
    ) -> Result<Template, TemplateError> {
        caller.ensure_privileged()?;

        if self
            .repository
            .find_template_by_name(&command.name)
            .await?
            .is_some()
        {
            return Err(TemplateError::DuplicateName(command.name.as_str().to_string()));
        }

        let template = Template {
            id: TemplateId::new(),
            name: command.name,
            subject: command.subject,
            body: command.body,
            notification_type: command.notification_type,
            created_at: Utc::now(),
            updated_at: None,
        };

        let created = self.repository.create_template(template).await?;
        tracing::info!(
            template_id = %created.id,
            name = %created.name.as_str(),
            notification_type = %created.notification_type,
            "Template created"
        );

        Ok(created)
    }

    async fn list_templates(&self, page: Page) -> Result<Vec<Template>, TemplateError> {
        self.repository.list_templates(page).await
    }
}
