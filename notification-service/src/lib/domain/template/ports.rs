use async_trait::async_trait;
use auth::Caller;
use auth::Page;

use crate::domain::template::errors::TemplateError;
use crate::domain::template::models::CreateTemplateCommand;
use crate::domain::template::models::Template;
use crate::domain::template::models::TemplateId;
use crate::domain::template::models::TemplateName;

/// Port for template operations.
#[async_trait]
pub trait TemplateServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `Access(Forbidden)` - Caller is not privileged
    /// * `DuplicateName` - Another template already uses the name
    async fn create_template(
        &self,
        caller: &Caller,
        command: CreateTemplateCommand,
    ) -> Result<Template, TemplateError>;

    /// All templates, oldest first. Open to any admitted caller.
    async fn list_templates(&self, page: Page) -> Result<Vec<Template>, TemplateError>;
}

/// Persistence operations for templates.
#[async_trait]
pub trait TemplateRepository: Send + Sync + 'static {
    /// # Errors
    /// * `DuplicateName` - Unique name constraint violated
    async fn create_template(&self, template: Template) -> Result<Template, TemplateError>;

    async fn find_template(&self, id: &TemplateId) -> Result<Option<Template>, TemplateError>;

    async fn find_template_by_name(
        &self,
        name: &TemplateName,
    ) -> Result<Option<Template>, TemplateError>;

    async fn list_templates(&self, page: Page) -> Result<Vec<Template>, TemplateError>;
}
