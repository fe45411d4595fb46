use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::template::errors::IdError;
use crate::domain::template::errors::LabelError;
use crate::domain::template::errors::VariantError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateId(pub Uuid);

impl TemplateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s)
            .map(TemplateId)
            .map_err(|e| IdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Trimmed, non-empty text bounded by `max` characters.
pub(crate) fn bounded_text(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, LabelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LabelError::Empty { field });
    }

    let actual = trimmed.chars().count();
    if actual > max {
        return Err(LabelError::TooLong { field, max, actual });
    }

    Ok(trimmed.to_string())
}

/// Unique template name, 1-100 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateName(String);

impl TemplateName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, LabelError> {
        bounded_text(name, "Template name", Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Message subject line, 1-200 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(String);

impl Subject {
    const MAX_LENGTH: usize = 200;

    pub fn new(subject: String) -> Result<Self, LabelError> {
        bounded_text(subject, "Subject", Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Email,
    Sms,
    Push,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Email => "email",
            NotificationType::Sms => "sms",
            NotificationType::Push => "push",
        }
    }
}

impl FromStr for NotificationType {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(NotificationType::Email),
            "sms" => Ok(NotificationType::Sms),
            "push" => Ok(NotificationType::Push),
            other => Err(VariantError {
                field: "notification type",
                value: other.to_string(),
                expected: "email, sms, push",
            }),
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global message template. Not owned by any identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub name: TemplateName,
    pub subject: Subject,
    pub body: String,
    pub notification_type: NotificationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct CreateTemplateCommand {
    pub name: TemplateName,
    pub subject: Subject,
    pub body: String,
    pub notification_type: NotificationType,
}

impl CreateTemplateCommand {
    /// # Errors
    /// * `Empty` - Body is blank
    pub fn new(
        name: TemplateName,
        subject: Subject,
        body: String,
        notification_type: NotificationType,
    ) -> Result<Self, LabelError> {
        if body.trim().is_empty() {
            return Err(LabelError::Empty { field: "Body" });
        }

        Ok(Self {
            name,
            subject,
            body,
            notification_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_name_is_trimmed_and_bounded() {
        assert_eq!(
            TemplateName::new("  alert_raised ".to_string()).unwrap().as_str(),
            "alert_raised"
        );
        assert_eq!(
            TemplateName::new(" ".to_string()),
            Err(LabelError::Empty {
                field: "Template name"
            })
        );
        assert!(matches!(
            Subject::new("s".repeat(201)),
            Err(LabelError::TooLong { max: 200, actual: 201, .. })
        ));
    }

    #[test]
    fn test_notification_type_parsing() {
        assert_eq!("sms".parse::<NotificationType>(), Ok(NotificationType::Sms));
        assert_eq!(NotificationType::Push.to_string(), "push");

        let err = "fax".parse::<NotificationType>().unwrap_err();
        assert_eq!(err.value, "fax");
    }

    #[test]
    fn test_blank_body_rejected() {
        let result = CreateTemplateCommand::new(
            TemplateName::new("weekly".to_string()).unwrap(),
            Subject::new("Weekly report".to_string()).unwrap(),
            "\n".to_string(),
            NotificationType::Email,
        );

        assert!(matches!(result, Err(LabelError::Empty { field: "Body" })));
    }
}
