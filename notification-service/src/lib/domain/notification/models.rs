use std::fmt;
use std::str::FromStr;

use auth::UserId;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::template::errors::IdError;
use crate::domain::template::errors::VariantError;
use crate::domain::template::models::NotificationType;
use crate::domain::template::models::Subject;
use crate::domain::template::models::Template;
use crate::domain::template::models::TemplateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s)
            .map(NotificationId)
            .map_err(|e| IdError::InvalidFormat(e.to_string()))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Urgency of a notification, ordered low < medium < high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(VariantError {
                field: "priority",
                value: other.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message queued for an identity. Delivery happens elsewhere; this record only
/// tracks whether a dispatcher reported it sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub owner_id: UserId,
    pub template_id: TemplateId,
    pub notification_type: NotificationType,
    pub priority: Priority,
    pub subject: Subject,
    pub body: String,
    pub is_sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Build a pending notification from `template`, letting the command override
    /// channel, subject and body.
    pub fn from_template(
        owner_id: UserId,
        template: &Template,
        command: CreateNotificationCommand,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            owner_id,
            template_id: template.id,
            notification_type: command
                .notification_type
                .unwrap_or(template.notification_type),
            priority: command.priority.unwrap_or_default(),
            subject: command.subject.unwrap_or_else(|| template.subject.clone()),
            body: command.body.unwrap_or_else(|| template.body.clone()),
            is_sent: false,
            sent_at: None,
            error_message: None,
            created_at: now,
            updated_at: None,
        }
    }

    /// Record a dispatch attempt. A later report replaces `sent_at`; an error
    /// message, once recorded, is kept unless a new one arrives.
    pub fn mark_sent(&mut self, at: DateTime<Utc>, error_message: Option<String>) {
        self.is_sent = true;
        self.sent_at = Some(at);
        if error_message.is_some() {
            self.error_message = error_message;
        }
        self.updated_at = Some(at);
    }
}

#[derive(Debug, Clone)]
pub struct CreateNotificationCommand {
    pub template_id: TemplateId,
    pub notification_type: Option<NotificationType>,
    pub priority: Option<Priority>,
    pub subject: Option<Subject>,
    pub body: Option<String>,
}
