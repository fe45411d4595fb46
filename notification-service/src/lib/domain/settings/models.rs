use std::fmt;

use auth::UserId;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::notification::models::Priority;
use crate::domain::template::errors::LabelError;
use crate::domain::template::models::bounded_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingsId(pub Uuid);

impl SettingsId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SettingsId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SettingsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Optional contact detail (e-mail address or phone number), trimmed and bounded.
pub fn contact(
    value: Option<String>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, LabelError> {
    value.map(|v| bounded_text(v, field, max)).transpose()
}

/// Per-identity delivery preferences. At most one row per identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub id: SettingsId,
    pub owner_id: UserId,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub push_enabled: bool,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub min_priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl NotificationSettings {
    /// New settings for `owner_id`; omitted fields take their defaults
    /// (e-mail and push on, SMS off, minimum priority medium).
    pub fn new(owner_id: UserId, command: CreateSettingsCommand, now: DateTime<Utc>) -> Self {
        Self {
            id: SettingsId::new(),
            owner_id,
            email_enabled: command.email_enabled.unwrap_or(true),
            sms_enabled: command.sms_enabled.unwrap_or(false),
            push_enabled: command.push_enabled.unwrap_or(true),
            email_address: command.email_address,
            phone_number: command.phone_number,
            min_priority: command.min_priority.unwrap_or_default(),
            created_at: now,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateSettingsCommand {
    pub email_enabled: Option<bool>,
    pub sms_enabled: Option<bool>,
    pub push_enabled: Option<bool>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub min_priority: Option<Priority>,
}

/// Partial settings update. Only provided fields change.
#[derive(Debug, Clone, Default)]
pub struct UpdateSettingsCommand {
    pub email_enabled: Option<bool>,
    pub sms_enabled: Option<bool>,
    pub push_enabled: Option<bool>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub min_priority: Option<Priority>,
}

impl UpdateSettingsCommand {
    pub fn apply(self, settings: &mut NotificationSettings, now: DateTime<Utc>) {
        if let Some(enabled) = self.email_enabled {
            settings.email_enabled = enabled;
        }
        if let Some(enabled) = self.sms_enabled {
            settings.sms_enabled = enabled;
        }
        if let Some(enabled) = self.push_enabled {
            settings.push_enabled = enabled;
        }
        if let Some(address) = self.email_address {
            settings.email_address = Some(address);
        }
        if let Some(number) = self.phone_number {
            settings.phone_number = Some(number);
        }
        if let Some(priority) = self.min_priority {
            settings.min_priority = priority;
        }
        settings.updated_at = Some(now);
    }
}
