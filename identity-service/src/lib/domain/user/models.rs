use std::fmt;

use auth::Caller;
use auth::UserId;
use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UsernameError;

/// Registered identity.
///
/// Never hard-deleted; deactivation goes through `is_active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// The access-control view of this identity.
    pub fn as_caller(&self) -> Caller {
        Caller {
            id: self.id,
            username: self.username.as_str().to_string(),
            is_active: self.is_active,
            is_superuser: self.is_superuser,
        }
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Only the bare
/// `local@domain` form is accepted, so one mailbox has one spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `TooLong` - Email longer than 255 characters
    /// * `InvalidFormat` - Email does not conform to RFC 5322, or carries display text
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        let options = email_address::Options::default().without_display_text();
        email_address::EmailAddress::parse_with_options(&email, options)
            .map(|parsed| EmailAddress(parsed.email()))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext secret that satisfies the password policy. Only ever hashed,
/// never stored or logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new identity
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterUserCommand {
    pub fn new(username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Partial update of an identity. Only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl UpdateUserCommand {
    /// Whether the update touches the account flags only privileged callers may set.
    pub fn changes_privileges(&self) -> bool {
        self.is_active.is_some() || self.is_superuser.is_some()
    }
}

#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub current_password: String,
    pub new_password: Password,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(Username::new("alice".to_string()).is_ok());
        assert!(Username::new("bee_keeper-01".to_string()).is_ok());
        assert_eq!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
        assert_eq!(
            Username::new("a".repeat(33)),
            Err(UsernameError::TooLong {
                max: 32,
                actual: 33
            })
        );
        assert_eq!(
            Username::new("alice smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("alice@x.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(matches!(
            EmailAddress::new("Mallory <alice@x.com>".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_email_length_boundary() {
        let label = "b".repeat(63);
        let domain = format!("{label}.{label}.{label}.com");

        let at_limit = format!("{}@{}", "a".repeat(255 - 1 - domain.len()), domain);
        assert_eq!(at_limit.len(), 255);
        assert_eq!(
            EmailAddress::new(at_limit.clone()).map(|e| e.as_str().to_string()),
            Ok(at_limit)
        );

        let over_limit = format!("{}@{}", "a".repeat(64), domain);
        assert_eq!(
            EmailAddress::new(over_limit),
            Err(EmailError::TooLong {
                max: 255,
                actual: 260
            })
        );
    }

    #[test]
    fn test_password_policy() {
        assert!(Password::new("pw123456".to_string()).is_ok());
        assert_eq!(
            Password::new("short".to_string()),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 5 })
        );
    }

    #[test]
    fn test_password_debug_hides_secret() {
        let password = Password::new("pw123456".to_string()).unwrap();

        assert!(!format!("{:?}", password).contains("pw123456"));
    }

    #[test]
    fn test_changes_privileges() {
        assert!(!UpdateUserCommand::default().changes_privileges());
        assert!(UpdateUserCommand {
            is_active: Some(false),
            ..Default::default()
        }
        .changes_privileges());
    }
}
