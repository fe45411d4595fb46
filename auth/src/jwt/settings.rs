use chrono::Duration;
use serde::Deserialize;

/// Process-wide token configuration.
///
/// Deserialized from the `jwt` section of each service's configuration and
/// handed to `Authenticator::new` once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub secret: String,

    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expiration_minutes() -> i64 {
    30
}

impl TokenSettings {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: default_algorithm(),
            expiration_minutes: default_expiration_minutes(),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.expiration_minutes)
    }
}
