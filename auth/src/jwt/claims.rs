use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload of an access token.
///
/// `sub` carries the username of the identity the token was issued to.
/// `iat` and `exp` are Unix timestamps in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Build claims for `subject`, valid from `issued_at` for `ttl`.
    pub fn for_subject(subject: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// A token stops being valid at the exact second of its expiry.
    pub fn is_expired_at(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let now = Utc::now();
        let claims = Claims::for_subject("alice", now, Duration::minutes(30));

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_is_expired_at_boundary() {
        let claims = Claims {
            sub: "alice".to_string(),
            iat: 900,
            exp: 1000,
        };

        assert!(!claims.is_expired_at(999));
        assert!(claims.is_expired_at(1000));
        assert!(claims.is_expired_at(1001));
    }

    #[test]
    fn test_expires_at_matches_exp() {
        let claims = Claims {
            sub: "alice".to_string(),
            iat: 0,
            exp: 1_700_000_000,
        };

        assert_eq!(claims.expires_at().timestamp(), 1_700_000_000);
    }
}
