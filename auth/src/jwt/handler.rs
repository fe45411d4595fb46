use std::str::FromStr;

use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Symmetric JWT signer/verifier.
///
/// Only the HMAC family is accepted since the same process-wide secret both
/// signs and verifies. Verification is stateless: signature, shape and expiry
/// are checked, nothing is looked up.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a handler for `secret` signing with `algorithm`.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret (at least 32 bytes recommended)
    /// * `algorithm` - Algorithm name, one of `HS256`, `HS384`, `HS512`
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Name is unknown or not an HMAC algorithm
    pub fn new(secret: &[u8], algorithm: &str) -> Result<Self, JwtError> {
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Self::parse_algorithm(algorithm)?,
        })
    }

    fn parse_algorithm(name: &str) -> Result<Algorithm, JwtError> {
        match Algorithm::from_str(name) {
            Ok(algorithm @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => {
                Ok(algorithm)
            }
            _ => Err(JwtError::UnsupportedAlgorithm(name.to_string())),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign claims into a compact JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signed with another secret or another algorithm
    /// * `TokenExpired` - Current time is at or past `exp`
    /// * `Malformed` - Not a JWT, or `sub`/`exp` missing
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    JwtError::InvalidSignature
                }
                _ => JwtError::Malformed(e.to_string()),
            })?;

        // The library accepts a token during its expiry second; we do not.
        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
