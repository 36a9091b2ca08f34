//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (HS256 bearer tokens).
///
/// The host application mints tokens with the same shared secret; this
/// service only validates them.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared signing secret for token validation.
    pub jwt_secret: SecretString,
}

impl AuthConfig {
    /// Validate authentication configuration.
    ///
    /// Production requires a secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(String::new()),
        }
    }
}
