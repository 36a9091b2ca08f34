//! HS256 JWT adapter for bearer token validation.
//!
//! This adapter implements the `SessionValidator` port against tokens
//! minted by the host application with a shared secret. It validates the
//! signature and expiry claim and maps the standard claims to the domain
//! `AuthenticatedUser` type. Token issuance never happens here.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Claims expected in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Subject - the user id.
    sub: String,
    /// Expiry as Unix seconds (validated by jsonwebtoken).
    exp: u64,
    /// Email claim.
    #[serde(default)]
    email: Option<String>,
    /// Display name claim.
    #[serde(default)]
    name: Option<String>,
}

/// Session validator for HS256-signed tokens.
pub struct JwtSessionValidator {
    secret: SecretString,
    validation: Validation,
}

impl JwtSessionValidator {
    /// Creates a validator with the shared signing secret.
    pub fn new(secret: SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self { secret, validation }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let data = decode::<Claims>(token, &key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let claims = data.claims;
        let id = UserId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let email = claims.email.unwrap_or_default();
        Ok(AuthenticatedUser::new(id, email, claims.name))
    }
}
