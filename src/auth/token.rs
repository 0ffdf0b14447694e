use crate::error::AppError;
use crate::models::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The user's id.
    pub sub: Uuid,
    pub email: String,
    /// Only present when a token lifetime is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

/// Signing and verification keys for session tokens.
///
/// Tokens are HS256 over `{sub, email}` with no issued-at claim, so the same
/// user always receives the same token unless a lifetime is configured.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<chrono::Duration>,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_hours: Option<i64>) -> Self {
        let mut validation = Validation::default();
        // `exp` is optional; when present it is still checked.
        validation.set_required_spec_claims::<&str>(&[]);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: ttl_hours.map(chrono::Duration::hours),
        }
    }

    /// Issues a token identifying `user`.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let exp = match self.ttl {
            Some(ttl) => {
                let expires_at = chrono::Utc::now().checked_add_signed(ttl).ok_or_else(|| {
                    AppError::Internal("token expiry overflows the calendar".into())
                })?;
                Some(expires_at.timestamp() as usize)
            }
            None => None,
        };

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token's signature (and expiry, if it has one) and decodes
    /// its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}
