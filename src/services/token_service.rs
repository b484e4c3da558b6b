use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::errors::internal::{InternalError, TokenError};
use crate::types::internal::{Claims, Role};

/// Session tokens live for one hour
pub const TOKEN_LIFETIME_SECONDS: i64 = 60 * 60;

/// Issues and checks HS256 session tokens
///
/// Stateless: a token is valid exactly when its signature verifies under
/// this process's key and it has not expired.
pub struct TokenService {
    signing_key: Vec<u8>,
    lifetime_seconds: i64,
}

impl TokenService {
    pub fn new(signing_key: Vec<u8>) -> Self {
        Self::with_lifetime(signing_key, TOKEN_LIFETIME_SECONDS)
    }

    pub fn with_lifetime(signing_key: Vec<u8>, lifetime_seconds: i64) -> Self {
        Self {
            signing_key,
            lifetime_seconds,
        }
    }

    pub fn lifetime_seconds(&self) -> i64 {
        self.lifetime_seconds
    }

    /// Issue a token binding `subject` (the account email) to `role`
    pub fn issue(&self, subject: &str, role: Role) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: subject.to_string(),
            role: role.as_str().to_string(),
            iat: now,
            exp: now + self.lifetime_seconds,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.signing_key),
        )
        .map_err(|e| TokenError::SigningFailed(e.to_string()).into())
    }

    /// True iff the signature verifies and the token has not expired
    pub fn validate(&self, token: &str) -> bool {
        match self.decode(token) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Token rejected: {}", e);
                false
            }
        }
    }

    /// Subject of a verified token
    pub fn extract_subject(&self, token: &str) -> Result<String, InternalError> {
        Ok(self.claims(token)?.sub)
    }

    /// All claims of a verified token
    pub fn claims(&self, token: &str) -> Result<Claims, InternalError> {
        self.decode(token)
            .map_err(|e| TokenError::MalformedToken(e.to_string()).into())
    }

    fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&self.signing_key), &validation)?;

        // jsonwebtoken still accepts exp == now; a token dies at its exp second
        if token_data.claims.exp <= Utc::now().timestamp() {
            return Err(jsonwebtoken::errors::ErrorKind::ExpiredSignature.into());
        }

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("signing_key", &"<redacted>")
            .field("lifetime_seconds", &self.lifetime_seconds)
            .finish()
    }
}

impl fmt::Display for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenService {{ lifetime: {}s }}", self.lifetime_seconds)
    }
}
