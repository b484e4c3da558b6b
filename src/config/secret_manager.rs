use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::config::{EnvironmentProvider, SystemEnvironment};

const PEPPER_VAR: &str = "PASSWORD_PEPPER";
const PEPPER_MIN_LENGTH: usize = 16;
const SIGNING_KEY_BYTES: usize = 32;

/// Custom error type for secret-related failures
#[derive(Debug)]
pub enum SecretError {
    InvalidLength { secret_name: String, expected: usize, actual: usize },
}

impl SecretError {
    pub fn invalid_length(secret_name: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            secret_name: secret_name.to_string(),
            expected,
            actual,
        }
    }
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { secret_name, expected, actual } => {
                write!(
                    f,
                    "Secret '{}' must be at least {} characters, got {}",
                    secret_name, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for SecretError {}

/// Holds the process secrets
///
/// The token signing key is generated fresh on every start and never leaves
/// memory, so a restart invalidates every issued session. The password
/// pepper is optional and comes from the environment.
pub struct SecretManager {
    token_signing_key: Vec<u8>,
    password_pepper: Option<String>,
}

impl SecretManager {
    /// Initialize from the process environment
    pub fn init() -> Result<Self, SecretError> {
        Self::init_with_provider(Arc::new(SystemEnvironment))
    }

    pub fn init_with_provider(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Result<Self, SecretError> {
        let password_pepper = match env_provider.get_non_empty(PEPPER_VAR) {
            Some(pepper) if pepper.len() < PEPPER_MIN_LENGTH => {
                return Err(SecretError::invalid_length(PEPPER_VAR, PEPPER_MIN_LENGTH, pepper.len()));
            }
            other => other,
        };

        if password_pepper.is_none() {
            tracing::warn!("{} not set; password hashes will not be peppered", PEPPER_VAR);
        }

        Ok(Self {
            token_signing_key: Self::generate_signing_key(),
            password_pepper,
        })
    }

    /// Build a manager with explicit material (tests and tooling)
    pub fn with_secrets(token_signing_key: Vec<u8>, password_pepper: Option<String>) -> Self {
        Self {
            token_signing_key,
            password_pepper,
        }
    }

    fn generate_signing_key() -> Vec<u8> {
        let mut rng = rand::rng();
        let key: [u8; SIGNING_KEY_BYTES] = rng.random();
        key.to_vec()
    }

    pub fn token_signing_key(&self) -> &[u8] {
        &self.token_signing_key
    }

    pub fn password_pepper(&self) -> Option<&str> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("token_signing_key", &"<redacted>")
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SecretManager {{ signing_key: {} bytes, pepper: {} }}",
            self.token_signing_key.len(),
            if self.password_pepper.is_some() { "set" } else { "unset" }
        )
    }
}
