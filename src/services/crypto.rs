use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _,
    PasswordVerifier as _, Version,
};
use std::fmt;

use crate::errors::InternalError;

/// Argon2id password hashing with an optional pepper
///
/// The pepper is passed as Argon2's secret parameter, so digests produced
/// with one pepper never verify under another.
pub struct PasswordHasher {
    pepper: Option<String>,
}

impl PasswordHasher {
    pub fn new(pepper: Option<String>) -> Self {
        Self { pepper }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        match &self.pepper {
            Some(pepper) => Argon2::new_with_secret(
                pepper.as_bytes(),
                Algorithm::Argon2id,
                Version::V0x13,
                Params::default(),
            )
            .map_err(|e| InternalError::crypto("argon2_init", e.to_string())),
            None => Ok(Argon2::default()),
        }
    }

    /// Hash a plaintext secret into a PHC string
    pub fn hash(&self, plaintext: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let digest = self
            .argon2()?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?
            .to_string();

        Ok(digest)
    }

    /// Check a plaintext secret against a stored digest
    ///
    /// An unparseable digest never verifies.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password digest is not a valid PHC string: {}", e);
                return false;
            }
        };

        match self.argon2() {
            Ok(argon2) => argon2.verify_password(plaintext.as_bytes(), &parsed).is_ok(),
            Err(e) => {
                tracing::error!("{}", e);
                false
            }
        }
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("pepper", &self.pepper.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new(Some("test-pepper-for-unit-tests".to_string()));
        let digest = hasher.hash("Reservation2024").unwrap();

        assert!(digest.starts_with("$argon2id$"));
        assert!(hasher.verify("Reservation2024", &digest));
        assert!(!hasher.verify("reservation2024", &digest));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::new(None);
        let first = hasher.hash("Reservation2024").unwrap();
        let second = hasher.hash("Reservation2024").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("Reservation2024", &second));
    }

    #[test]
    fn test_pepper_mismatch_fails_verification() {
        let digest = PasswordHasher::new(Some("first-pepper-value-123".to_string()))
            .hash("Reservation2024")
            .unwrap();
        let other = PasswordHasher::new(Some("second-pepper-value-456".to_string()));

        assert!(!other.verify("Reservation2024", &digest));
    }

    #[test]
    fn test_garbage_digest_does_not_verify() {
        let hasher = PasswordHasher::new(None);
        assert!(!hasher.verify("anything", "not-a-phc-string"));
    }
}
