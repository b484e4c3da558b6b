use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}
