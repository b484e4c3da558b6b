use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// Email or phone already registered to another account
    #[error("{field} is already registered: {value}")]
    DuplicateIdentity { field: String, value: String },

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    BadCredential,

    #[error("Customer account is not active (status {status})")]
    AccountNotActive { status: String },

    #[error("Owner account is not approved (status {status})")]
    AccountNotApproved { status: String },

    #[error("Account role {actual} does not match {expected}")]
    WrongRole { expected: String, actual: String },

    #[error("Invalid business registration document: {0}")]
    InvalidDocument(String),
}

impl CredentialError {
    pub fn duplicate(field: &str, value: &str) -> Self {
        Self::DuplicateIdentity {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn wrong_role(expected: &str, actual: &str) -> Self {
        Self::WrongRole {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
