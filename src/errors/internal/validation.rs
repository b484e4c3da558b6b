use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Unknown {kind}: '{value}'")]
    InvalidStatusName { kind: String, value: String },
}

impl ValidationError {
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_status_name(kind: &str, value: &str) -> Self {
        Self::InvalidStatusName {
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }
}
