use std::fmt;

/// Source of the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    /// HTTP endpoint
    API,

    /// CLI command
    CLI,
}

impl fmt::Display for RequestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestSource::API => write!(f, "api"),
            RequestSource::CLI => write!(f, "cli"),
        }
    }
}
