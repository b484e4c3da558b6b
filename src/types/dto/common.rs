use poem_openapi::Object;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Uniform envelope returned by identity endpoints and by every error path
#[derive(Object, Debug)]
pub struct ErrorEnvelope {
    /// HTTP status code
    pub status: u16,

    /// Human-readable message
    pub message: String,

    /// Always null for errors
    pub data: Option<serde_json::Value>,
}
