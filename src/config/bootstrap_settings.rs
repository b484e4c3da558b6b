use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

const DEFAULT_DATABASE_URL: &str = "sqlite://reservations.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_UPLOAD_BASE_URL: &str = "http://localhost:3000/files";

/// Infrastructure settings read once at startup
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    upload_dir: PathBuf,
    upload_base_url: String,
}

impl BootstrapSettings {
    /// Load bootstrap settings through the given environment provider
    ///
    /// Unset variables fall back to defaults; set-but-invalid values are errors.
    pub fn from_env_provider(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Result<Self, ApplicationError> {
        let read = |key: &str, default: &str| -> String {
            env_provider.get_var(key).unwrap_or_else(|| default.to_string())
        };

        let database_url = read("DATABASE_URL", DEFAULT_DATABASE_URL);
        if database_url.trim().is_empty() {
            return Err(ApplicationError::invalid("DATABASE_URL", "must not be empty"));
        }

        let server_host = read("HOST", DEFAULT_HOST);
        server_host.parse::<IpAddr>().map_err(|e| ApplicationError::ParseError {
            setting_name: "HOST".to_string(),
            error: format!("'{}' is not an IP address: {}", server_host, e),
        })?;

        let port_value = read("PORT", DEFAULT_PORT);
        let server_port = Self::parse_port(&port_value)?;

        let upload_dir = read("UPLOAD_DIR", DEFAULT_UPLOAD_DIR);
        if upload_dir.trim().is_empty() {
            return Err(ApplicationError::invalid("UPLOAD_DIR", "must not be empty"));
        }

        let upload_base_url = read("UPLOAD_BASE_URL", DEFAULT_UPLOAD_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        if !upload_base_url.starts_with("http://") && !upload_base_url.starts_with("https://") {
            return Err(ApplicationError::invalid(
                "UPLOAD_BASE_URL",
                "must start with http:// or https://",
            ));
        }

        Ok(Self {
            database_url,
            server_host,
            server_port,
            upload_dir: PathBuf::from(upload_dir),
            upload_base_url,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    fn parse_port(value: &str) -> Result<u16, ApplicationError> {
        let port: u32 = value.trim().parse().map_err(|e| ApplicationError::ParseError {
            setting_name: "PORT".to_string(),
            error: format!("'{}': {}", value, e),
        })?;

        if !(1..=65535).contains(&port) {
            return Err(ApplicationError::invalid("PORT", format!("{} is outside 1-65535", port)));
        }

        Ok(port as u16)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.upload_dir
    }

    pub fn upload_base_url(&self) -> &str {
        &self.upload_base_url
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("upload_dir", &self.upload_dir)
            .field("upload_base_url", &self.upload_base_url)
            .finish()
    }
}
