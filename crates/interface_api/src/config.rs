//! API configuration

use serde::Deserialize;

use core_kernel::CoreError;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, CoreError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|err| CoreError::Configuration(err.to_string()))
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
