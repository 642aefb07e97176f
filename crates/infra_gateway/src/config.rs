//! Gateway configuration

use serde::Deserialize;

use core_kernel::CoreError;

/// Base URLs and timeouts for the external collaborator APIs
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Broker-dealer API base URL
    pub broker_dealer_url: String,
    /// Insurance carrier API base URL
    pub carrier_url: String,
    /// Clearinghouse intermediary API base URL
    pub clearinghouse_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            broker_dealer_url: "http://localhost:9001".to_string(),
            carrier_url: "http://localhost:9002".to_string(),
            clearinghouse_url: "http://localhost:9003".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment (GATEWAY_* variables)
    pub fn from_env() -> Result<Self, CoreError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("GATEWAY"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|err| CoreError::Configuration(err.to_string()))
    }
}
