//! Insurance carrier HTTP adapter

use async_trait::async_trait;
use tracing::instrument;

use core_kernel::TransactionId;
use domain_transfer::wire::{PolicyInquiryResponse, PolicyValidationRequest};
use domain_transfer::{CarrierPort, InquiryError};

use crate::client::HttpTransport;
use crate::config::GatewayConfig;

/// HTTP client for the direct carrier validation API
pub struct CarrierClient {
    transport: HttpTransport,
    base_url: String,
}

impl CarrierClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, InquiryError> {
        Ok(Self {
            transport: HttpTransport::new(config.timeout_ms)?,
            base_url: config.carrier_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CarrierPort for CarrierClient {
    #[instrument(skip(self, request), fields(transaction_id = %transaction_id, policies = request.policies.len()))]
    async fn validate_policies(
        &self,
        transaction_id: TransactionId,
        request: &PolicyValidationRequest,
    ) -> Result<PolicyInquiryResponse, InquiryError> {
        let url = format!("{}/validate-policies", self.base_url);
        self.transport.post_json(&url, transaction_id, request).await
    }
}
