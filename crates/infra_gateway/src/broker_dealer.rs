//! Broker-dealer HTTP adapter

use async_trait::async_trait;
use tracing::instrument;

use core_kernel::TransactionId;
use domain_transfer::wire::{PolicyInquiryRequest, PolicyInquiryResponse};
use domain_transfer::{BrokerDealerPort, InquiryError};

use crate::client::HttpTransport;
use crate::config::GatewayConfig;

/// HTTP client for the direct broker-dealer query API
pub struct BrokerDealerClient {
    transport: HttpTransport,
    base_url: String,
}

impl BrokerDealerClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, InquiryError> {
        Ok(Self {
            transport: HttpTransport::new(config.timeout_ms)?,
            base_url: config.broker_dealer_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl BrokerDealerPort for BrokerDealerClient {
    #[instrument(skip(self, request), fields(transaction_id = %transaction_id))]
    async fn query_policies(
        &self,
        transaction_id: TransactionId,
        request: &PolicyInquiryRequest,
    ) -> Result<PolicyInquiryResponse, InquiryError> {
        let url = format!("{}/query-policies", self.base_url);
        self.transport.post_json(&url, transaction_id, request).await
    }
}
