//! Clearinghouse intermediary HTTP adapter
//!
//! Endpoint names mirror the intermediary protocol: the receipt
//! submissions are fire-and-forget POSTs acknowledged with a
//! [`StandardResponse`] envelope, and the status probe is a GET against
//! the intermediary's own ledger view.

use async_trait::async_trait;
use tracing::instrument;

use core_kernel::TransactionId;
use domain_transfer::wire::{
    BdChangeRequest, CarrierResponse, ManifestResponse, PolicyInquiryRequest,
    PolicyInquiryResponse, StandardResponse, TransactionStatusEnvelope, TransferConfirmation,
};
use domain_transfer::{ClearinghousePort, InquiryError};

use crate::client::HttpTransport;
use crate::config::GatewayConfig;

/// HTTP client for the clearinghouse intermediary API
pub struct ClearinghouseClient {
    transport: HttpTransport,
    base_url: String,
}

impl ClearinghouseClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, InquiryError> {
        Ok(Self {
            transport: HttpTransport::new(config.timeout_ms)?,
            base_url: config.clearinghouse_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[async_trait]
impl ClearinghousePort for ClearinghouseClient {
    #[instrument(skip(self, request), fields(transaction_id = %transaction_id))]
    async fn submit_policy_inquiry_request(
        &self,
        transaction_id: TransactionId,
        request: &PolicyInquiryRequest,
    ) -> Result<StandardResponse, InquiryError> {
        self.transport
            .post_json(
                &self.endpoint("submit-policy-inquiry-request"),
                transaction_id,
                request,
            )
            .await
    }

    #[instrument(skip(self, response), fields(transaction_id = %transaction_id))]
    async fn submit_policy_inquiry_response(
        &self,
        transaction_id: TransactionId,
        response: &PolicyInquiryResponse,
    ) -> Result<StandardResponse, InquiryError> {
        self.transport
            .post_json(
                &self.endpoint("submit-policy-inquiry-response"),
                transaction_id,
                response,
            )
            .await
    }

    #[instrument(skip(self, manifest), fields(transaction_id = %transaction_id))]
    async fn receive_manifest_response(
        &self,
        transaction_id: TransactionId,
        manifest: &ManifestResponse,
    ) -> Result<StandardResponse, InquiryError> {
        self.transport
            .post_json(
                &self.endpoint("receive-manifest-response"),
                transaction_id,
                manifest,
            )
            .await
    }

    #[instrument(skip(self, request), fields(transaction_id = %transaction_id))]
    async fn receive_bd_change_request(
        &self,
        transaction_id: TransactionId,
        request: &BdChangeRequest,
    ) -> Result<StandardResponse, InquiryError> {
        self.transport
            .post_json(
                &self.endpoint("receive-bd-change-request"),
                transaction_id,
                request,
            )
            .await
    }

    #[instrument(skip(self, response), fields(transaction_id = %transaction_id))]
    async fn receive_carrier_response(
        &self,
        transaction_id: TransactionId,
        response: &CarrierResponse,
    ) -> Result<StandardResponse, InquiryError> {
        self.transport
            .post_json(
                &self.endpoint("receive-carrier-response"),
                transaction_id,
                response,
            )
            .await
    }

    #[instrument(skip(self, confirmation), fields(transaction_id = %transaction_id))]
    async fn receive_transfer_confirmation(
        &self,
        transaction_id: TransactionId,
        confirmation: &TransferConfirmation,
    ) -> Result<StandardResponse, InquiryError> {
        self.transport
            .post_json(
                &self.endpoint("receive-transfer-confirmation"),
                transaction_id,
                confirmation,
            )
            .await
    }

    #[instrument(skip(self), fields(transaction_id = %transaction_id))]
    async fn query_transaction_status(
        &self,
        transaction_id: TransactionId,
    ) -> Result<TransactionStatusEnvelope, InquiryError> {
        let url = self.endpoint(&format!("query-status/{transaction_id}"));
        self.transport.get_json(&url).await
    }
}
