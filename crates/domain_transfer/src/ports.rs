//! Collaborator ports
//!
//! The orchestrator consumes the broker-dealer, carrier, and clearinghouse
//! APIs as opaque collaborators behind these traits. Adapters live in
//! `infra_gateway` (HTTP) and `test_utils` (randomized mocks); the domain
//! never depends on either.

use async_trait::async_trait;

use core_kernel::TransactionId;
use thiserror::Error;

use crate::wire::{
    BdChangeRequest, CarrierResponse, ManifestResponse, PolicyInquiryRequest,
    PolicyInquiryResponse, PolicyValidationRequest, StandardResponse, TransactionStatusEnvelope,
    TransferConfirmation,
};

/// Error type for collaborator calls
///
/// A failed call never partially mutates a transaction: the orchestrator
/// surfaces the error to the caller and leaves ledger and record sets
/// untouched so the inquiry can be retried.
#[derive(Debug, Error)]
pub enum InquiryError {
    /// Connection to the collaborator failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The call exceeded its deadline
    #[error("Timeout after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The collaborator answered with a non-success status code
    #[error("Upstream returned status {code}: {message}")]
    Status { code: u16, message: String },

    /// The response body could not be decoded
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// The caller cancelled the inquiry
    #[error("Inquiry cancelled")]
    Cancelled,
}

impl InquiryError {
    pub fn connection(message: impl Into<String>) -> Self {
        InquiryError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        InquiryError::Decode {
            message: message.into(),
        }
    }
}

/// Direct broker-dealer query collaborator
#[async_trait]
pub trait BrokerDealerPort: Send + Sync {
    /// Queries the broker-dealer for the client's existing policies
    async fn query_policies(
        &self,
        transaction_id: TransactionId,
        request: &PolicyInquiryRequest,
    ) -> Result<PolicyInquiryResponse, InquiryError>;
}

/// Direct carrier validation collaborator
#[async_trait]
pub trait CarrierPort: Send + Sync {
    /// Asks the carrier to validate the selected policy numbers
    async fn validate_policies(
        &self,
        transaction_id: TransactionId,
        request: &PolicyValidationRequest,
    ) -> Result<PolicyInquiryResponse, InquiryError>;
}

/// Intermediary-routed clearinghouse collaborator
///
/// The submit operations are fire-and-forget: payloads pass through
/// opaquely and only the acknowledgment envelope comes back. The status
/// probe reads a competing source of truth; the orchestrator never merges
/// it into its local ledger automatically.
#[async_trait]
pub trait ClearinghousePort: Send + Sync {
    async fn submit_policy_inquiry_request(
        &self,
        transaction_id: TransactionId,
        request: &PolicyInquiryRequest,
    ) -> Result<StandardResponse, InquiryError>;

    async fn submit_policy_inquiry_response(
        &self,
        transaction_id: TransactionId,
        response: &PolicyInquiryResponse,
    ) -> Result<StandardResponse, InquiryError>;

    async fn receive_manifest_response(
        &self,
        transaction_id: TransactionId,
        manifest: &ManifestResponse,
    ) -> Result<StandardResponse, InquiryError>;

    async fn receive_bd_change_request(
        &self,
        transaction_id: TransactionId,
        request: &BdChangeRequest,
    ) -> Result<StandardResponse, InquiryError>;

    async fn receive_carrier_response(
        &self,
        transaction_id: TransactionId,
        response: &CarrierResponse,
    ) -> Result<StandardResponse, InquiryError>;

    async fn receive_transfer_confirmation(
        &self,
        transaction_id: TransactionId,
        confirmation: &TransferConfirmation,
    ) -> Result<StandardResponse, InquiryError>;

    async fn query_transaction_status(
        &self,
        transaction_id: TransactionId,
    ) -> Result<TransactionStatusEnvelope, InquiryError>;
}
