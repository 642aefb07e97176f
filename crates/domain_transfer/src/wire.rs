//! Wire schemas for the two inquiry protocols
//!
//! The clearinghouse ecosystem carries two divergent naming conventions for
//! what is logically the same entity. The direct broker-dealer and carrier
//! APIs speak a camelCase application protocol ([`PolicyInquiryRequest`],
//! [`PolicyInquiryResponse`]); the intermediary protocol speaks kebab-case
//! ([`BdChangeRequest`], [`CarrierResponse`], [`TransferConfirmation`]).
//! Both are normalized into canonical [`crate::ContractRecord`]s by the
//! reconciliation engine; nothing outside this crate should consume these
//! shapes directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::record::{PolicyError, ProducerError};

// ---------------------------------------------------------------------------
// Direct (camelCase) application protocol
// ---------------------------------------------------------------------------

/// Servicing agent identity on an inquiry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicingAgent {
    pub agent_name: Option<String>,
    pub npn: Option<String>,
}

/// The firm initiating the inquiry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestingFirm {
    pub firm_name: Option<String>,
    pub firm_id: Option<String>,
    pub servicing_agent: ServicingAgent,
}

/// Client identity and the policy numbers being queried
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRequest {
    pub client_name: Option<String>,
    pub ssn: Option<String>,
    pub policy_numbers: Vec<String>,
}

/// A policy inquiry issued by the requesting broker-dealer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInquiryRequest {
    pub requesting_firm: RequestingFirm,
    pub client: ClientRequest,
}

/// Carrier validation request: the caller-selected policy numbers only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyValidationRequest {
    pub policies: Vec<String>,
}

/// Systematic withdrawal details on a policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalStructure {
    pub systematic_in_place: bool,
}

/// Per-policy detail as returned by the broker-dealer or carrier
///
/// Enum-valued fields stay as raw strings here: the source systems are not
/// trusted to emit only recognized values, and the canonical mapping in
/// [`crate::record`] owns the lookup tables and their fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedPolicyInfo {
    pub policy_number: Option<String>,
    pub carrier_name: Option<String>,
    pub account_type: Option<String>,
    pub plan_type: Option<String>,
    pub ownership: Option<String>,
    pub product_name: Option<String>,
    pub cusip: Option<String>,
    #[serde(default)]
    pub trailing_commission: bool,
    pub contract_status: Option<String>,
    #[serde(default)]
    pub withdrawal_structure: WithdrawalStructure,
    #[serde(default)]
    pub errors: Vec<PolicyError>,
}

/// Client block on the response side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub client_name: Option<String>,
    pub ssn_last4: Option<String>,
    pub policies: Vec<DetailedPolicyInfo>,
}

/// Producer validation outcome: applies to the agent/firm, not a policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerValidation {
    pub agent_name: Option<String>,
    pub npn: Option<String>,
    #[serde(default)]
    pub errors: Vec<ProducerError>,
}

/// Valid enum values echoed back for client-side form population
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumReferences {
    #[serde(default)]
    pub account_type: Vec<String>,
    #[serde(default)]
    pub plan_type: Vec<String>,
}

/// Response to a policy inquiry from the broker-dealer or carrier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInquiryResponse {
    pub requesting_firm: RequestingFirm,
    pub producer_validation: ProducerValidation,
    pub client: ClientResponse,
    #[serde(default)]
    pub enums: EnumReferences,
}

// ---------------------------------------------------------------------------
// Intermediary (kebab-case) clearinghouse protocol
// ---------------------------------------------------------------------------

/// How the delivering side will answer a manifest request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Immediate,
    Deferred,
}

/// Carrier validation verdict on the intermediary protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationResult {
    Approved,
    Rejected,
}

/// Transfer confirmation verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationStatus {
    Confirmed,
    Failed,
}

/// Which side of the transfer a broker plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokerRole {
    Receiving,
    Delivering,
}

/// Minimal policy reference inside a manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ManifestPolicy {
    pub policy_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_data: Option<BTreeMap<String, Value>>,
}

/// The initial listing of policies subject to the transfer request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ManifestResponse {
    pub transaction_id: String,
    pub delivering_broker_id: String,
    pub response_type: ResponseType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<ManifestPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<BTreeMap<String, Value>>,
}

/// Broker-dealer change request routed through the intermediary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BdChangeRequest {
    pub transaction_id: String,
    pub receiving_broker_id: String,
    pub delivering_broker_id: String,
    pub carrier_id: String,
    pub policy_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_details: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_details: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_requirements: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_result: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_details: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<BTreeMap<String, Value>>,
}

/// Carrier validation verdict routed through the intermediary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CarrierResponse {
    pub transaction_id: String,
    pub carrier_id: String,
    pub policy_id: String,
    pub validation_result: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<BTreeMap<String, Value>>,
}

/// Transfer completion receipt from the delivering side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransferConfirmation {
    pub transaction_id: String,
    pub delivering_broker_id: String,
    pub policy_id: String,
    pub confirmation_status: ConfirmationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<BTreeMap<String, Value>>,
}

/// One entry of the intermediary-side status history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryItem {
    pub status: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Read-only status probe result when the intermediary owns the ledger
///
/// This is a competing source of truth; the orchestrator never auto-merges
/// it into its local ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionStatusEnvelope {
    pub transaction_id: String,
    pub current_status: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status_history: Vec<StatusHistoryItem>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_role: Option<BrokerRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_validation_details: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policies_affected: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<BTreeMap<String, Value>>,
}

/// Fire-and-forget submission acknowledgment
///
/// The envelope itself is mixed-case on the wire: `transactionId` is
/// camelCase even though the payloads it acknowledges are kebab-case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardResponse {
    pub code: String,
    pub message: String,
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}
