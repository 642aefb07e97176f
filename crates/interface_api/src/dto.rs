//! Request/response DTOs for the transfer API
//!
//! Inbound DTOs own input validation; the wire types in
//! [`domain_transfer::wire`] stay permissive because they also decode
//! collaborator responses we do not control.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::TransactionId;
use domain_transfer::wire::{ClientRequest, PolicyInquiryRequest, RequestingFirm, ServicingAgent};
use domain_transfer::{
    ContractRecord, ProducerError, StatusLedger, TransactionStatus, TransferTransaction,
};

/// Broker-dealer inquiry submission
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BrokerInquiryRequest {
    pub firm_name: Option<String>,
    pub firm_id: Option<String>,
    pub agent_name: Option<String>,
    pub npn: Option<String>,
    pub client_name: Option<String>,
    pub ssn: Option<String>,
    #[validate(length(min = 1, message = "at least one policy number is required"))]
    pub policy_numbers: Vec<String>,
}

impl BrokerInquiryRequest {
    pub fn into_wire(self) -> PolicyInquiryRequest {
        PolicyInquiryRequest {
            requesting_firm: RequestingFirm {
                firm_name: self.firm_name,
                firm_id: self.firm_id,
                servicing_agent: ServicingAgent {
                    agent_name: self.agent_name,
                    npn: self.npn,
                },
            },
            client: ClientRequest {
                client_name: self.client_name,
                ssn: self.ssn,
                policy_numbers: self.policy_numbers,
            },
        }
    }
}

/// Carrier validation submission: which broker-side records to validate
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CarrierInquiryRequest {
    #[validate(length(min = 1, message = "at least one policy number is required"))]
    pub policy_numbers: Vec<String>,
}

/// Manual status append, with an operator override escape hatch
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendStatusRequest {
    pub status: TransactionStatus,
    pub notes: Option<String>,
    #[serde(default, rename = "override")]
    pub overridden: bool,
}

/// Full transaction view: ledger plus both reconciled record sets
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: TransactionId,
    pub current_status: Option<TransactionStatus>,
    pub terminal: bool,
    pub ledger: StatusLedger,
    pub dtcc_records: Vec<ContractRecord>,
    pub carrier_records: Vec<ContractRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&TransferTransaction> for TransactionView {
    fn from(txn: &TransferTransaction) -> Self {
        Self {
            id: txn.id,
            current_status: txn.current_status(),
            terminal: txn.is_terminal(),
            ledger: txn.ledger.clone(),
            dtcc_records: txn.dtcc_records.clone(),
            carrier_records: txn.carrier_records.clone(),
            created_at: txn.created_at,
            updated_at: txn.updated_at,
        }
    }
}

/// Outcome of one inquiry phase as seen by the caller
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryOutcomeView {
    pub transaction_id: TransactionId,
    pub current_status: Option<TransactionStatus>,
    pub records: Vec<ContractRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub producer_errors: Vec<ProducerError>,
}
