//! Transaction orchestrator
//!
//! Sequences one inquiry → reconcile → status-append cycle per external
//! call. The two operations mirror the real-world inquiry phases: the
//! broker-dealer inquiry producing the DTCC-side result set, then carrier
//! validation over a caller-selected subset of those records.
//!
//! Failure policy: when a collaborator call fails, no failure status is
//! appended and the record sets stay untouched. Transient failures must
//! not corrupt transaction history; the caller decides whether to retry.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use core_kernel::{InquiryId, TransactionId};

use crate::error::TransferError;
use crate::ledger::TransactionStatus;
use crate::ports::{BrokerDealerPort, CarrierPort, ClearinghousePort};
use crate::reconcile::{reconcile, InquiryPhase, RawInquiry, ReconcileOutcome};
use crate::record::ContractRecord;
use crate::transaction::TransferTransaction;
use crate::wire::{
    BdChangeRequest, CarrierResponse, ManifestResponse, PolicyInquiryRequest,
    PolicyInquiryResponse, PolicyValidationRequest, StandardResponse, TransactionStatusEnvelope,
    TransferConfirmation,
};

/// Drives a transaction through the status state machine, coordinating the
/// external collaborators and the reconciliation engine
pub struct TransferOrchestrator {
    broker: Arc<dyn BrokerDealerPort>,
    carrier: Arc<dyn CarrierPort>,
    clearinghouse: Arc<dyn ClearinghousePort>,
}

impl TransferOrchestrator {
    pub fn new(
        broker: Arc<dyn BrokerDealerPort>,
        carrier: Arc<dyn CarrierPort>,
        clearinghouse: Arc<dyn ClearinghousePort>,
    ) -> Self {
        Self {
            broker,
            carrier,
            clearinghouse,
        }
    }

    /// Runs the broker-dealer inquiry phase
    ///
    /// Queries the broker-dealer, reconciles the response, appends
    /// `CARRIER_VALIDATION_PENDING` as the step after
    /// `DUE_DILIGENCE_COMPLETE` (plus `CARRIER_REJECTED` when producer
    /// validation already fails), and stores the records as the
    /// transaction's DTCC-side result set.
    #[instrument(skip(self, transaction, request), fields(transaction_id = %transaction.id))]
    pub async fn run_broker_inquiry(
        &self,
        transaction: &mut TransferTransaction,
        request: &PolicyInquiryRequest,
    ) -> Result<ReconcileOutcome, TransferError> {
        if transaction.current_status() != Some(TransactionStatus::DueDiligenceComplete) {
            return Err(TransferError::sequence(format!(
                "broker inquiry requires DUE_DILIGENCE_COMPLETE, transaction is at {:?}",
                transaction.current_status()
            )));
        }

        let inquiry_id = InquiryId::new_v7();
        info!(%inquiry_id, "querying broker-dealer");
        let response = self.broker.query_policies(transaction.id, request).await?;
        let outcome = reconcile(&RawInquiry::Direct(response), None, InquiryPhase::Broker);

        // Stage the ledger before touching the transaction so a rejected
        // append leaves it untouched
        let now = Utc::now();
        let mut ledger =
            transaction
                .ledger
                .append(TransactionStatus::CarrierValidationPending, now, None)?;
        if outcome.next_status_hint == TransactionStatus::CarrierRejected {
            let reason = outcome
                .producer_errors
                .iter()
                .find(|error| error.is_blocking())
                .map(|error| error.message.clone());
            warn!(?reason, "producer validation failed at broker inquiry");
            ledger = ledger.append(TransactionStatus::CarrierRejected, now, reason)?;
        }

        transaction.ledger = ledger;
        transaction.dtcc_records = outcome.records.clone();
        transaction.updated_at = now;
        info!(
            records = outcome.records.len(),
            status = %outcome.next_status_hint,
            "broker inquiry reconciled"
        );
        Ok(outcome)
    }

    /// Runs the carrier validation phase over the selected records
    ///
    /// Must not be issued before the broker inquiry's result has been
    /// reconciled. Appends `CARRIER_APPROVED` or `CARRIER_REJECTED` per the
    /// reconciliation hint (no append when the merged result set keeps the
    /// transaction pending) and stores the merged records as the
    /// carrier-side result set. Owner names present on selected prior
    /// records are propagated: carrier validation never returns them.
    #[instrument(skip(self, transaction, selected), fields(transaction_id = %transaction.id, selected = selected.len()))]
    pub async fn run_carrier_inquiry(
        &self,
        transaction: &mut TransferTransaction,
        selected: &[ContractRecord],
    ) -> Result<ReconcileOutcome, TransferError> {
        if transaction.dtcc_records.is_empty()
            || transaction.current_status() != Some(TransactionStatus::CarrierValidationPending)
        {
            return Err(TransferError::sequence(
                "carrier inquiry requires a reconciled broker inquiry result",
            ));
        }
        if selected.is_empty() {
            return Err(TransferError::validation(
                "carrier inquiry requires at least one selected record",
            ));
        }

        let request = PolicyValidationRequest {
            policies: selected
                .iter()
                .map(|record| record.contract_number.clone())
                .filter(|number| !number.is_empty())
                .collect(),
        };

        let inquiry_id = InquiryId::new_v7();
        info!(%inquiry_id, policies = request.policies.len(), "requesting carrier validation");
        let response = self
            .carrier
            .validate_policies(transaction.id, &request)
            .await?;
        let mut outcome = reconcile(
            &RawInquiry::Direct(response),
            Some(selected),
            InquiryPhase::Carrier,
        );

        for record in &mut outcome.records {
            if record.owner_name.is_none() {
                record.owner_name = selected
                    .iter()
                    .find(|prior| prior.contract_number == record.contract_number)
                    .and_then(|prior| prior.owner_name.clone());
            }
        }

        let now = Utc::now();
        let ledger = match outcome.next_status_hint {
            TransactionStatus::CarrierApproved => Some(transaction.ledger.append(
                TransactionStatus::CarrierApproved,
                now,
                None,
            )?),
            TransactionStatus::CarrierRejected => {
                warn!("carrier validation rejected the transfer");
                Some(transaction.ledger.append(
                    TransactionStatus::CarrierRejected,
                    now,
                    first_error_message(&outcome),
                )?)
            }
            // Unresolved or error-carrying records remain; stays pending
            _ => None,
        };

        if let Some(ledger) = ledger {
            transaction.ledger = ledger;
        }
        transaction.carrier_records = outcome.records.clone();
        transaction.updated_at = now;
        info!(
            records = outcome.records.len(),
            status = %outcome.next_status_hint,
            "carrier inquiry reconciled"
        );
        Ok(outcome)
    }

    /// Mirrors a policy inquiry request to the clearinghouse intermediary
    pub async fn submit_inquiry_to_clearinghouse(
        &self,
        transaction_id: TransactionId,
        request: &PolicyInquiryRequest,
    ) -> Result<StandardResponse, TransferError> {
        Ok(self
            .clearinghouse
            .submit_policy_inquiry_request(transaction_id, request)
            .await?)
    }

    /// Mirrors a reconciled policy inquiry response to the clearinghouse
    pub async fn submit_response_to_clearinghouse(
        &self,
        transaction_id: TransactionId,
        response: &PolicyInquiryResponse,
    ) -> Result<StandardResponse, TransferError> {
        Ok(self
            .clearinghouse
            .submit_policy_inquiry_response(transaction_id, response)
            .await?)
    }

    /// Forwards a delivering-side manifest response receipt
    pub async fn forward_manifest_response(
        &self,
        transaction_id: TransactionId,
        manifest: &ManifestResponse,
    ) -> Result<StandardResponse, TransferError> {
        Ok(self
            .clearinghouse
            .receive_manifest_response(transaction_id, manifest)
            .await?)
    }

    /// Forwards a broker-dealer change request receipt
    pub async fn forward_bd_change_request(
        &self,
        transaction_id: TransactionId,
        request: &BdChangeRequest,
    ) -> Result<StandardResponse, TransferError> {
        Ok(self
            .clearinghouse
            .receive_bd_change_request(transaction_id, request)
            .await?)
    }

    /// Forwards a carrier validation verdict receipt
    pub async fn forward_carrier_response(
        &self,
        transaction_id: TransactionId,
        response: &CarrierResponse,
    ) -> Result<StandardResponse, TransferError> {
        Ok(self
            .clearinghouse
            .receive_carrier_response(transaction_id, response)
            .await?)
    }

    /// Forwards a transfer confirmation receipt
    pub async fn forward_transfer_confirmation(
        &self,
        transaction_id: TransactionId,
        confirmation: &TransferConfirmation,
    ) -> Result<StandardResponse, TransferError> {
        Ok(self
            .clearinghouse
            .receive_transfer_confirmation(transaction_id, confirmation)
            .await?)
    }

    /// Probes the intermediary-owned view of a transaction's status
    ///
    /// Read-only; never merged into the local ledger.
    pub async fn query_external_status(
        &self,
        transaction_id: TransactionId,
    ) -> Result<TransactionStatusEnvelope, TransferError> {
        Ok(self
            .clearinghouse
            .query_transaction_status(transaction_id)
            .await?)
    }
}

fn first_error_message(outcome: &ReconcileOutcome) -> Option<String> {
    outcome
        .producer_errors
        .first()
        .map(|error| error.message.clone())
        .or_else(|| {
            outcome
                .records
                .iter()
                .flat_map(|record| record.errors.first())
                .map(|error| error.message.clone())
                .next()
        })
}
