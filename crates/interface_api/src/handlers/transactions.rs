//! Transfer transaction handlers

use std::collections::BTreeSet;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use validator::Validate;

use domain_transfer::wire::TransactionStatusEnvelope;
use domain_transfer::{ContractRecord, TransferTransaction};

use crate::dto::{
    AppendStatusRequest, BrokerInquiryRequest, CarrierInquiryRequest, InquiryOutcomeView,
    TransactionView,
};
use crate::error::ApiError;
use crate::{parse_transaction_id, AppState};

/// Opens a new transfer transaction
///
/// The opening ledger entry is `MANIFEST_REQUESTED`; everything after that
/// is appended by the inquiry phases or by explicit status submissions.
pub async fn create_transaction(
    State(state): State<AppState>,
) -> (StatusCode, Json<TransactionView>) {
    let transaction = TransferTransaction::new(Utc::now());
    let view = TransactionView::from(&transaction);
    state.store.insert(transaction).await;
    (StatusCode::CREATED, Json(view))
}

/// Gets a transaction's ledger and both reconciled record sets
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionView>, ApiError> {
    let id = parse_transaction_id(&id)?;
    let snapshot = state
        .store
        .snapshot(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("transaction {id} not found")))?;
    Ok(Json(TransactionView::from(&snapshot)))
}

/// Appends a status transition to the transaction's ledger
pub async fn append_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AppendStatusRequest>,
) -> Result<Json<TransactionView>, ApiError> {
    let id = parse_transaction_id(&id)?;
    let handle = state
        .store
        .checkout(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("transaction {id} not found")))?;

    let mut transaction = handle.lock().await;
    transaction.append_status(request.status, Utc::now(), request.notes, request.overridden)?;
    Ok(Json(TransactionView::from(&*transaction)))
}

/// Runs the broker-dealer inquiry phase
pub async fn run_broker_inquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<BrokerInquiryRequest>,
) -> Result<Json<InquiryOutcomeView>, ApiError> {
    request.validate()?;
    let id = parse_transaction_id(&id)?;
    let handle = state
        .store
        .checkout(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("transaction {id} not found")))?;

    let mut transaction = handle.lock().await;
    let outcome = state
        .orchestrator
        .run_broker_inquiry(&mut transaction, &request.into_wire())
        .await?;

    Ok(Json(InquiryOutcomeView {
        transaction_id: id,
        current_status: transaction.current_status(),
        records: outcome.records,
        producer_errors: outcome.producer_errors,
    }))
}

/// Runs the carrier validation phase over the selected broker-side records
pub async fn run_carrier_inquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CarrierInquiryRequest>,
) -> Result<Json<InquiryOutcomeView>, ApiError> {
    request.validate()?;
    let id = parse_transaction_id(&id)?;
    let handle = state
        .store
        .checkout(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("transaction {id} not found")))?;

    let mut transaction = handle.lock().await;
    // Selection is by distinct contract number; duplicates are harmless
    let requested: BTreeSet<&str> = request.policy_numbers.iter().map(String::as_str).collect();
    let selected = select_records(&transaction.dtcc_records, &requested);
    if selected.len() != requested.len() {
        return Err(ApiError::Validation(
            "one or more selected policy numbers are not in the broker-side result set"
                .to_string(),
            None,
        ));
    }

    let outcome = state
        .orchestrator
        .run_carrier_inquiry(&mut transaction, &selected)
        .await?;

    Ok(Json(InquiryOutcomeView {
        transaction_id: id,
        current_status: transaction.current_status(),
        records: outcome.records,
        producer_errors: outcome.producer_errors,
    }))
}

/// Probes the intermediary-owned status view (read-only, never merged)
pub async fn query_external_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionStatusEnvelope>, ApiError> {
    let id = parse_transaction_id(&id)?;
    let envelope = state.orchestrator.query_external_status(id).await?;
    Ok(Json(envelope))
}

fn select_records(
    records: &[ContractRecord],
    policy_numbers: &BTreeSet<&str>,
) -> Vec<ContractRecord> {
    records
        .iter()
        .filter(|record| policy_numbers.contains(record.contract_number.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_records_filters_by_contract_number() {
        let records = [
            ContractRecord::empty("POL-1"),
            ContractRecord::empty("POL-2"),
        ];

        let selected = select_records(&records, &BTreeSet::from(["POL-2"]));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].contract_number, "POL-2");
    }
}
