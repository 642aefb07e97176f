//! Clearinghouse receipt forwarding handlers
//!
//! These endpoints mirror intermediary-protocol payloads to the
//! clearinghouse unchanged and relay its acknowledgment. No local ledger
//! or record state is touched here.

use axum::{
    extract::{Path, State},
    Json,
};

use domain_transfer::wire::{
    BdChangeRequest, CarrierResponse, ManifestResponse, PolicyInquiryRequest,
    PolicyInquiryResponse, StandardResponse, TransferConfirmation,
};

use crate::error::ApiError;
use crate::{parse_transaction_id, AppState};

/// Mirrors a policy inquiry request to the clearinghouse
pub async fn submit_inquiry_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PolicyInquiryRequest>,
) -> Result<Json<StandardResponse>, ApiError> {
    let id = parse_transaction_id(&id)?;
    let ack = state
        .orchestrator
        .submit_inquiry_to_clearinghouse(id, &request)
        .await?;
    Ok(Json(ack))
}

/// Mirrors a reconciled policy inquiry response to the clearinghouse
pub async fn submit_inquiry_response(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(response): Json<PolicyInquiryResponse>,
) -> Result<Json<StandardResponse>, ApiError> {
    let id = parse_transaction_id(&id)?;
    let ack = state
        .orchestrator
        .submit_response_to_clearinghouse(id, &response)
        .await?;
    Ok(Json(ack))
}

/// Forwards a delivering-side manifest response receipt
pub async fn forward_manifest_response(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(manifest): Json<ManifestResponse>,
) -> Result<Json<StandardResponse>, ApiError> {
    let id = parse_transaction_id(&id)?;
    let ack = state
        .orchestrator
        .forward_manifest_response(id, &manifest)
        .await?;
    Ok(Json(ack))
}

/// Forwards a broker-dealer change request receipt
pub async fn forward_bd_change_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<BdChangeRequest>,
) -> Result<Json<StandardResponse>, ApiError> {
    let id = parse_transaction_id(&id)?;
    let ack = state
        .orchestrator
        .forward_bd_change_request(id, &request)
        .await?;
    Ok(Json(ack))
}

/// Forwards a carrier validation verdict receipt
pub async fn forward_carrier_response(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(response): Json<CarrierResponse>,
) -> Result<Json<StandardResponse>, ApiError> {
    let id = parse_transaction_id(&id)?;
    let ack = state
        .orchestrator
        .forward_carrier_response(id, &response)
        .await?;
    Ok(Json(ack))
}

/// Forwards a transfer completion receipt
pub async fn forward_transfer_confirmation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(confirmation): Json<TransferConfirmation>,
) -> Result<Json<StandardResponse>, ApiError> {
    let id = parse_transaction_id(&id)?;
    let ack = state
        .orchestrator
        .forward_transfer_confirmation(id, &confirmation)
        .await?;
    Ok(Json(ack))
}
