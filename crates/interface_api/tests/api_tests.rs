//! End-to-end API tests against the in-process router with mock collaborators

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_transfer::TransferOrchestrator;
use interface_api::{config::ApiConfig, create_router};
use test_utils::mocks::{
    FailingBrokerDealer, FailingCarrier, MockBrokerDealer, MockCarrier, MockClearinghouse,
};

fn server() -> TestServer {
    let orchestrator = Arc::new(TransferOrchestrator::new(
        Arc::new(MockBrokerDealer::with_seed(42)),
        Arc::new(MockCarrier::with_seed(42)),
        Arc::new(MockClearinghouse),
    ));
    TestServer::new(create_router(orchestrator, ApiConfig::default())).unwrap()
}

fn server_with_failing_broker() -> TestServer {
    let orchestrator = Arc::new(TransferOrchestrator::new(
        Arc::new(FailingBrokerDealer),
        Arc::new(FailingCarrier),
        Arc::new(MockClearinghouse),
    ));
    TestServer::new(create_router(orchestrator, ApiConfig::default())).unwrap()
}

async fn create_transaction(server: &TestServer) -> String {
    let response = server.post("/api/v1/transactions").await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["id"].as_str().expect("transaction id").to_string()
}

async fn append_status(server: &TestServer, id: &str, status: &str) {
    let response = server
        .post(&format!("/api/v1/transactions/{id}/status"))
        .json(&json!({ "status": status }))
        .await;
    response.assert_status_ok();
}

/// Walks a fresh transaction to DUE_DILIGENCE_COMPLETE
async fn transaction_ready_for_inquiry(server: &TestServer) -> String {
    let id = create_transaction(server).await;
    append_status(server, &id, "MANIFEST_RECEIVED").await;
    append_status(server, &id, "DUE_DILIGENCE_COMPLETE").await;
    id
}

fn broker_inquiry_body() -> Value {
    json!({
        "firmName": "Summit Securities",
        "firmId": "SS-001",
        "agentName": "Casey Reed",
        "npn": "1234567",
        "clientName": "Jordan Blake",
        "ssn": "123-45-6789",
        "policyNumbers": ["POL-100001", "POL-100002", "POL-100003"]
    })
}

#[tokio::test]
async fn health_endpoints_respond() {
    let server = server();

    server.get("/health").await.assert_status_ok();
    let ready = server.get("/health/ready").await;
    ready.assert_status_ok();
    let body: Value = ready.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["transactions"], 0);
}

#[tokio::test]
async fn create_transaction_opens_with_manifest_requested() {
    let server = server();
    let response = server.post("/api/v1/transactions").await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["currentStatus"], "MANIFEST_REQUESTED");
    assert_eq!(body["terminal"], false);
    assert_eq!(body["ledger"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_unknown_transaction_is_404() {
    let server = server();
    let response = server
        .get("/api/v1/transactions/00000000-0000-0000-0000-000000000000")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_transaction_id_is_400() {
    let server = server();
    let response = server.get("/api/v1/transactions/not-a-uuid").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn append_status_enforces_adjacency() {
    let server = server();
    let id = create_transaction(&server).await;

    let response = server
        .post(&format!("/api/v1/transactions/{id}/status"))
        .json(&json!({ "status": "COMPLETE" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn append_status_override_skips_adjacency() {
    let server = server();
    let id = create_transaction(&server).await;

    let response = server
        .post(&format!("/api/v1/transactions/{id}/status"))
        .json(&json!({ "status": "TRANSFER_INITIATED", "override": true, "notes": "manual re-drive" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["currentStatus"], "TRANSFER_INITIATED");
    let ledger = body["ledger"].as_array().unwrap();
    assert_eq!(ledger.last().unwrap()["notes"], "manual re-drive");
}

#[tokio::test]
async fn broker_inquiry_requires_due_diligence_complete() {
    let server = server();
    let id = create_transaction(&server).await;

    let response = server
        .post(&format!("/api/v1/transactions/{id}/broker-inquiry"))
        .json(&broker_inquiry_body())
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn broker_inquiry_rejects_empty_policy_list() {
    let server = server();
    let id = transaction_ready_for_inquiry(&server).await;

    let response = server
        .post(&format!("/api/v1/transactions/{id}/broker-inquiry"))
        .json(&json!({ "policyNumbers": [] }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn broker_inquiry_reconciles_and_advances_status() {
    let server = server();
    let id = transaction_ready_for_inquiry(&server).await;

    let response = server
        .post(&format!("/api/v1/transactions/{id}/broker-inquiry"))
        .json(&broker_inquiry_body())
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["currentStatus"], "CARRIER_VALIDATION_PENDING");
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 3);
    // The mock broker leaves the first queried policy unresolved
    assert_eq!(records[0]["resolved"], false);
    assert_eq!(records[1]["resolved"], true);

    let view: Value = server
        .get(&format!("/api/v1/transactions/{id}"))
        .await
        .json();
    assert_eq!(view["dtccRecords"].as_array().unwrap().len(), 3);
    assert!(view["carrierRecords"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn carrier_inquiry_approves_selected_records() {
    let server = server();
    let id = transaction_ready_for_inquiry(&server).await;

    let inquiry: Value = server
        .post(&format!("/api/v1/transactions/{id}/broker-inquiry"))
        .json(&broker_inquiry_body())
        .await
        .json();
    let selected: Vec<String> = inquiry["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["contractNumber"].as_str().unwrap().to_string())
        .collect();

    let response = server
        .post(&format!("/api/v1/transactions/{id}/carrier-inquiry"))
        .json(&json!({ "policyNumbers": selected }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    // The mock carrier confirms every requested policy
    assert_eq!(body["currentStatus"], "CARRIER_APPROVED");
    assert!(body["records"]
        .as_array()
        .unwrap()
        .iter()
        .all(|record| record["resolved"] == true));
}

#[tokio::test]
async fn carrier_inquiry_before_broker_inquiry_is_conflict() {
    let server = server();
    let id = transaction_ready_for_inquiry(&server).await;

    let response = server
        .post(&format!("/api/v1/transactions/{id}/carrier-inquiry"))
        .json(&json!({ "policyNumbers": ["POL-100001"] }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn carrier_inquiry_rejects_unknown_selection() {
    let server = server();
    let id = transaction_ready_for_inquiry(&server).await;

    server
        .post(&format!("/api/v1/transactions/{id}/broker-inquiry"))
        .json(&broker_inquiry_body())
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("/api/v1/transactions/{id}/carrier-inquiry"))
        .json(&json!({ "policyNumbers": ["POL-999999"] }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn carrier_inquiry_tolerates_duplicate_selection() {
    let server = server();
    let id = transaction_ready_for_inquiry(&server).await;

    server
        .post(&format!("/api/v1/transactions/{id}/broker-inquiry"))
        .json(&broker_inquiry_body())
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("/api/v1/transactions/{id}/carrier-inquiry"))
        .json(&json!({
            "policyNumbers": ["POL-100001", "POL-100001", "POL-100002", "POL-100003"]
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["currentStatus"], "CARRIER_APPROVED");
    assert_eq!(body["records"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn failed_broker_inquiry_leaves_transaction_untouched() {
    let server = server_with_failing_broker();
    let id = transaction_ready_for_inquiry(&server).await;

    let response = server
        .post(&format!("/api/v1/transactions/{id}/broker-inquiry"))
        .json(&broker_inquiry_body())
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);

    let view: Value = server
        .get(&format!("/api/v1/transactions/{id}"))
        .await
        .json();
    assert_eq!(view["currentStatus"], "DUE_DILIGENCE_COMPLETE");
    assert!(view["dtccRecords"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn receipt_forwarding_relays_clearinghouse_ack() {
    let server = server();
    let id = create_transaction(&server).await;

    let response = server
        .post(&format!("/api/v1/receipts/{id}/bd-change-request"))
        .json(&json!({
            "transaction-id": id,
            "receiving-broker-id": "BRK-001",
            "delivering-broker-id": "BRK-002",
            "carrier-id": "CAR-001",
            "policy-id": "POL-100001"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["code"], "200");
}

#[tokio::test]
async fn manifest_response_receipt_relays_ack() {
    let server = server();
    let id = create_transaction(&server).await;

    let response = server
        .post(&format!("/api/v1/receipts/{id}/manifest-response"))
        .json(&json!({
            "transaction-id": id,
            "delivering-broker-id": "BRK-002",
            "response-type": "immediate",
            "policies": [
                { "policy-id": "POL-100001", "policy-type": "variableAnnuity" }
            ]
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["code"], "200");
}

#[tokio::test]
async fn external_status_probe_returns_intermediary_view() {
    let server = server();
    let id = create_transaction(&server).await;

    let response = server
        .get(&format!("/api/v1/transactions/{id}/external-status"))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["current-status"], "CARRIER_VALIDATION_PENDING");

    // The probe is read-only: the local ledger keeps its own view
    let view: Value = server
        .get(&format!("/api/v1/transactions/{id}"))
        .await
        .json();
    assert_eq!(view["currentStatus"], "MANIFEST_REQUESTED");
}
