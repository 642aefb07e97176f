//! HTTP API Layer
//!
//! This crate provides the REST API for the policy transfer clearinghouse
//! using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Transaction lifecycle, inquiry phases, receipt forwarding
//! - **Store**: In-memory transaction store shared across handlers
//! - **DTOs**: Request/Response data transfer objects with input validation
//! - **Error Handling**: Domain errors mapped onto consistent HTTP responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(orchestrator, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod store;

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::TransactionId;
use domain_transfer::TransferOrchestrator;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::{health, receipts, transactions};
use crate::store::TransactionStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: TransactionStore,
    pub orchestrator: Arc<TransferOrchestrator>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `orchestrator` - Transfer orchestrator wired to the collaborator ports
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(orchestrator: Arc<TransferOrchestrator>, config: ApiConfig) -> Router {
    let state = AppState {
        store: TransactionStore::new(),
        orchestrator,
        config,
    };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Transaction lifecycle routes
    let transaction_routes = Router::new()
        .route("/", post(transactions::create_transaction))
        .route("/:id", get(transactions::get_transaction))
        .route("/:id/status", post(transactions::append_status))
        .route("/:id/broker-inquiry", post(transactions::run_broker_inquiry))
        .route(
            "/:id/carrier-inquiry",
            post(transactions::run_carrier_inquiry),
        )
        .route(
            "/:id/external-status",
            get(transactions::query_external_status),
        );

    // Clearinghouse receipt forwarding routes
    let receipt_routes = Router::new()
        .route(
            "/:id/inquiry-request",
            post(receipts::submit_inquiry_request),
        )
        .route(
            "/:id/inquiry-response",
            post(receipts::submit_inquiry_response),
        )
        .route(
            "/:id/manifest-response",
            post(receipts::forward_manifest_response),
        )
        .route(
            "/:id/bd-change-request",
            post(receipts::forward_bd_change_request),
        )
        .route(
            "/:id/carrier-response",
            post(receipts::forward_carrier_response),
        )
        .route(
            "/:id/transfer-confirmation",
            post(receipts::forward_transfer_confirmation),
        );

    let api_routes = Router::new()
        .nest("/transactions", transaction_routes)
        .nest("/receipts", receipt_routes);

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Parses a path identifier, accepting both `TXN-<uuid>` and bare UUIDs
pub(crate) fn parse_transaction_id(raw: &str) -> Result<TransactionId, ApiError> {
    TransactionId::from_str(raw)
        .map_err(|_| ApiError::BadRequest(format!("invalid transaction id: {raw}")))
}
