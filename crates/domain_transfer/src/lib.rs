//! Transfer Domain
//!
//! This crate implements the core of the 1035 exchange clearinghouse: the
//! transaction status model and the cross-party data reconciliation logic.
//! A requesting broker-dealer queries an insurance carrier (directly or via
//! a clearinghouse intermediary) about a client's existing policies, and the
//! resulting heterogeneous payloads are merged into canonical contract
//! records while the transaction moves through a fixed status sequence.
//!
//! # Architecture
//!
//! - **Record Model**: [`ContractRecord`] and the total mapping function
//!   [`record::to_canonical_record`]
//! - **Status Ledger**: [`StatusLedger`], an append-only history of
//!   [`TransactionStatus`] transitions
//! - **Reconciliation Engine**: [`reconcile::reconcile`], merging raw
//!   inquiry responses into canonical records
//! - **Transaction Orchestrator**: [`TransferOrchestrator`], sequencing
//!   inquiry → reconcile → status-append cycles against external
//!   collaborators defined in [`ports`]
//!
//! # Transaction Lifecycle
//!
//! ```text
//! MANIFEST_REQUESTED -> MANIFEST_RECEIVED -> DUE_DILIGENCE_COMPLETE
//!   -> CARRIER_VALIDATION_PENDING -> CARRIER_APPROVED  -> TRANSFER_INITIATED
//!                                \-> CARRIER_REJECTED (soft-terminal)
//!   -> TRANSFER_PROCESSING -> TRANSFER_CONFIRMED -> COMPLETE
//! ```
//!
//! `CARRIER_REJECTED` is soft-terminal: advancing past it requires an
//! explicit override (manual re-drive after rejection).

pub mod error;
pub mod ledger;
pub mod orchestrator;
pub mod ports;
pub mod reconcile;
pub mod record;
pub mod transaction;
pub mod wire;

pub use error::TransferError;
pub use ledger::{StatusEntry, StatusLedger, TransactionStatus};
pub use orchestrator::TransferOrchestrator;
pub use ports::{BrokerDealerPort, CarrierPort, ClearinghousePort, InquiryError};
pub use reconcile::{reconcile, InquiryPhase, RawInquiry, ReconcileOutcome};
pub use record::{
    AccountType, ContractRecord, ContractStatus, OwnershipType, PlanType, PolicyError,
    PolicyErrorCode, ProducerError, ProducerErrorCode,
};
pub use transaction::TransferTransaction;
