//! Transfer domain errors
//!
//! `InvalidTransition` and `NonMonotonicTimestamp` are programming-contract
//! violations: callers must fix the requested transition rather than retry.
//! `InquiryFailed` wraps a collaborator failure and is safe to retry; it is
//! guaranteed never to leave a partially mutated ledger or record set behind.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ledger::TransactionStatus;
use crate::ports::InquiryError;

/// Errors that can occur in the transfer domain
#[derive(Debug, Error)]
pub enum TransferError {
    /// Status-ledger append attempted out of order without override
    #[error("Invalid status transition from {from:?} to {to}")]
    InvalidTransition {
        from: Option<TransactionStatus>,
        to: TransactionStatus,
    },

    /// Append with a timestamp earlier than the ledger's last entry
    #[error("Non-monotonic timestamp: last entry at {last}, attempted {attempted}")]
    NonMonotonicTimestamp {
        last: DateTime<Utc>,
        attempted: DateTime<Utc>,
    },

    /// An external collaborator call errored or timed out
    #[error("Inquiry failed: {0}")]
    InquiryFailed(#[from] InquiryError),

    /// An operation was issued before its prerequisite phase completed
    #[error("Sequence violation: {0}")]
    SequenceViolation(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl TransferError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        TransferError::Validation(message.into())
    }

    /// Creates a sequence violation error
    pub fn sequence(message: impl Into<String>) -> Self {
        TransferError::SequenceViolation(message.into())
    }
}
