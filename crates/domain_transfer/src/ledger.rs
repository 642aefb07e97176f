//! Status ledger and transaction state machine
//!
//! The ledger is an append-only, ordered history of status transitions.
//! It is never truncated or reordered; appends return a new ledger view
//! rather than mutating entries in place, and timestamps are non-decreasing
//! across the history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TransferError;
use crate::wire::StatusHistoryItem;

/// Transaction statuses in required forward order
///
/// `CarrierApproved` and `CarrierRejected` are mutually exclusive siblings
/// after `CarrierValidationPending`. `CarrierRejected` is soft-terminal:
/// a rejected transaction only continues to `TransferInitiated` when the
/// append is explicitly overridden (manual re-drive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    ManifestRequested,
    ManifestReceived,
    DueDiligenceComplete,
    CarrierValidationPending,
    CarrierApproved,
    CarrierRejected,
    TransferInitiated,
    TransferProcessing,
    TransferConfirmed,
    Complete,
}

impl TransactionStatus {
    /// All statuses in forward order, rejection branch after approval
    pub const ALL: [TransactionStatus; 10] = [
        TransactionStatus::ManifestRequested,
        TransactionStatus::ManifestReceived,
        TransactionStatus::DueDiligenceComplete,
        TransactionStatus::CarrierValidationPending,
        TransactionStatus::CarrierApproved,
        TransactionStatus::CarrierRejected,
        TransactionStatus::TransferInitiated,
        TransactionStatus::TransferProcessing,
        TransactionStatus::TransferConfirmed,
        TransactionStatus::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::ManifestRequested => "MANIFEST_REQUESTED",
            TransactionStatus::ManifestReceived => "MANIFEST_RECEIVED",
            TransactionStatus::DueDiligenceComplete => "DUE_DILIGENCE_COMPLETE",
            TransactionStatus::CarrierValidationPending => "CARRIER_VALIDATION_PENDING",
            TransactionStatus::CarrierApproved => "CARRIER_APPROVED",
            TransactionStatus::CarrierRejected => "CARRIER_REJECTED",
            TransactionStatus::TransferInitiated => "TRANSFER_INITIATED",
            TransactionStatus::TransferProcessing => "TRANSFER_PROCESSING",
            TransactionStatus::TransferConfirmed => "TRANSFER_CONFIRMED",
            TransactionStatus::Complete => "COMPLETE",
        }
    }

    /// Direct successors under the strict adjacency rule
    pub fn direct_successors(&self) -> &'static [TransactionStatus] {
        match self {
            TransactionStatus::ManifestRequested => &[TransactionStatus::ManifestReceived],
            TransactionStatus::ManifestReceived => &[TransactionStatus::DueDiligenceComplete],
            TransactionStatus::DueDiligenceComplete => {
                &[TransactionStatus::CarrierValidationPending]
            }
            TransactionStatus::CarrierValidationPending => &[
                TransactionStatus::CarrierApproved,
                TransactionStatus::CarrierRejected,
            ],
            TransactionStatus::CarrierApproved => &[TransactionStatus::TransferInitiated],
            // Soft-terminal: re-driving a rejected transaction requires an
            // explicit override
            TransactionStatus::CarrierRejected => &[],
            TransactionStatus::TransferInitiated => &[TransactionStatus::TransferProcessing],
            TransactionStatus::TransferProcessing => &[TransactionStatus::TransferConfirmed],
            TransactionStatus::TransferConfirmed => &[TransactionStatus::Complete],
            TransactionStatus::Complete => &[],
        }
    }

    /// Whether `next` is a permitted direct successor of `self`
    pub fn permits(&self, next: TransactionStatus) -> bool {
        self.direct_successors().contains(&next)
    }

    /// Terminal statuses admit no further transitions without override
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Complete | TransactionStatus::CarrierRejected
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TransferError::validation(format!("unknown transaction status: {s}")))
    }
}

/// One entry in the status ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TryFrom<&StatusHistoryItem> for StatusEntry {
    type Error = TransferError;

    fn try_from(item: &StatusHistoryItem) -> Result<Self, TransferError> {
        let status = item.status.parse()?;
        let timestamp = DateTime::parse_from_rfc3339(&item.timestamp)
            .map_err(|err| {
                TransferError::validation(format!("bad status-history timestamp: {err}"))
            })?
            .with_timezone(&Utc);
        Ok(StatusEntry {
            status,
            timestamp,
            notes: item.notes.clone(),
        })
    }
}

/// Append-only ordered history of status transitions
///
/// Current status = last entry. An empty ledger is the designated initial
/// null-state; the first append must be `ManifestRequested` unless
/// overridden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusLedger {
    entries: Vec<StatusEntry>,
}

impl StatusLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from existing history (e.g. an intermediary
    /// status-history payload), enforcing timestamp monotonicity but not
    /// adjacency: external histories may legitimately skip states this
    /// model would not produce itself.
    pub fn from_entries(entries: Vec<StatusEntry>) -> Result<Self, TransferError> {
        for pair in entries.windows(2) {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(TransferError::NonMonotonicTimestamp {
                    last: pair[0].timestamp,
                    attempted: pair[1].timestamp,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Rebuilds a ledger from an intermediary status-history payload
    pub fn from_history(items: &[StatusHistoryItem]) -> Result<Self, TransferError> {
        let entries = items
            .iter()
            .map(StatusEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    /// Last entry's status, or `None` for the initial null-state
    pub fn current_status(&self) -> Option<TransactionStatus> {
        self.entries.last().map(|entry| entry.status)
    }

    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a status transition, returning the extended ledger view
    ///
    /// Fails with [`TransferError::InvalidTransition`] when `status` is not
    /// a direct successor of the current status, and with
    /// [`TransferError::NonMonotonicTimestamp`] when `timestamp` precedes
    /// the last entry's. The receiver is never mutated.
    pub fn append(
        &self,
        status: TransactionStatus,
        timestamp: DateTime<Utc>,
        notes: Option<String>,
    ) -> Result<StatusLedger, TransferError> {
        self.append_inner(status, timestamp, notes, false)
    }

    /// Appends without the adjacency check (manual override)
    ///
    /// Timestamp monotonicity is still enforced: overrides may skip states
    /// but never rewrite history order.
    pub fn append_with_override(
        &self,
        status: TransactionStatus,
        timestamp: DateTime<Utc>,
        notes: Option<String>,
    ) -> Result<StatusLedger, TransferError> {
        self.append_inner(status, timestamp, notes, true)
    }

    fn append_inner(
        &self,
        status: TransactionStatus,
        timestamp: DateTime<Utc>,
        notes: Option<String>,
        overridden: bool,
    ) -> Result<StatusLedger, TransferError> {
        if let Some(last) = self.entries.last() {
            if timestamp < last.timestamp {
                return Err(TransferError::NonMonotonicTimestamp {
                    last: last.timestamp,
                    attempted: timestamp,
                });
            }
        }

        if !overridden {
            let permitted = match self.current_status() {
                Some(current) => current.permits(status),
                None => status == TransactionStatus::ManifestRequested,
            };
            if !permitted {
                return Err(TransferError::InvalidTransition {
                    from: self.current_status(),
                    to: status,
                });
            }
        }

        let mut entries = self.entries.clone();
        entries.push(StatusEntry {
            status,
            timestamp,
            notes,
        });
        Ok(StatusLedger { entries })
    }
}
