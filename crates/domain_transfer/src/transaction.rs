//! Transfer transaction aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::TransactionId;

use crate::error::TransferError;
use crate::ledger::{StatusLedger, TransactionStatus};
use crate::record::ContractRecord;

/// One policy-transfer transaction and everything reconciled for it
///
/// Owns the status ledger plus the two per-party result sets: the
/// broker-side (DTCC) records from the initial inquiry and the
/// carrier-side records from validation. Distinct transactions share no
/// mutable state and may be processed fully in parallel; operations on a
/// single transaction assume exclusive access for the duration of a call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferTransaction {
    pub id: TransactionId,
    pub ledger: StatusLedger,
    /// Broker-side result set from the policy inquiry
    pub dtcc_records: Vec<ContractRecord>,
    /// Carrier-side result set from validation
    pub carrier_records: Vec<ContractRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransferTransaction {
    /// Creates a transaction with `MANIFEST_REQUESTED` as its opening entry
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_id(TransactionId::new(), now)
    }

    pub fn with_id(id: TransactionId, now: DateTime<Utc>) -> Self {
        // Appending the opening status to an empty ledger cannot fail
        let ledger = StatusLedger::new()
            .append(TransactionStatus::ManifestRequested, now, None)
            .unwrap_or_default();
        Self {
            id,
            ledger,
            dtcc_records: Vec::new(),
            carrier_records: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Last ledger entry's status
    pub fn current_status(&self) -> Option<TransactionStatus> {
        self.ledger.current_status()
    }

    /// Terminal once `COMPLETE` or soft-terminal on `CARRIER_REJECTED`
    pub fn is_terminal(&self) -> bool {
        self.current_status()
            .map(|status| status.is_terminal())
            .unwrap_or(false)
    }

    /// Appends a status transition to the transaction's ledger
    pub fn append_status(
        &mut self,
        status: TransactionStatus,
        timestamp: DateTime<Utc>,
        notes: Option<String>,
        overridden: bool,
    ) -> Result<(), TransferError> {
        self.ledger = if overridden {
            self.ledger.append_with_override(status, timestamp, notes)?
        } else {
            self.ledger.append(status, timestamp, notes)?
        };
        self.updated_at = timestamp;
        Ok(())
    }
}
