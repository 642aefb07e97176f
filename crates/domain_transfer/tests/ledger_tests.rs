//! Status ledger state machine tests

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use domain_transfer::{StatusLedger, TransactionStatus, TransferError};

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn ledger_at(statuses: &[TransactionStatus]) -> StatusLedger {
    let mut ledger = StatusLedger::new();
    for (index, status) in statuses.iter().enumerate() {
        ledger = ledger
            .append(*status, ts(index as i64), None)
            .expect("fixture transition should be valid");
    }
    ledger
}

#[test]
fn skipping_manifest_received_fails_with_invalid_transition() {
    let ledger = ledger_at(&[TransactionStatus::ManifestRequested]);
    let result = ledger.append(TransactionStatus::DueDiligenceComplete, ts(10), None);
    assert!(matches!(
        result,
        Err(TransferError::InvalidTransition {
            from: Some(TransactionStatus::ManifestRequested),
            to: TransactionStatus::DueDiligenceComplete,
        })
    ));
}

#[test]
fn earlier_timestamp_fails_regardless_of_status_validity() {
    let ledger = ledger_at(&[
        TransactionStatus::ManifestRequested,
        TransactionStatus::ManifestReceived,
    ]);
    // DUE_DILIGENCE_COMPLETE is the valid next status, but the timestamp
    // precedes the last entry
    let result = ledger.append(TransactionStatus::DueDiligenceComplete, ts(-100), None);
    assert!(matches!(
        result,
        Err(TransferError::NonMonotonicTimestamp { .. })
    ));
}

#[test]
fn full_happy_path_reaches_complete() {
    let ledger = ledger_at(&[
        TransactionStatus::ManifestRequested,
        TransactionStatus::ManifestReceived,
        TransactionStatus::DueDiligenceComplete,
        TransactionStatus::CarrierValidationPending,
        TransactionStatus::CarrierApproved,
        TransactionStatus::TransferInitiated,
        TransactionStatus::TransferProcessing,
        TransactionStatus::TransferConfirmed,
        TransactionStatus::Complete,
    ]);
    assert_eq!(ledger.current_status(), Some(TransactionStatus::Complete));
    assert_eq!(ledger.len(), 9);
    assert!(ledger.current_status().unwrap().is_terminal());
}

#[test]
fn approved_and_rejected_are_exclusive_siblings() {
    let pending = ledger_at(&[
        TransactionStatus::ManifestRequested,
        TransactionStatus::ManifestReceived,
        TransactionStatus::DueDiligenceComplete,
        TransactionStatus::CarrierValidationPending,
    ]);

    let approved = pending
        .append(TransactionStatus::CarrierApproved, ts(10), None)
        .unwrap();
    let after_approval = approved.append(TransactionStatus::CarrierRejected, ts(11), None);
    assert!(matches!(
        after_approval,
        Err(TransferError::InvalidTransition { .. })
    ));

    let rejected = pending
        .append(TransactionStatus::CarrierRejected, ts(10), None)
        .unwrap();
    let after_rejection = rejected.append(TransactionStatus::CarrierApproved, ts(11), None);
    assert!(matches!(
        after_rejection,
        Err(TransferError::InvalidTransition { .. })
    ));
}

#[test]
fn complete_admits_no_further_transitions() {
    let ledger = ledger_at(&[
        TransactionStatus::ManifestRequested,
        TransactionStatus::ManifestReceived,
        TransactionStatus::DueDiligenceComplete,
        TransactionStatus::CarrierValidationPending,
        TransactionStatus::CarrierApproved,
        TransactionStatus::TransferInitiated,
        TransactionStatus::TransferProcessing,
        TransactionStatus::TransferConfirmed,
        TransactionStatus::Complete,
    ]);
    for status in TransactionStatus::ALL {
        assert!(ledger.append(status, ts(100), None).is_err(), "{status}");
    }
}

proptest! {
    /// Timestamps stay non-decreasing under any sequence of appends the
    /// ledger accepts.
    #[test]
    fn accepted_appends_keep_timestamps_non_decreasing(
        offsets in proptest::collection::vec(-50i64..50, 1..12)
    ) {
        let mut ledger = StatusLedger::new()
            .append(TransactionStatus::ManifestRequested, ts(0), None)
            .unwrap();
        let mut clock = 0i64;
        let path = [
            TransactionStatus::ManifestReceived,
            TransactionStatus::DueDiligenceComplete,
            TransactionStatus::CarrierValidationPending,
            TransactionStatus::CarrierApproved,
            TransactionStatus::TransferInitiated,
            TransactionStatus::TransferProcessing,
            TransactionStatus::TransferConfirmed,
            TransactionStatus::Complete,
        ];

        for (step, offset) in offsets.iter().enumerate() {
            let Some(next) = path.get(step) else { break };
            clock += offset;
            match ledger.append(*next, ts(clock), None) {
                Ok(extended) => ledger = extended,
                Err(_) => clock -= offset, // rejected append leaves history alone
            }
        }

        let entries = ledger.entries();
        for pair in entries.windows(2) {
            prop_assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    /// A ledger never accepts a non-adjacent forward jump without override.
    #[test]
    fn no_skips_without_override(
        from_index in 0usize..10,
        to_index in 0usize..10,
    ) {
        let from = TransactionStatus::ALL[from_index];
        let to = TransactionStatus::ALL[to_index];
        prop_assume!(!from.permits(to));

        // Build a ledger whose current status is `from` via override seeding
        let ledger = StatusLedger::new()
            .append_with_override(from, ts(0), None)
            .unwrap();
        let result = ledger.append(to, ts(1), None);
        prop_assert!(
            matches!(result, Err(TransferError::InvalidTransition { .. })),
            "expected Err(TransferError::InvalidTransition), got {:?}",
            result
        );
    }
}
