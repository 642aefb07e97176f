//! Reconciliation engine
//!
//! Merges a raw policy-inquiry response into canonical records, classifies
//! validation errors, and decides the next status for the owning
//! transaction. Inputs are never mutated; records are recreated on every
//! pass, so the contract number (not the per-pass record id) is the join
//! key when merging against prior results.

use crate::ledger::TransactionStatus;
use crate::record::{
    to_canonical_record, ContractRecord, PolicyError, PolicyErrorCode, ProducerError,
};
use crate::wire::{CarrierResponse, PolicyInquiryResponse, ValidationResult};

/// A raw inquiry response in either wire convention
///
/// The direct broker-dealer/carrier APIs speak the camelCase application
/// protocol; the clearinghouse intermediary speaks kebab-case. Both
/// normalize into the same canonical records.
#[derive(Debug, Clone)]
pub enum RawInquiry {
    Direct(PolicyInquiryResponse),
    Intermediary(CarrierResponse),
}

/// Which inquiry phase produced the raw response
///
/// The resolved flag is phase-dependent. A broker listing resolves an
/// entry only when it names a carrier and carries no errors; a carrier
/// answers for its own book, so every entry it returns is confirmed, even
/// one reporting the contract inactive or restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryPhase {
    Broker,
    Carrier,
}

/// Result of one reconciliation pass
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// Canonical records, merged over `prior` when supplied
    pub records: Vec<ContractRecord>,
    /// Producer-level errors: they apply to the agent/firm, not a policy
    pub producer_errors: Vec<ProducerError>,
    /// Suggested next transaction status
    pub next_status_hint: TransactionStatus,
}

/// Reconciles a raw response into canonical records and a status hint
///
/// 1. Each policy entry maps through the canonical record mapping. In the
///    broker phase an entry with a non-empty carrier name and an empty
///    error set is resolved; in the carrier phase every returned entry is
///    resolved, policy errors notwithstanding (the carrier confirming a
///    contract inactive is still a confirmation).
/// 2. Producer-level errors are collected independently of per-policy
///    errors.
/// 3. The status hint is `CarrierRejected` when a blocking producer error
///    (`notAppointed`/`notLicensed`) is present, `CarrierApproved` when
///    every record is resolved and error-free, `CarrierValidationPending`
///    otherwise.
/// 4. With `prior` supplied, a new record replaces the prior one for the
///    same contract number only if the new record is resolved or the prior
///    was unresolved; prior records missing from the response are carried
///    forward unchanged.
pub fn reconcile(
    raw: &RawInquiry,
    prior: Option<&[ContractRecord]>,
    phase: InquiryPhase,
) -> ReconcileOutcome {
    let (fresh, producer_errors) = match raw {
        RawInquiry::Direct(response) => normalize_direct(response, phase),
        RawInquiry::Intermediary(response) => normalize_intermediary(response),
    };

    let records = match prior {
        Some(prior) => merge_records(prior, fresh),
        None => fresh,
    };

    // The intermediary verdict is authoritative; the direct protocol's hint
    // is derived from the record and producer-error sets
    let next_status_hint = match raw {
        RawInquiry::Intermediary(response) => match response.validation_result {
            ValidationResult::Approved => TransactionStatus::CarrierApproved,
            ValidationResult::Rejected => TransactionStatus::CarrierRejected,
        },
        RawInquiry::Direct(_) => next_status_hint(&records, &producer_errors),
    };
    tracing::debug!(
        records = records.len(),
        producer_errors = producer_errors.len(),
        hint = %next_status_hint,
        "reconciliation pass complete"
    );

    ReconcileOutcome {
        records,
        producer_errors,
        next_status_hint,
    }
}

fn normalize_direct(
    response: &PolicyInquiryResponse,
    phase: InquiryPhase,
) -> (Vec<ContractRecord>, Vec<ProducerError>) {
    let records = response
        .client
        .policies
        .iter()
        .map(|policy| {
            let resolved = match phase {
                InquiryPhase::Broker => {
                    let has_carrier = policy
                        .carrier_name
                        .as_deref()
                        .is_some_and(|name| !name.is_empty());
                    has_carrier && policy.errors.is_empty()
                }
                InquiryPhase::Carrier => true,
            };
            to_canonical_record(policy, resolved)
        })
        .collect();

    (records, response.producer_validation.errors.clone())
}

/// Normalizes an intermediary carrier verdict into a single stub record
///
/// The intermediary protocol does not classify rejections into the
/// producer/policy error vocabularies; a rejection surfaces as a
/// policy-level `policyRestricted` error carrying the rejection reason.
fn normalize_intermediary(
    response: &CarrierResponse,
) -> (Vec<ContractRecord>, Vec<ProducerError>) {
    let mut record = ContractRecord::empty(response.policy_id.clone());
    record.carrier_id = response.carrier_id.clone();

    match response.validation_result {
        ValidationResult::Approved => {
            record.resolved = true;
        }
        ValidationResult::Rejected => {
            let reason = response
                .rejection_reason
                .clone()
                .unwrap_or_else(|| "carrier rejected the transfer".to_string());
            record.errors.push(PolicyError::new(
                PolicyErrorCode::PolicyRestricted,
                reason,
            ));
        }
    }

    (vec![record], Vec::new())
}

fn merge_records(prior: &[ContractRecord], fresh: Vec<ContractRecord>) -> Vec<ContractRecord> {
    let mut merged: Vec<ContractRecord> = Vec::with_capacity(prior.len().max(fresh.len()));
    let mut fresh = fresh;

    for existing in prior {
        let incoming = fresh
            .iter()
            .position(|candidate| candidate.contract_number == existing.contract_number)
            .map(|index| fresh.remove(index));

        match incoming {
            Some(new_record) if new_record.resolved || !existing.resolved => {
                merged.push(new_record);
            }
            Some(_) => merged.push(existing.clone()),
            None => merged.push(existing.clone()),
        }
    }

    // Responses may surface policies the prior pass never saw
    merged.extend(fresh);
    merged
}

fn next_status_hint(
    records: &[ContractRecord],
    producer_errors: &[ProducerError],
) -> TransactionStatus {
    if producer_errors.iter().any(ProducerError::is_blocking) {
        return TransactionStatus::CarrierRejected;
    }
    // An empty record set confirms nothing; stay pending
    let all_clean = !records.is_empty()
        && records
            .iter()
            .all(|record| record.resolved && record.errors.is_empty());
    if all_clean {
        TransactionStatus::CarrierApproved
    } else {
        TransactionStatus::CarrierValidationPending
    }
}
