//! Reconciliation engine tests
//!
//! Covers record resolution, producer-error classification, status hints,
//! and the merge rules applied when a later authoritative source arrives
//! over an earlier partial one.

use domain_transfer::record::to_canonical_record;
use domain_transfer::wire::{
    CarrierResponse, ClientResponse, DetailedPolicyInfo, PolicyInquiryResponse,
    ProducerValidation, ValidationResult, WithdrawalStructure,
};
use domain_transfer::{
    reconcile, ContractStatus, InquiryPhase, PolicyError, PolicyErrorCode, ProducerError,
    ProducerErrorCode, RawInquiry, TransactionStatus,
};

fn resolved_policy(number: &str) -> DetailedPolicyInfo {
    DetailedPolicyInfo {
        policy_number: Some(number.into()),
        carrier_name: Some("Lincoln Financial".into()),
        account_type: Some("individual".into()),
        plan_type: Some("nonQualified".into()),
        ownership: Some("individual".into()),
        product_name: Some("ChoicePlus Assurance".into()),
        cusip: Some("123456AB7".into()),
        trailing_commission: false,
        contract_status: Some("active".into()),
        withdrawal_structure: WithdrawalStructure {
            systematic_in_place: false,
        },
        errors: vec![],
    }
}

fn direct_response(policies: Vec<DetailedPolicyInfo>) -> PolicyInquiryResponse {
    PolicyInquiryResponse {
        client: ClientResponse {
            client_name: Some("John Smith".into()),
            ssn_last4: Some("6789".into()),
            policies,
        },
        ..Default::default()
    }
}

#[test]
fn all_resolved_and_error_free_hints_carrier_approved() {
    let response = direct_response(vec![resolved_policy("POL-1"), resolved_policy("POL-2")]);
    let outcome = reconcile(&RawInquiry::Direct(response), None, InquiryPhase::Broker);

    assert_eq!(outcome.records.len(), 2);
    assert!(outcome.records.iter().all(|record| record.resolved));
    assert_eq!(outcome.next_status_hint, TransactionStatus::CarrierApproved);
}

#[test]
fn scenario_single_active_policy() {
    // {policies:[{policyNumber:"POL-1", contractStatus:"active", errors:[]}]}
    let response = direct_response(vec![resolved_policy("POL-1")]);
    let outcome = reconcile(&RawInquiry::Direct(response), None, InquiryPhase::Broker);

    let record = &outcome.records[0];
    assert_eq!(record.contract_number, "POL-1");
    assert_eq!(record.contract_status, ContractStatus::Active);
    assert!(record.resolved);
    assert_eq!(outcome.next_status_hint, TransactionStatus::CarrierApproved);
}

#[test]
fn policy_without_carrier_name_is_unresolved() {
    let mut policy = resolved_policy("POL-1");
    policy.carrier_name = Some(String::new());
    let outcome = reconcile(
        &RawInquiry::Direct(direct_response(vec![policy])),
        None,
        InquiryPhase::Broker,
    );

    assert!(!outcome.records[0].resolved);
    assert_eq!(
        outcome.next_status_hint,
        TransactionStatus::CarrierValidationPending
    );
}

#[test]
fn policy_with_errors_is_unresolved_but_mapped() {
    let mut policy = resolved_policy("POL-1");
    policy.errors.push(PolicyError::new(
        PolicyErrorCode::PolicyInactive,
        "Policy is surrendered",
    ));
    let outcome = reconcile(
        &RawInquiry::Direct(direct_response(vec![policy])),
        None,
        InquiryPhase::Broker,
    );

    let record = &outcome.records[0];
    assert!(!record.resolved);
    assert_eq!(record.errors.len(), 1);
    assert_eq!(
        outcome.next_status_hint,
        TransactionStatus::CarrierValidationPending
    );
}

#[test]
fn blocking_producer_error_hints_rejected_despite_resolved_policies() {
    // Producer error {errorCode:"notAppointed"} with one resolved policy
    let mut response = direct_response(vec![resolved_policy("POL-1")]);
    response.producer_validation = ProducerValidation {
        agent_name: Some("Demo Agent".into()),
        npn: Some("12345678".into()),
        errors: vec![ProducerError::new(
            ProducerErrorCode::NotAppointed,
            "Producer is not appointed with carrier",
        )],
    };
    let outcome = reconcile(&RawInquiry::Direct(response), None, InquiryPhase::Broker);

    assert!(outcome.records[0].resolved);
    assert_eq!(outcome.producer_errors.len(), 1);
    assert_eq!(outcome.next_status_hint, TransactionStatus::CarrierRejected);
}

#[test]
fn affiliation_mismatch_alone_does_not_reject() {
    let mut response = direct_response(vec![resolved_policy("POL-1")]);
    response.producer_validation.errors = vec![ProducerError::new(
        ProducerErrorCode::AffiliationMismatch,
        "Agent affiliation does not match firm of record",
    )];
    let outcome = reconcile(&RawInquiry::Direct(response), None, InquiryPhase::Broker);

    // Non-blocking producer errors are surfaced but the resolved records
    // still carry the approval
    assert_eq!(outcome.next_status_hint, TransactionStatus::CarrierApproved);
    assert_eq!(outcome.producer_errors.len(), 1);
}

#[test]
fn empty_response_stays_pending() {
    let outcome = reconcile(
        &RawInquiry::Direct(direct_response(vec![])),
        None,
        InquiryPhase::Broker,
    );
    assert!(outcome.records.is_empty());
    assert_eq!(
        outcome.next_status_hint,
        TransactionStatus::CarrierValidationPending
    );
}

mod merging {
    use super::*;

    #[test]
    fn resolved_prior_is_never_overwritten_by_unresolved_new() {
        let prior = to_canonical_record(&resolved_policy("POL-1"), true);
        let prior_id = prior.id;

        let mut unresolved = resolved_policy("POL-1");
        unresolved.carrier_name = None;
        let response = direct_response(vec![unresolved]);

        let outcome = reconcile(
            &RawInquiry::Direct(response),
            Some(&[prior.clone()]),
            InquiryPhase::Broker,
        );
        let merged = &outcome.records[0];
        assert_eq!(merged.id, prior_id, "prior record should be retained");
        assert!(merged.resolved);
        assert_eq!(merged.carrier_name, "Lincoln Financial");
    }

    #[test]
    fn resolved_new_replaces_resolved_prior() {
        let prior = to_canonical_record(&resolved_policy("POL-1"), true);

        let mut updated = resolved_policy("POL-1");
        updated.carrier_name = Some("Jackson National".into());
        let outcome = reconcile(
            &RawInquiry::Direct(direct_response(vec![updated])),
            Some(&[prior]),
            InquiryPhase::Broker,
        );

        assert_eq!(outcome.records[0].carrier_name, "Jackson National");
        assert!(outcome.records[0].resolved);
    }

    #[test]
    fn unresolved_prior_is_replaced_even_by_unresolved_new() {
        let prior = to_canonical_record(&resolved_policy("POL-1"), false);

        let mut fresh = resolved_policy("POL-1");
        fresh.carrier_name = None;
        fresh.product_name = Some("Premier Income".into());
        let outcome = reconcile(
            &RawInquiry::Direct(direct_response(vec![fresh])),
            Some(&[prior.clone()]),
            InquiryPhase::Broker,
        );

        assert_ne!(outcome.records[0].id, prior.id);
        assert_eq!(outcome.records[0].product_name, "Premier Income");
    }

    #[test]
    fn prior_records_missing_from_response_are_carried_forward() {
        let kept = to_canonical_record(&resolved_policy("POL-1"), true);
        let outcome = reconcile(
            &RawInquiry::Direct(direct_response(vec![resolved_policy("POL-2")])),
            Some(&[kept.clone()]),
            InquiryPhase::Broker,
        );

        let numbers: Vec<&str> = outcome
            .records
            .iter()
            .map(|record| record.contract_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["POL-1", "POL-2"]);
    }

    #[test]
    fn prior_inputs_are_not_mutated() {
        let prior = vec![to_canonical_record(&resolved_policy("POL-1"), false)];
        let snapshot = prior.clone();
        let _ = reconcile(
            &RawInquiry::Direct(direct_response(vec![resolved_policy("POL-1")])),
            Some(&prior),
            InquiryPhase::Broker,
        );
        assert_eq!(prior, snapshot);
    }
}

mod carrier_phase {
    use super::*;

    fn inactive_policy(number: &str) -> DetailedPolicyInfo {
        let mut policy = resolved_policy(number);
        policy.contract_status = Some("inactive".into());
        policy.errors.push(PolicyError::new(
            PolicyErrorCode::PolicyInactive,
            "Policy is no longer in force",
        ));
        policy
    }

    #[test]
    fn carrier_confirmed_entry_is_resolved_even_with_policy_errors() {
        let outcome = reconcile(
            &RawInquiry::Direct(direct_response(vec![inactive_policy("POL-1")])),
            None,
            InquiryPhase::Carrier,
        );

        let record = &outcome.records[0];
        assert!(record.resolved);
        assert_eq!(record.contract_status, ContractStatus::Inactive);
        assert_eq!(record.errors[0].error_code, PolicyErrorCode::PolicyInactive);
        assert_eq!(
            outcome.next_status_hint,
            TransactionStatus::CarrierValidationPending
        );
    }

    #[test]
    fn carrier_inactive_verdict_replaces_resolved_broker_record() {
        // The broker pass resolved POL-1 as active; the carrier then
        // reports it inactive. The carrier answer must win the merge and
        // the outcome must not hint approval.
        let prior = to_canonical_record(&resolved_policy("POL-1"), true);
        assert_eq!(prior.contract_status, ContractStatus::Active);

        let outcome = reconcile(
            &RawInquiry::Direct(direct_response(vec![inactive_policy("POL-1")])),
            Some(&[prior.clone()]),
            InquiryPhase::Carrier,
        );

        let merged = &outcome.records[0];
        assert_ne!(merged.id, prior.id, "carrier record should win the merge");
        assert_eq!(merged.contract_status, ContractStatus::Inactive);
        assert_eq!(merged.errors.len(), 1);
        assert_ne!(outcome.next_status_hint, TransactionStatus::CarrierApproved);
    }

    #[test]
    fn clean_carrier_confirmation_still_hints_approval() {
        let prior = to_canonical_record(&resolved_policy("POL-1"), true);
        let outcome = reconcile(
            &RawInquiry::Direct(direct_response(vec![resolved_policy("POL-1")])),
            Some(&[prior]),
            InquiryPhase::Carrier,
        );
        assert_eq!(outcome.next_status_hint, TransactionStatus::CarrierApproved);
    }
}

mod intermediary {
    use super::*;

    fn carrier_response(result: ValidationResult, reason: Option<&str>) -> CarrierResponse {
        CarrierResponse {
            transaction_id: "txn-1".into(),
            carrier_id: "carrier".into(),
            policy_id: "POL-200001".into(),
            validation_result: result,
            rejection_reason: reason.map(Into::into),
            additional_data: None,
        }
    }

    #[test]
    fn approved_verdict_yields_resolved_stub_and_approval_hint() {
        let raw = RawInquiry::Intermediary(carrier_response(ValidationResult::Approved, None));
        let outcome = reconcile(&raw, None, InquiryPhase::Carrier);

        let record = &outcome.records[0];
        assert_eq!(record.contract_number, "POL-200001");
        assert_eq!(record.carrier_id, "carrier");
        assert!(record.resolved);
        assert!(record.errors.is_empty());
        assert_eq!(outcome.next_status_hint, TransactionStatus::CarrierApproved);
    }

    #[test]
    fn rejected_verdict_yields_policy_error_and_rejection_hint() {
        let raw = RawInquiry::Intermediary(carrier_response(
            ValidationResult::Rejected,
            Some("Producer is not appointed with carrier"),
        ));
        let outcome = reconcile(&raw, None, InquiryPhase::Carrier);

        let record = &outcome.records[0];
        assert!(!record.resolved);
        assert_eq!(record.errors[0].error_code, PolicyErrorCode::PolicyRestricted);
        assert_eq!(
            record.errors[0].message,
            "Producer is not appointed with carrier"
        );
        // The intermediary verdict is authoritative
        assert_eq!(outcome.next_status_hint, TransactionStatus::CarrierRejected);
    }
}
