//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use proptest::prelude::*;

use domain_transfer::wire::{DetailedPolicyInfo, WithdrawalStructure};
use domain_transfer::{ContractStatus, TransactionStatus};

/// Strategy for generating valid transaction statuses
pub fn transaction_status_strategy() -> impl Strategy<Value = TransactionStatus> {
    proptest::sample::select(TransactionStatus::ALL.to_vec())
}

/// Strategy for generating valid contract statuses
pub fn contract_status_strategy() -> impl Strategy<Value = ContractStatus> {
    prop_oneof![
        Just(ContractStatus::Active),
        Just(ContractStatus::Restricted),
        Just(ContractStatus::Inactive),
        Just(ContractStatus::Proprietary),
        Just(ContractStatus::Unappointed),
    ]
}

/// Strategy for generating policy numbers in the carrier numbering scheme
pub fn policy_number_strategy() -> impl Strategy<Value = String> {
    (100000u32..300000u32).prop_map(|n| format!("POL-{n}"))
}

/// Strategy for generating CUSIPs: six digits, two alphanumerics, one digit
pub fn cusip_strategy() -> impl Strategy<Value = String> {
    "[0-9]{6}[A-Z0-9]{2}[0-9]"
}

/// Strategy for generating well-formed, resolvable policy entries
pub fn resolved_policy_strategy() -> impl Strategy<Value = DetailedPolicyInfo> {
    (
        policy_number_strategy(),
        cusip_strategy(),
        proptest::sample::select(vec!["nonQualified", "rothIra", "traditionalIra", "sep", "simple"]),
        proptest::sample::select(vec!["individual", "joint", "trust", "custodial", "entity"]),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(policy_number, cusip, plan_type, account_type, trailing, systematic)| {
                DetailedPolicyInfo {
                    policy_number: Some(policy_number),
                    carrier_name: Some("Nationwide Insurance".into()),
                    account_type: Some(account_type.into()),
                    plan_type: Some(plan_type.into()),
                    ownership: Some("individual".into()),
                    product_name: Some("Nationwide New Heights Fixed Indexed Annuity".into()),
                    cusip: Some(cusip),
                    trailing_commission: trailing,
                    contract_status: Some("active".into()),
                    withdrawal_structure: WithdrawalStructure {
                        systematic_in_place: systematic,
                    },
                    errors: vec![],
                }
            },
        )
}
