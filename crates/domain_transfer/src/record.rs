//! Canonical contract record model
//!
//! One [`ContractRecord`] represents a single policy/contract under
//! consideration for transfer. Records are produced by the total mapping
//! function [`to_canonical_record`] and recreated on every reconciliation
//! pass; the contract number is the stable join key across passes, the
//! [`RecordId`] is not.

use serde::{Deserialize, Serialize};

use core_kernel::RecordId;

use crate::wire::DetailedPolicyInfo;

/// Producer-level validation error codes (apply to the agent/firm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProducerErrorCode {
    NotAppointed,
    NotLicensed,
    AffiliationMismatch,
}

/// Policy-level validation error codes (apply to a specific contract)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolicyErrorCode {
    SsnContractMismatch,
    ProprietaryProduct,
    PolicyInactive,
    PolicyRestricted,
}

/// A producer-level validation error with a human-readable message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerError {
    pub error_code: ProducerErrorCode,
    pub message: String,
}

impl ProducerError {
    pub fn new(error_code: ProducerErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code,
            message: message.into(),
        }
    }

    /// Whether this error blocks carrier approval outright
    pub fn is_blocking(&self) -> bool {
        matches!(
            self.error_code,
            ProducerErrorCode::NotAppointed | ProducerErrorCode::NotLicensed
        )
    }
}

/// A policy-level validation error with a human-readable message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyError {
    pub error_code: PolicyErrorCode,
    pub message: String,
}

impl PolicyError {
    pub fn new(error_code: PolicyErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code,
            message: message.into(),
        }
    }
}

/// Ownership structure of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OwnershipType {
    Individual,
    Joint,
    Trust,
    Custodial,
    Entity,
}

/// Tax qualification of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanType {
    NonQualified,
    RothIra,
    TraditionalIra,
    Sep,
    Simple,
}

/// Registration type of the account holding the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    Individual,
    Joint,
    Trust,
    Custodial,
    Entity,
}

/// Administrative status of a contract at the carrier
///
/// Defaults to `Inactive` whenever the source status is absent or
/// unrecognized; a contract is never silently assumed active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Active,
    Restricted,
    Inactive,
    Proprietary,
    Unappointed,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Active => "active",
            ContractStatus::Restricted => "restricted",
            ContractStatus::Inactive => "inactive",
            ContractStatus::Proprietary => "proprietary",
            ContractStatus::Unappointed => "unappointed",
        }
    }
}

impl Default for ContractStatus {
    fn default() -> Self {
        ContractStatus::Inactive
    }
}

/// Canonical representation of one policy/contract under consideration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    /// Regenerated on every reconciliation pass; never a join key
    pub id: RecordId,
    pub carrier_id: String,
    pub carrier_name: String,
    pub product_name: String,
    pub contract_number: String,
    pub cusip: String,
    pub ownership: Option<OwnershipType>,
    pub plan_type: Option<PlanType>,
    pub account_type: Option<AccountType>,
    /// Never returned by carrier validation; propagated from the
    /// broker-side record when present
    pub owner_name: Option<String>,
    pub trailing_commission: bool,
    pub systematic_withdrawal: bool,
    pub contract_status: ContractStatus,
    /// Whether an authoritative source has confirmed this record
    pub resolved: bool,
    /// Advisory, not exclusive: a resolved record may still carry
    /// policy-level errors (e.g. inactive contract confirmed by carrier)
    pub errors: Vec<PolicyError>,
}

impl ContractRecord {
    /// A record with every field at its explicit neutral value
    pub fn empty(contract_number: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            carrier_id: String::new(),
            carrier_name: String::new(),
            product_name: String::new(),
            contract_number: contract_number.into(),
            cusip: String::new(),
            ownership: None,
            plan_type: None,
            account_type: None,
            owner_name: None,
            trailing_commission: false,
            systematic_withdrawal: false,
            contract_status: ContractStatus::Inactive,
            resolved: false,
            errors: Vec::new(),
        }
    }

    /// Field equality ignoring the per-pass identifier
    pub fn fields_eq(&self, other: &ContractRecord) -> bool {
        self.carrier_id == other.carrier_id
            && self.carrier_name == other.carrier_name
            && self.product_name == other.product_name
            && self.contract_number == other.contract_number
            && self.cusip == other.cusip
            && self.ownership == other.ownership
            && self.plan_type == other.plan_type
            && self.account_type == other.account_type
            && self.owner_name == other.owner_name
            && self.trailing_commission == other.trailing_commission
            && self.systematic_withdrawal == other.systematic_withdrawal
            && self.contract_status == other.contract_status
            && self.resolved == other.resolved
            && self.errors == other.errors
    }
}

/// Maps a source plan-type string to the canonical enum
///
/// Unrecognized values map to `None`, which callers must treat as
/// "unknown", distinct from any valid variant.
fn plan_type_from_source(source: &str) -> Option<PlanType> {
    match source {
        "nonQualified" => Some(PlanType::NonQualified),
        "rothIra" => Some(PlanType::RothIra),
        "traditionalIra" => Some(PlanType::TraditionalIra),
        "sep" => Some(PlanType::Sep),
        "simple" => Some(PlanType::Simple),
        _ => None,
    }
}

fn account_type_from_source(source: &str) -> Option<AccountType> {
    match source {
        "individual" => Some(AccountType::Individual),
        "joint" => Some(AccountType::Joint),
        "trust" => Some(AccountType::Trust),
        "custodial" => Some(AccountType::Custodial),
        "entity" => Some(AccountType::Entity),
        _ => None,
    }
}

fn ownership_from_source(source: &str) -> Option<OwnershipType> {
    match source {
        "individual" => Some(OwnershipType::Individual),
        "joint" => Some(OwnershipType::Joint),
        "trust" => Some(OwnershipType::Trust),
        "custodial" => Some(OwnershipType::Custodial),
        "entity" => Some(OwnershipType::Entity),
        _ => None,
    }
}

/// Maps a source contract-status string, case-insensitively
///
/// Absent or unrecognized statuses map to `Inactive`.
fn contract_status_from_source(source: Option<&str>) -> ContractStatus {
    let Some(source) = source else {
        return ContractStatus::Inactive;
    };
    match source.to_ascii_lowercase().as_str() {
        "active" => ContractStatus::Active,
        "restricted" => ContractStatus::Restricted,
        "inactive" => ContractStatus::Inactive,
        "proprietary" => ContractStatus::Proprietary,
        "unappointed" => ContractStatus::Unappointed,
        other => {
            tracing::debug!(status = other, "unrecognized contract status, defaulting to inactive");
            ContractStatus::Inactive
        }
    }
}

/// Total, side-effect-free mapping from a raw policy entry to a canonical
/// record
///
/// Never errors on malformed input: every optional field defaults to an
/// explicit neutral value and unrecognized enum values fall back (`None` for
/// plan/account/ownership, `Inactive` for contract status). Bad data never
/// blocks the pipeline; fallbacks are logged at debug level.
pub fn to_canonical_record(raw: &DetailedPolicyInfo, resolved_hint: bool) -> ContractRecord {
    let plan_type = raw.plan_type.as_deref().and_then(|s| {
        let mapped = plan_type_from_source(s);
        if mapped.is_none() {
            tracing::debug!(plan_type = s, "unrecognized plan type");
        }
        mapped
    });
    let account_type = raw.account_type.as_deref().and_then(|s| {
        let mapped = account_type_from_source(s);
        if mapped.is_none() {
            tracing::debug!(account_type = s, "unrecognized account type");
        }
        mapped
    });
    let ownership = raw.ownership.as_deref().and_then(|s| {
        let mapped = ownership_from_source(s);
        if mapped.is_none() {
            tracing::debug!(ownership = s, "unrecognized ownership type");
        }
        mapped
    });

    ContractRecord {
        id: RecordId::new(),
        carrier_id: String::new(),
        carrier_name: raw.carrier_name.clone().unwrap_or_default(),
        product_name: raw.product_name.clone().unwrap_or_default(),
        contract_number: raw.policy_number.clone().unwrap_or_default(),
        cusip: raw.cusip.clone().unwrap_or_default(),
        ownership,
        plan_type,
        account_type,
        owner_name: None,
        trailing_commission: raw.trailing_commission,
        systematic_withdrawal: raw.withdrawal_structure.systematic_in_place,
        contract_status: contract_status_from_source(raw.contract_status.as_deref()),
        resolved: resolved_hint,
        errors: raw.errors.clone(),
    }
}
