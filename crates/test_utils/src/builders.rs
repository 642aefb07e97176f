//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use core_kernel::RecordId;
use domain_transfer::wire::{ClientResponse, DetailedPolicyInfo, PolicyInquiryResponse};
use domain_transfer::{
    AccountType, ContractRecord, ContractStatus, OwnershipType, PlanType, PolicyError,
    ProducerError,
};

use crate::fixtures::ResponseFixtures;

/// Builder for canonical contract records
pub struct ContractRecordBuilder {
    contract_number: String,
    carrier_id: String,
    carrier_name: String,
    product_name: String,
    cusip: String,
    ownership: Option<OwnershipType>,
    plan_type: Option<PlanType>,
    account_type: Option<AccountType>,
    owner_name: Option<String>,
    trailing_commission: bool,
    systematic_withdrawal: bool,
    contract_status: ContractStatus,
    resolved: bool,
    errors: Vec<PolicyError>,
}

impl Default for ContractRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractRecordBuilder {
    /// Creates a builder for a resolved, active record
    pub fn new() -> Self {
        Self {
            contract_number: "POL-100001".into(),
            carrier_id: "carrier".into(),
            carrier_name: "Athene Annuity".into(),
            product_name: "Athene Amplify Fixed Indexed Annuity".into(),
            cusip: "123456AB7".into(),
            ownership: Some(OwnershipType::Individual),
            plan_type: Some(PlanType::NonQualified),
            account_type: Some(AccountType::Individual),
            owner_name: None,
            trailing_commission: false,
            systematic_withdrawal: false,
            contract_status: ContractStatus::Active,
            resolved: true,
            errors: Vec::new(),
        }
    }

    pub fn with_contract_number(mut self, number: impl Into<String>) -> Self {
        self.contract_number = number.into();
        self
    }

    pub fn with_carrier_name(mut self, name: impl Into<String>) -> Self {
        self.carrier_name = name.into();
        self
    }

    pub fn with_owner_name(mut self, name: impl Into<String>) -> Self {
        self.owner_name = Some(name.into());
        self
    }

    pub fn with_contract_status(mut self, status: ContractStatus) -> Self {
        self.contract_status = status;
        self
    }

    pub fn unresolved(mut self) -> Self {
        self.resolved = false;
        self.carrier_name = String::new();
        self.product_name = String::new();
        self.cusip = String::new();
        self.contract_status = ContractStatus::Inactive;
        self
    }

    pub fn with_error(mut self, error: PolicyError) -> Self {
        self.errors.push(error);
        self
    }

    pub fn build(self) -> ContractRecord {
        ContractRecord {
            id: RecordId::new(),
            carrier_id: self.carrier_id,
            carrier_name: self.carrier_name,
            product_name: self.product_name,
            contract_number: self.contract_number,
            cusip: self.cusip,
            ownership: self.ownership,
            plan_type: self.plan_type,
            account_type: self.account_type,
            owner_name: self.owner_name,
            trailing_commission: self.trailing_commission,
            systematic_withdrawal: self.systematic_withdrawal,
            contract_status: self.contract_status,
            resolved: self.resolved,
            errors: self.errors,
        }
    }
}

/// Builder for direct-protocol inquiry responses
pub struct PolicyInquiryResponseBuilder {
    client_name: Option<String>,
    policies: Vec<DetailedPolicyInfo>,
    producer_errors: Vec<ProducerError>,
}

impl Default for PolicyInquiryResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyInquiryResponseBuilder {
    pub fn new() -> Self {
        Self {
            client_name: Some("John Smith".into()),
            policies: Vec::new(),
            producer_errors: Vec::new(),
        }
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    pub fn with_policy(mut self, policy: DetailedPolicyInfo) -> Self {
        self.policies.push(policy);
        self
    }

    pub fn with_producer_error(mut self, error: ProducerError) -> Self {
        self.producer_errors.push(error);
        self
    }

    pub fn build(self) -> PolicyInquiryResponse {
        let mut response = ResponseFixtures::inquiry_response(self.policies);
        response.producer_validation.errors = self.producer_errors;
        response.client = ClientResponse {
            client_name: self.client_name,
            ssn_last4: Some("6789".into()),
            policies: response.client.policies,
        };
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_transfer::ProducerErrorCode;

    #[test]
    fn builder_defaults_produce_resolved_active_record() {
        let record = ContractRecordBuilder::new().build();
        assert!(record.resolved);
        assert_eq!(record.contract_status, ContractStatus::Active);
        assert!(record.errors.is_empty());
    }

    #[test]
    fn unresolved_builder_clears_carrier_fields() {
        let record = ContractRecordBuilder::new()
            .with_contract_number("POL-7")
            .unresolved()
            .build();
        assert!(!record.resolved);
        assert_eq!(record.carrier_name, "");
        assert_eq!(record.contract_number, "POL-7");
        assert_eq!(record.contract_status, ContractStatus::Inactive);
    }

    #[test]
    fn response_builder_collects_policies_and_producer_errors() {
        let response = PolicyInquiryResponseBuilder::new()
            .with_client_name("Mary Johnson")
            .with_policy(ResponseFixtures::resolved_policy("POL-1"))
            .with_producer_error(ProducerError::new(
                ProducerErrorCode::NotAppointed,
                "Producer is not appointed with carrier",
            ))
            .build();

        assert_eq!(response.client.client_name.as_deref(), Some("Mary Johnson"));
        assert_eq!(response.client.policies.len(), 1);
        assert_eq!(response.producer_validation.errors.len(), 1);
    }
}
