//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities across the clearinghouse
//! system. Fixtures are consistent and predictable for unit tests; anything
//! randomized belongs in `mocks`.

use domain_transfer::wire::{
    CarrierResponse, ClientRequest, ClientResponse, DetailedPolicyInfo, EnumReferences,
    PolicyInquiryRequest, PolicyInquiryResponse, ProducerValidation, RequestingFirm,
    ServicingAgent, ValidationResult, WithdrawalStructure,
};
use domain_transfer::{ProducerError, ProducerErrorCode};

/// Fixture for inquiry request data
pub struct RequestFixtures;

impl RequestFixtures {
    /// A fully populated inquiry request for a demo firm
    pub fn policy_inquiry(policy_numbers: &[&str]) -> PolicyInquiryRequest {
        PolicyInquiryRequest {
            requesting_firm: Self::requesting_firm(),
            client: ClientRequest {
                client_name: Some("John Smith".into()),
                ssn: Some("123-45-6789".into()),
                policy_numbers: policy_numbers.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    pub fn requesting_firm() -> RequestingFirm {
        RequestingFirm {
            firm_name: Some("Demo Firm".into()),
            firm_id: Some("DEMO001".into()),
            servicing_agent: ServicingAgent {
                agent_name: Some("Demo Agent".into()),
                npn: Some("12345678".into()),
            },
        }
    }
}

/// Fixture for inquiry response data
pub struct ResponseFixtures;

impl ResponseFixtures {
    /// A resolved, error-free policy entry
    pub fn resolved_policy(number: &str) -> DetailedPolicyInfo {
        DetailedPolicyInfo {
            policy_number: Some(number.into()),
            carrier_name: Some("Athene Annuity".into()),
            account_type: Some("individual".into()),
            plan_type: Some("nonQualified".into()),
            ownership: Some("individual".into()),
            product_name: Some("Athene Amplify Fixed Indexed Annuity".into()),
            cusip: Some("123456AB7".into()),
            trailing_commission: false,
            contract_status: Some("active".into()),
            withdrawal_structure: WithdrawalStructure {
                systematic_in_place: false,
            },
            errors: vec![],
        }
    }

    /// A partial entry the broker could not resolve
    pub fn unresolved_policy(number: &str) -> DetailedPolicyInfo {
        DetailedPolicyInfo {
            policy_number: Some(number.into()),
            ..Default::default()
        }
    }

    /// Wraps policy entries into a clean inquiry response
    pub fn inquiry_response(policies: Vec<DetailedPolicyInfo>) -> PolicyInquiryResponse {
        PolicyInquiryResponse {
            requesting_firm: RequestFixtures::requesting_firm(),
            producer_validation: ProducerValidation {
                agent_name: Some("Demo Agent".into()),
                npn: Some("12345678".into()),
                errors: vec![],
            },
            client: ClientResponse {
                client_name: Some("John Smith".into()),
                ssn_last4: Some("6789".into()),
                policies,
            },
            enums: Self::enum_references(),
        }
    }

    /// A response whose producer validation failed on appointment
    pub fn not_appointed_response(policies: Vec<DetailedPolicyInfo>) -> PolicyInquiryResponse {
        let mut response = Self::inquiry_response(policies);
        response.producer_validation.errors = vec![ProducerError::new(
            ProducerErrorCode::NotAppointed,
            "Producer is not appointed with carrier",
        )];
        response
    }

    /// The valid enum values echoed back for form population
    pub fn enum_references() -> EnumReferences {
        EnumReferences {
            account_type: vec![
                "individual".into(),
                "joint".into(),
                "trust".into(),
                "custodial".into(),
                "entity".into(),
            ],
            plan_type: vec![
                "nonQualified".into(),
                "rothIra".into(),
                "traditionalIra".into(),
                "sep".into(),
                "simple".into(),
            ],
        }
    }

    /// An intermediary-protocol rejection verdict
    pub fn rejected_carrier_response(policy_id: &str) -> CarrierResponse {
        CarrierResponse {
            transaction_id: "txn-fixture".into(),
            carrier_id: "carrier".into(),
            policy_id: policy_id.into(),
            validation_result: ValidationResult::Rejected,
            rejection_reason: Some("Producer is not appointed with carrier".into()),
            additional_data: None,
        }
    }
}
