//! Mock collaborators
//!
//! Port implementations backed by randomized fallback data, substitutable
//! for the real HTTP adapters in tests and demos. The randomized generation
//! that the original workflow kept in process-wide caches lives here as an
//! explicit per-mock cache with a `reset` invalidation; nothing in the core
//! ever generates fallback data.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use core_kernel::TransactionId;
use domain_transfer::wire::{
    BdChangeRequest, CarrierResponse, ClientResponse, DetailedPolicyInfo, ManifestResponse,
    PolicyInquiryRequest, PolicyInquiryResponse, PolicyValidationRequest, ProducerValidation,
    StandardResponse, TransactionStatusEnvelope, TransferConfirmation, WithdrawalStructure,
};
use domain_transfer::{BrokerDealerPort, CarrierPort, ClearinghousePort, InquiryError};

use crate::fixtures::ResponseFixtures;

const CARRIER_NAMES: &[&str] = &[
    "Prudential",
    "Lincoln Financial",
    "Jackson National",
    "Nationwide",
    "Transamerica",
    "Allianz",
    "AXA Equitable",
    "Pacific Life",
    "Athene",
    "Brighthouse Financial",
    "MetLife",
    "Voya Financial",
];

const PRODUCT_NAMES: &[&str] = &[
    "Variable Annuity Plus",
    "ChoicePlus Assurance",
    "Elite Growth VA",
    "Destination Navigator",
    "Secure Foundation",
    "Freedom Builder",
    "Legacy Select",
    "Horizon Advantage",
    "Premier Income",
    "FlexChoice Access",
    "Wealth Protector",
    "Income Shield",
];

const PLAN_TYPES: &[&str] = &["nonQualified", "rothIra", "traditionalIra", "sep", "simple"];
const ACCOUNT_TYPES: &[&str] = &["individual", "joint", "trust", "custodial", "entity"];
const CONTRACT_STATUSES: &[&str] = &["active", "restricted", "inactive", "proprietary", "unappointed"];

fn pick<'a>(rng: &mut StdRng, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Six digits, two alphanumerics, one digit
fn generate_cusip(rng: &mut StdRng) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut cusip = String::with_capacity(9);
    for _ in 0..6 {
        cusip.push(char::from(b'0' + rng.gen_range(0..10)));
    }
    for _ in 0..2 {
        cusip.push(char::from(CHARS[rng.gen_range(0..CHARS.len())]));
    }
    cusip.push(char::from(b'0' + rng.gen_range(0..10)));
    cusip
}

/// Broker-dealer mock producing randomized manifest results
///
/// The first queried policy comes back unresolved (partial data), the rest
/// resolved, mirroring the demo behavior of the real broker feed. Responses
/// are cached per transaction for session consistency.
pub struct MockBrokerDealer {
    rng: Mutex<StdRng>,
    cache: Mutex<HashMap<TransactionId, PolicyInquiryResponse>>,
}

impl MockBrokerDealer {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Deterministic variant for reproducible tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Drops all cached responses
    pub fn reset(&self) {
        self.cache.lock().expect("mock cache poisoned").clear();
    }

    fn generate_policy(rng: &mut StdRng, number: &str, resolved: bool) -> DetailedPolicyInfo {
        if !resolved {
            return DetailedPolicyInfo {
                policy_number: Some(number.to_string()),
                ..Default::default()
            };
        }
        DetailedPolicyInfo {
            policy_number: Some(number.to_string()),
            carrier_name: Some(pick(rng, CARRIER_NAMES).to_string()),
            account_type: Some(pick(rng, ACCOUNT_TYPES).to_string()),
            plan_type: Some(pick(rng, PLAN_TYPES).to_string()),
            ownership: Some(pick(rng, ACCOUNT_TYPES).to_string()),
            product_name: Some(pick(rng, PRODUCT_NAMES).to_string()),
            cusip: Some(generate_cusip(rng)),
            trailing_commission: rng.gen_bool(0.5),
            contract_status: Some(pick(rng, CONTRACT_STATUSES).to_string()),
            withdrawal_structure: WithdrawalStructure {
                systematic_in_place: rng.gen_bool(0.25),
            },
            errors: vec![],
        }
    }
}

impl Default for MockBrokerDealer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrokerDealerPort for MockBrokerDealer {
    async fn query_policies(
        &self,
        transaction_id: TransactionId,
        request: &PolicyInquiryRequest,
    ) -> Result<PolicyInquiryResponse, InquiryError> {
        if let Some(cached) = self
            .cache
            .lock()
            .expect("mock cache poisoned")
            .get(&transaction_id)
        {
            return Ok(cached.clone());
        }

        let mut rng = self.rng.lock().expect("mock rng poisoned");
        let policies = request
            .client
            .policy_numbers
            .iter()
            .filter(|number| !number.trim().is_empty())
            .enumerate()
            .map(|(index, number)| Self::generate_policy(&mut rng, number, index > 0))
            .collect();
        drop(rng);

        let response = PolicyInquiryResponse {
            requesting_firm: request.requesting_firm.clone(),
            producer_validation: ProducerValidation {
                agent_name: request.requesting_firm.servicing_agent.agent_name.clone(),
                npn: request.requesting_firm.servicing_agent.npn.clone(),
                errors: vec![],
            },
            client: ClientResponse {
                client_name: request.client.client_name.clone(),
                ssn_last4: request
                    .client
                    .ssn
                    .as_deref()
                    .map(|ssn| ssn.chars().rev().take(4).collect::<Vec<_>>().iter().rev().collect()),
                policies,
            },
            enums: ResponseFixtures::enum_references(),
        };

        self.cache
            .lock()
            .expect("mock cache poisoned")
            .insert(transaction_id, response.clone());
        Ok(response)
    }
}

/// Carrier mock that resolves every requested policy
///
/// Adds the detail fields carrier validation is authoritative for and
/// upgrades most contracts to active, mirroring the demo carrier feed.
/// Never returns an owner name; the orchestrator propagates those from the
/// broker-side records.
pub struct MockCarrier {
    rng: Mutex<StdRng>,
}

impl MockCarrier {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for MockCarrier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarrierPort for MockCarrier {
    async fn validate_policies(
        &self,
        _transaction_id: TransactionId,
        request: &PolicyValidationRequest,
    ) -> Result<PolicyInquiryResponse, InquiryError> {
        let mut rng = self.rng.lock().expect("mock rng poisoned");
        let policies = request
            .policies
            .iter()
            .map(|number| {
                let contract_status = if rng.gen_bool(0.8) {
                    "active"
                } else {
                    pick(&mut rng, CONTRACT_STATUSES)
                };
                DetailedPolicyInfo {
                    policy_number: Some(number.clone()),
                    carrier_name: Some(pick(&mut rng, CARRIER_NAMES).to_string()),
                    account_type: Some(pick(&mut rng, ACCOUNT_TYPES).to_string()),
                    plan_type: Some(pick(&mut rng, PLAN_TYPES).to_string()),
                    ownership: Some(pick(&mut rng, ACCOUNT_TYPES).to_string()),
                    product_name: Some(pick(&mut rng, PRODUCT_NAMES).to_string()),
                    cusip: Some(generate_cusip(&mut rng)),
                    trailing_commission: rng.gen_bool(0.5),
                    contract_status: Some(contract_status.to_string()),
                    withdrawal_structure: WithdrawalStructure {
                        systematic_in_place: rng.gen_bool(0.25),
                    },
                    errors: vec![],
                }
            })
            .collect();

        let owner: String = Name().fake_with_rng(&mut *rng);
        drop(rng);

        Ok(PolicyInquiryResponse {
            client: ClientResponse {
                client_name: Some(owner),
                ssn_last4: None,
                policies,
            },
            ..Default::default()
        })
    }
}

/// Clearinghouse mock acknowledging every submission
pub struct MockClearinghouse;

fn ack(transaction_id: TransactionId) -> StandardResponse {
    StandardResponse {
        code: "200".into(),
        message: "received".into(),
        transaction_id: transaction_id.to_string(),
        payload: None,
    }
}

#[async_trait]
impl ClearinghousePort for MockClearinghouse {
    async fn submit_policy_inquiry_request(
        &self,
        transaction_id: TransactionId,
        _request: &PolicyInquiryRequest,
    ) -> Result<StandardResponse, InquiryError> {
        Ok(ack(transaction_id))
    }

    async fn submit_policy_inquiry_response(
        &self,
        transaction_id: TransactionId,
        _response: &PolicyInquiryResponse,
    ) -> Result<StandardResponse, InquiryError> {
        Ok(ack(transaction_id))
    }

    async fn receive_manifest_response(
        &self,
        transaction_id: TransactionId,
        _manifest: &ManifestResponse,
    ) -> Result<StandardResponse, InquiryError> {
        Ok(ack(transaction_id))
    }

    async fn receive_bd_change_request(
        &self,
        transaction_id: TransactionId,
        _request: &BdChangeRequest,
    ) -> Result<StandardResponse, InquiryError> {
        Ok(ack(transaction_id))
    }

    async fn receive_carrier_response(
        &self,
        transaction_id: TransactionId,
        _response: &CarrierResponse,
    ) -> Result<StandardResponse, InquiryError> {
        Ok(ack(transaction_id))
    }

    async fn receive_transfer_confirmation(
        &self,
        transaction_id: TransactionId,
        _confirmation: &TransferConfirmation,
    ) -> Result<StandardResponse, InquiryError> {
        Ok(ack(transaction_id))
    }

    async fn query_transaction_status(
        &self,
        transaction_id: TransactionId,
    ) -> Result<TransactionStatusEnvelope, InquiryError> {
        Ok(TransactionStatusEnvelope {
            transaction_id: transaction_id.to_string(),
            current_status: "CARRIER_VALIDATION_PENDING".into(),
            status_history: vec![],
            created_at: Utc::now().to_rfc3339(),
            updated_at: Utc::now().to_rfc3339(),
            broker_role: None,
            carrier_validation_details: None,
            policies_affected: vec![],
            additional_data: None,
        })
    }
}

/// Broker-dealer mock that always fails, for failure-policy tests
pub struct FailingBrokerDealer;

#[async_trait]
impl BrokerDealerPort for FailingBrokerDealer {
    async fn query_policies(
        &self,
        _transaction_id: TransactionId,
        _request: &PolicyInquiryRequest,
    ) -> Result<PolicyInquiryResponse, InquiryError> {
        Err(InquiryError::connection("connection refused"))
    }
}

/// Carrier mock that always times out
pub struct FailingCarrier;

#[async_trait]
impl CarrierPort for FailingCarrier {
    async fn validate_policies(
        &self,
        _transaction_id: TransactionId,
        _request: &PolicyValidationRequest,
    ) -> Result<PolicyInquiryResponse, InquiryError> {
        Err(InquiryError::Timeout { duration_ms: 5000 })
    }
}
