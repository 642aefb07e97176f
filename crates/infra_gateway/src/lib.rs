//! Infrastructure Gateway
//!
//! Outbound HTTP adapters implementing the domain's collaborator ports:
//! the direct broker-dealer and carrier APIs (camelCase application
//! protocol) and the clearinghouse intermediary (kebab-case protocol).
//! All transport concerns stay here; the domain only sees
//! [`domain_transfer::InquiryError`].

pub mod broker_dealer;
pub mod carrier;
mod client;
pub mod clearinghouse;
pub mod config;

pub use broker_dealer::BrokerDealerClient;
pub use carrier::CarrierClient;
pub use clearinghouse::ClearinghouseClient;
pub use config::GatewayConfig;
