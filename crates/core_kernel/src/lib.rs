//! Core Kernel - Foundational types for the 1035 exchange clearinghouse
//!
//! This crate provides the fundamental building blocks used across all domain
//! and infrastructure modules:
//! - Strongly-typed identifiers for transactions, records, and inquiries
//! - Common error types shared by the domain layer

pub mod error;
pub mod identifiers;

pub use error::CoreError;
pub use identifiers::{InquiryId, RecordId, TransactionId};
