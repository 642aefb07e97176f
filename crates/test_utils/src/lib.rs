//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the exchange clearinghouse test
//! suite, plus the randomized mock collaborators used as demo fallbacks.
//! Mock data generation lives here, outside the core, behind the same port
//! traits the real HTTP adapters implement.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `generators`: Property-based test data generators
//! - `mocks`: Port implementations with canned or randomized responses

pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use mocks::*;
