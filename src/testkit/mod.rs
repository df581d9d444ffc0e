//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for leagues, teams, roster entries, and claims.
//! - [`store`] - In-memory [`ClaimStore`](crate::port::ClaimStore) with
//!   snapshot transactions and fault injection.

pub mod domain;
pub mod store;
