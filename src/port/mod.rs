//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems such as the database holding claims, teams, and rosters.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  (waiver processing)    │
//!                    │   Domain + Port         │
//!                    └────────────┬────────────┘
//!                                 │
//!                                 ▼
//!                          ┌─────────────┐
//!                          │ Claim Store │
//!                          │   Adapter   │
//!                          └─────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`outbound::store::ClaimStore`] - Leagues, teams, rosters, and claims
//! - [`outbound::store::ClaimTransaction`] - Live state inside one transaction

pub mod outbound;

pub use outbound::store::{ClaimStore, ClaimTransaction};
