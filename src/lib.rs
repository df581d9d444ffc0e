//! Waivewire - fantasy football waiver claim resolution.
//!
//! Resolves a league's pending waiver claims for a week in one batch:
//! contested players are awarded by league policy (FAAB blind bidding or
//! waiver priority), each claim commits atomically, and rolling leagues
//! rotate their waiver order afterwards.
//!
//! # Architecture
//!
//! - [`domain`] - Leagues, teams, rosters, claims, and run reports
//! - [`port`] - The [`ClaimStore`](port::ClaimStore) persistence port
//! - [`application`] - Resolver, executor, rebalancer, and batch orchestrator
//! - [`adapter`] - SQLite store (Diesel) and the clap CLI
//! - [`infrastructure`] - Configuration, logging, and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - In-memory store with fault injection and domain builders
//!
//! # Example
//!
//! ```no_run
//! use waivewire::application::waiver::WaiverProcessor;
//! use waivewire::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteClaimStore};
//! use waivewire::adapter::outbound::sqlite::database::connection::ConnectionOptions;
//! use waivewire::domain::LeagueId;
//!
//! fn main() -> waivewire::error::Result<()> {
//!     let pool = create_pool("waivewire.db", 5, ConnectionOptions::default())?;
//!     run_migrations(&pool)?;
//!     let processor = WaiverProcessor::new(SqliteClaimStore::new(pool));
//!     let report = processor.process(&LeagueId::from("league-1"), 3)?;
//!     println!("{} awarded, {} failed", report.processed, report.failed);
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
