//! Waiver claim resolution.
//!
//! # Flow
//!
//! 1. [`orchestrator`] loads league settings and pending claims.
//! 2. [`resolver`] groups claims by player and ranks each group.
//! 3. [`executor`] validates and commits candidates one transaction at a time.
//! 4. [`rebalancer`] rotates rolling waiver priority once the run is over.

pub mod executor;
pub mod orchestrator;
pub mod rebalancer;
pub mod resolver;

pub use executor::{ClaimExecutor, ExecutionOutcome};
pub use orchestrator::WaiverProcessor;
pub use resolver::ContentionGroup;
