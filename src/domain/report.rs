//! Aggregate result of one waiver processing run.

use serde::{Deserialize, Serialize};

use super::claim::{ClaimTerms, FailureReason};
use super::id::{ClaimId, TeamId};

/// A claim that was awarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessfulClaim {
    pub claim_id: ClaimId,
    pub team: String,
    pub player: String,
    pub bid: ClaimTerms,
}

/// A claim that was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedClaim {
    pub claim_id: ClaimId,
    pub team: String,
    pub player: String,
    pub reason: FailureReason,
}

/// A team whose waiver priority changed at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityChange {
    pub team_id: TeamId,
    pub from: u32,
    pub to: u32,
}

/// Per-claim detail lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDetails {
    pub successful: Vec<SuccessfulClaim>,
    pub failed: Vec<FailedClaim>,
}

/// Result returned by the batch orchestrator.
///
/// `processed` counts successful claims, `failed` counts rejected ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub processed: usize,
    pub failed: usize,
    pub details: ReportDetails,
    /// Rolling priority rotation applied after the run, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority_changes: Vec<PriorityChange>,
}

impl ProcessingReport {
    /// Record an awarded claim.
    pub fn push_success(&mut self, claim: SuccessfulClaim) {
        self.processed += 1;
        self.details.successful.push(claim);
    }

    /// Record a rejected claim.
    pub fn push_failure(&mut self, claim: FailedClaim) {
        self.failed += 1;
        self.details.failed.push(claim);
    }

    /// Return true if no claim was touched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processed == 0 && self.failed == 0
    }
}
