//! Waiver claims and their terminal outcomes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{ClaimId, LeagueId, PlayerId, TeamId};

/// The bid data attached to a claim, selected by the league's waiver type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ClaimTerms {
    /// FAAB bid amount.
    FaabBid(u32),
    /// Team waiver priority at claim time (smaller wins).
    PriorityRank(u32),
}

impl ClaimTerms {
    /// The FAAB amount, if this is a bid.
    #[must_use]
    pub const fn bid(self) -> Option<u32> {
        match self {
            Self::FaabBid(amount) => Some(amount),
            Self::PriorityRank(_) => None,
        }
    }

    /// The priority rank, if this is a priority claim.
    #[must_use]
    pub const fn priority(self) -> Option<u32> {
        match self {
            Self::FaabBid(_) => None,
            Self::PriorityRank(priority) => Some(priority),
        }
    }
}

impl fmt::Display for ClaimTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FaabBid(amount) => write!(f, "${amount}"),
            Self::PriorityRank(priority) => write!(f, "#{priority}"),
        }
    }
}

/// Lifecycle state of a claim. `Successful` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    Pending,
    Successful,
    Failed,
}

impl ClaimStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
        }
    }

    /// Return true once the engine has resolved the claim.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "SUCCESSFUL" => Ok(Self::Successful),
            "FAILED" => Ok(Self::Failed),
            other => Err(DomainError::UnknownClaimStatus(other.to_string())),
        }
    }
}

/// Why a claim ended `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    PlayerUnavailable,
    InsufficientBudget,
    DropPlayerLocked,
    DropPlayerNotOnRoster,
    /// Roster at the ceiling and no drop player given.
    RosterFull,
    /// Roster would exceed the ceiling even after the drop.
    RosterOverCapacity,
    /// Storage failed while validating or committing.
    ProcessingError,
}

impl FailureReason {
    /// Human-readable reason stored on the claim.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlayerUnavailable => "player unavailable",
            Self::InsufficientBudget => "insufficient FAAB budget",
            Self::DropPlayerLocked => "cannot drop locked player",
            Self::DropPlayerNotOnRoster => "drop player not on roster",
            Self::RosterFull => "roster full, no drop specified",
            Self::RosterOverCapacity => "roster over capacity",
            Self::ProcessingError => "processing error",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::PlayerUnavailable,
            Self::InsufficientBudget,
            Self::DropPlayerLocked,
            Self::DropPlayerNotOnRoster,
            Self::RosterFull,
            Self::RosterOverCapacity,
            Self::ProcessingError,
        ]
        .into_iter()
        .find(|reason| reason.as_str() == s)
        .ok_or_else(|| DomainError::UnknownFailureReason(s.to_string()))
    }
}

/// A team's request to acquire a free agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaiverClaim {
    pub id: ClaimId,
    pub league_id: LeagueId,
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub drop_player_id: Option<PlayerId>,
    pub terms: ClaimTerms,
    /// Claiming team's waiver priority when the batch loaded the claim.
    /// Breaks equal FAAB bids.
    pub team_priority: u32,
    pub week: u32,
    pub submitted_at: DateTime<Utc>,
    pub status: ClaimStatus,
    pub failure_reason: Option<FailureReason>,
}

/// A pending claim whose stored row cannot be turned into a [`WaiverClaim`].
///
/// Only the identifying columns are kept so the claim can still be failed
/// and reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableClaim {
    pub id: ClaimId,
    pub team_id: TeamId,
    pub player_id: PlayerId,
    /// Why the row could not be read.
    pub error: String,
}

/// Pending claims loaded for one league and week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingClaims {
    pub claims: Vec<WaiverClaim>,
    pub unreadable: Vec<UnreadableClaim>,
}

impl PendingClaims {
    /// Return true if there is nothing to process or fail.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty() && self.unreadable.is_empty()
    }
}

/// Terminal outcome the executor writes back to a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimResolution {
    /// Claim won; records the final awarded bid or priority.
    Successful { awarded: ClaimTerms },
    Failed(FailureReason),
}

impl ClaimResolution {
    /// Status the claim moves to.
    #[must_use]
    pub const fn status(self) -> ClaimStatus {
        match self {
            Self::Successful { .. } => ClaimStatus::Successful,
            Self::Failed(_) => ClaimStatus::Failed,
        }
    }
}
