//! Per-claim execution.
//!
//! Each claim is validated against live state and committed inside a single
//! store transaction. A claim either commits completely (roster swap, FAAB
//! charge, status, notification) or fails with a reason and leaves no other
//! side effects.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::domain::{
    ClaimId, ClaimResolution, ClaimStatus, ClaimTerms, FailureReason, LeagueSettings,
    Notification, PlayerId, RosterEntry, WaiverClaim,
};
use crate::error::Error;
use crate::port::{ClaimStore, ClaimTransaction};

/// Result of executing one claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Claim committed with these final terms.
    Successful { awarded: ClaimTerms },
    /// Claim rejected; nothing but its status changed.
    Failed(FailureReason),
    /// Claim was no longer pending (or no longer exists); left untouched.
    Skipped(Option<ClaimStatus>),
}

/// Why a claim transaction was rolled back.
#[derive(Debug)]
enum Abort {
    Skip(Option<ClaimStatus>),
    Invalid(FailureReason),
    Storage(Error),
}

impl From<Error> for Abort {
    fn from(err: Error) -> Self {
        Self::Storage(err)
    }
}

/// Validates and commits individual claims for one league run.
pub struct ClaimExecutor<'a, S> {
    store: &'a S,
    settings: &'a LeagueSettings,
    processed_at: DateTime<Utc>,
}

impl<'a, S: ClaimStore> ClaimExecutor<'a, S> {
    /// Create an executor stamping every resolution with `processed_at`.
    pub fn new(store: &'a S, settings: &'a LeagueSettings, processed_at: DateTime<Utc>) -> Self {
        Self {
            store,
            settings,
            processed_at,
        }
    }

    /// Execute one claim.
    ///
    /// `awarded` holds the players already won earlier in this run; a claim
    /// for one of them fails with [`FailureReason::PlayerUnavailable`].
    /// Storage errors never escape: they become
    /// [`FailureReason::ProcessingError`].
    pub fn execute(
        &self,
        claim: &WaiverClaim,
        player_name: &str,
        awarded: &HashSet<PlayerId>,
    ) -> ExecutionOutcome {
        let result = self
            .store
            .with_transaction(|tx| self.validate_and_commit(tx, claim, player_name, awarded));

        match result {
            Ok(terms) => {
                info!(
                    claim_id = %claim.id,
                    team_id = %claim.team_id,
                    player_id = %claim.player_id,
                    terms = %terms,
                    "Waiver claim awarded"
                );
                ExecutionOutcome::Successful { awarded: terms }
            }
            Err(Abort::Skip(status)) => {
                debug!(claim_id = %claim.id, status = ?status, "Claim no longer pending, skipping");
                ExecutionOutcome::Skipped(status)
            }
            Err(Abort::Invalid(reason)) => {
                warn!(
                    claim_id = %claim.id,
                    team_id = %claim.team_id,
                    player_id = %claim.player_id,
                    reason = %reason,
                    "Waiver claim rejected"
                );
                self.record_failure(&claim.id, reason);
                ExecutionOutcome::Failed(reason)
            }
            Err(Abort::Storage(e)) => {
                error!(
                    claim_id = %claim.id,
                    error = %e,
                    "Waiver claim transaction failed"
                );
                self.record_failure(&claim.id, FailureReason::ProcessingError);
                ExecutionOutcome::Failed(FailureReason::ProcessingError)
            }
        }
    }

    /// Validation steps 1-4 followed by the commit, all on one transaction.
    fn validate_and_commit(
        &self,
        tx: &mut dyn ClaimTransaction,
        claim: &WaiverClaim,
        player_name: &str,
        awarded: &HashSet<PlayerId>,
    ) -> Result<ClaimTerms, Abort> {
        match tx.claim_status(&claim.id)? {
            Some(ClaimStatus::Pending) => {}
            other => return Err(Abort::Skip(other)),
        }

        // Live check: an earlier claim in this run may have just placed the player.
        if awarded.contains(&claim.player_id) || tx.roster_owner(&claim.player_id)?.is_some() {
            return Err(Abort::Invalid(FailureReason::PlayerUnavailable));
        }

        let team = tx
            .team(&claim.team_id)?
            .ok_or_else(|| Error::Database(format!("team {} not found", claim.team_id)))?;

        if let ClaimTerms::FaabBid(amount) = claim.terms {
            if amount > team.faab_remaining() {
                return Err(Abort::Invalid(FailureReason::InsufficientBudget));
            }
        }

        let roster = tx.roster(&team.id)?;
        if let Some(drop_id) = &claim.drop_player_id {
            match roster.iter().find(|e| &e.player_id == drop_id) {
                None => return Err(Abort::Invalid(FailureReason::DropPlayerNotOnRoster)),
                Some(entry) if entry.locked => {
                    return Err(Abort::Invalid(FailureReason::DropPlayerLocked))
                }
                Some(_) => {}
            }
        }

        let dropping = usize::from(claim.drop_player_id.is_some());
        let size_after = roster.len() - dropping + 1;
        if size_after > self.settings.roster_size as usize {
            let reason = if claim.drop_player_id.is_some() {
                FailureReason::RosterOverCapacity
            } else {
                FailureReason::RosterFull
            };
            return Err(Abort::Invalid(reason));
        }

        if let Some(drop_id) = &claim.drop_player_id {
            if !tx.remove_roster_entry(&team.id, drop_id)? {
                return Err(Abort::Invalid(FailureReason::DropPlayerNotOnRoster));
            }
        }

        tx.insert_roster_entry(&RosterEntry::waiver_pickup(
            team.id.clone(),
            claim.player_id.clone(),
            self.processed_at,
        ))?;

        let terms = match claim.terms {
            ClaimTerms::FaabBid(amount) => {
                tx.add_faab_spent(&team.id, amount)?;
                ClaimTerms::FaabBid(amount)
            }
            ClaimTerms::PriorityRank(_) => ClaimTerms::PriorityRank(team.waiver_priority),
        };

        tx.resolve_claim(
            &claim.id,
            ClaimResolution::Successful { awarded: terms },
            self.processed_at,
        )?;
        tx.insert_notification(&Notification::claim_won(
            team.owner_id.as_str(),
            player_name,
            self.processed_at,
        ))?;

        Ok(terms)
    }

    /// Mark a pending claim `Failed` in its own short transaction.
    ///
    /// Used after a validation transaction rolled back, and for claims whose
    /// stored row could not be read. If this also fails the claim stays
    /// `Pending` in storage and will be retried by a later run.
    pub fn record_failure(&self, claim: &ClaimId, reason: FailureReason) {
        let result = self.store.with_transaction(|tx| -> Result<(), Error> {
            if tx.claim_status(claim)? == Some(ClaimStatus::Pending) {
                tx.resolve_claim(claim, ClaimResolution::Failed(reason), self.processed_at)?;
            }
            Ok(())
        });

        if let Err(e) = result {
            error!(
                claim_id = %claim,
                reason = %reason,
                error = %e,
                "Failed to record claim failure"
            );
        }
    }
}
