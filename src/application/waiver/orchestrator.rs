//! Batch waiver processing for one league and week.
//!
//! Loads settings and pending claims, ranks contention groups, feeds each
//! group's candidates to the executor in order, then rotates rolling
//! priority once. Only a missing or misconfigured league aborts a run; every
//! other failure is reported per claim.
//!
//! Callers must guarantee that no two runs for the same league overlap.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tracing::{error, info, warn};

use crate::domain::{
    FailedClaim, FailureReason, LeagueId, LeagueSettings, PlayerId, ProcessingReport,
    SuccessfulClaim, TeamId,
};
use crate::error::{Error, Result};
use crate::port::ClaimStore;

use super::executor::{ClaimExecutor, ExecutionOutcome};
use super::rebalancer;
use super::resolver::{self, ContentionGroup};

/// Drives waiver processing runs against a claim store.
pub struct WaiverProcessor<S> {
    store: S,
}

impl<S: ClaimStore> WaiverProcessor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process every pending claim for `league` in `week`.
    ///
    /// Running again once all claims are terminal returns an empty report and
    /// mutates nothing.
    ///
    /// # Errors
    /// Returns [`Error::LeagueNotFound`] or [`Error::LeagueConfig`] before
    /// anything is mutated, or a storage error if claims cannot be loaded.
    pub fn process(&self, league: &LeagueId, week: u32) -> Result<ProcessingReport> {
        let settings = self.load_settings(league)?;
        if settings.current_week != week {
            warn!(
                league_id = %league,
                week,
                current_week = settings.current_week,
                "Processing a week other than the league's current week"
            );
        }

        let pending = self.store.pending_claims(league, week)?;
        if pending.is_empty() {
            info!(league_id = %league, week, "No pending waiver claims");
            return Ok(ProcessingReport::default());
        }

        info!(
            league_id = %league,
            week,
            claims = pending.claims.len(),
            unreadable = pending.unreadable.len(),
            waiver_type = %settings.waiver_type,
            "Processing waiver claims"
        );

        let groups = resolver::resolve(&pending.claims, &settings);
        let team_names = self.team_names(league)?;
        let executor = ClaimExecutor::new(&self.store, &settings, Utc::now());

        let mut report = ProcessingReport::default();
        let mut awarded: HashSet<PlayerId> = HashSet::new();
        let mut winners: HashSet<TeamId> = HashSet::new();

        for claim in &pending.unreadable {
            warn!(
                claim_id = %claim.id,
                team_id = %claim.team_id,
                error = %claim.error,
                "Pending claim could not be read"
            );
            executor.record_failure(&claim.id, FailureReason::ProcessingError);
            report.push_failure(FailedClaim {
                claim_id: claim.id.clone(),
                team: team_names
                    .get(&claim.team_id)
                    .cloned()
                    .unwrap_or_else(|| claim.team_id.to_string()),
                player: self.player_name(&claim.player_id),
                reason: FailureReason::ProcessingError,
            });
        }

        for group in &groups {
            let player_name = self.player_name(&group.player_id);
            for claim in &group.candidates {
                let team_name = team_names
                    .get(&claim.team_id)
                    .cloned()
                    .unwrap_or_else(|| claim.team_id.to_string());

                match executor.execute(claim, &player_name, &awarded) {
                    ExecutionOutcome::Successful { awarded: terms } => {
                        awarded.insert(claim.player_id.clone());
                        winners.insert(claim.team_id.clone());
                        report.push_success(SuccessfulClaim {
                            claim_id: claim.id.clone(),
                            team: team_name,
                            player: player_name.clone(),
                            bid: terms,
                        });
                    }
                    ExecutionOutcome::Failed(reason) => {
                        report.push_failure(FailedClaim {
                            claim_id: claim.id.clone(),
                            team: team_name,
                            player: player_name.clone(),
                            reason,
                        });
                    }
                    ExecutionOutcome::Skipped(_) => {}
                }
            }
        }

        report.priority_changes = match rebalancer::rebalance(&self.store, &settings, &winners) {
            Ok(changes) => changes,
            Err(e) => {
                error!(league_id = %league, error = %e, "Failed to rotate waiver priority");
                Vec::new()
            }
        };

        info!(
            league_id = %league,
            week,
            processed = report.processed,
            failed = report.failed,
            "Waiver processing complete"
        );
        Ok(report)
    }

    /// Rank pending claims without executing anything.
    ///
    /// # Errors
    /// Same fatal errors as [`process`](Self::process).
    pub fn preview(&self, league: &LeagueId, week: u32) -> Result<Vec<ContentionGroup>> {
        let settings = self.load_settings(league)?;
        let pending = self.store.pending_claims(league, week)?;
        if !pending.unreadable.is_empty() {
            warn!(
                league_id = %league,
                week,
                unreadable = pending.unreadable.len(),
                "Unreadable pending claims left out of preview"
            );
        }
        Ok(resolver::resolve(&pending.claims, &settings))
    }

    fn load_settings(&self, league: &LeagueId) -> Result<LeagueSettings> {
        self.store
            .league_settings(league)?
            .ok_or_else(|| Error::LeagueNotFound {
                league: league.clone(),
            })
    }

    fn team_names(&self, league: &LeagueId) -> Result<HashMap<TeamId, String>> {
        Ok(self
            .store
            .teams(league)?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect())
    }

    /// Player display name, falling back to the id.
    fn player_name(&self, player: &PlayerId) -> String {
        match self.store.player_name(player) {
            Ok(Some(name)) => name,
            Ok(None) => player.to_string(),
            Err(e) => {
                warn!(player_id = %player, error = %e, "Failed to load player name");
                player.to_string()
            }
        }
    }
}
