//! Persistence port for waiver processing.
//!
//! The claim store owns leagues, teams, rosters, claims, and notification
//! records. Reads outside a transaction see a snapshot; every mutation goes
//! through [`ClaimStore::with_transaction`] so that a claim either commits
//! completely or leaves no trace.

use chrono::{DateTime, Utc};

use crate::domain::{
    ClaimId, ClaimResolution, ClaimStatus, LeagueId, LeagueSettings, Notification,
    PendingClaims, PlayerId, RosterEntry, Team, TeamId,
};
use crate::error::{Error, Result};

/// Live state and mutations available inside one transaction.
///
/// Reads observe every write committed earlier in the same run as well as
/// writes made earlier in this transaction.
pub trait ClaimTransaction {
    /// Current status of a claim, or `None` if it does not exist.
    fn claim_status(&mut self, claim: &ClaimId) -> Result<Option<ClaimStatus>>;

    /// Team currently rostering the player, if any.
    fn roster_owner(&mut self, player: &PlayerId) -> Result<Option<TeamId>>;

    /// Load a team with its current budget and priority.
    fn team(&mut self, team: &TeamId) -> Result<Option<Team>>;

    /// All roster entries of a team.
    fn roster(&mut self, team: &TeamId) -> Result<Vec<RosterEntry>>;

    /// Remove a player from a team's roster. Returns true if a row was removed.
    fn remove_roster_entry(&mut self, team: &TeamId, player: &PlayerId) -> Result<bool>;

    /// Add a roster entry.
    fn insert_roster_entry(&mut self, entry: &RosterEntry) -> Result<()>;

    /// Increase a team's FAAB spent by `amount`.
    fn add_faab_spent(&mut self, team: &TeamId, amount: u32) -> Result<()>;

    /// Move a claim to its terminal status.
    fn resolve_claim(
        &mut self,
        claim: &ClaimId,
        resolution: ClaimResolution,
        processed_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Queue a notification record.
    fn insert_notification(&mut self, notification: &Notification) -> Result<()>;

    /// Assign a team's waiver priority.
    fn set_waiver_priority(&mut self, team: &TeamId, priority: u32) -> Result<()>;
}

/// Storage operations used by the waiver engine.
///
/// Callers must hold an exclusive lease per (league, week) while a run is in
/// progress; the store does not serialize overlapping runs.
pub trait ClaimStore: Send + Sync {
    /// Load a league's waiver settings.
    ///
    /// # Errors
    /// Returns [`Error::LeagueConfig`] if the stored waiver type or mode is
    /// not recognized.
    fn league_settings(&self, league: &LeagueId) -> Result<Option<LeagueSettings>>;

    /// Pending claims for a league and processing week.
    ///
    /// Claim terms are chosen by the league's waiver type: FAAB leagues get
    /// [`ClaimTerms::FaabBid`](crate::domain::ClaimTerms::FaabBid), priority
    /// leagues get the claiming team's current priority.
    ///
    /// A row that cannot be read, or whose team is not in `league`, is
    /// returned in [`PendingClaims::unreadable`] instead of failing the load.
    ///
    /// # Errors
    /// Returns [`Error::LeagueNotFound`] or [`Error::LeagueConfig`] for the
    /// league itself, or a storage error if the query fails.
    fn pending_claims(&self, league: &LeagueId, week: u32) -> Result<PendingClaims>;

    /// Teams in a league ordered by waiver priority.
    fn teams(&self, league: &LeagueId) -> Result<Vec<Team>>;

    /// Display name of a player.
    fn player_name(&self, player: &PlayerId) -> Result<Option<String>>;

    /// Run `f` inside one transaction.
    ///
    /// Commits when `f` returns `Ok` and rolls back on `Err`, including
    /// errors raised by the store itself while beginning or committing.
    fn with_transaction<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut dyn ClaimTransaction) -> std::result::Result<T, E>,
        E: From<Error>;
}
