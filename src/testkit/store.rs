//! In-memory claim store for tests.
//!
//! Transactions run against a cloned copy of the state which replaces the
//! live state only when the closure returns `Ok`, so rollback semantics match
//! the SQLite adapter. Individual operations can be made to fail a given
//! number of times to exercise storage-error paths.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::domain::{
    ClaimId, ClaimResolution, ClaimStatus, ClaimTerms, FailureReason, LeagueId, LeagueSettings,
    Notification, PendingClaims, PlayerId, RosterEntry, Team, TeamId, UnreadableClaim,
    WaiverClaim, WaiverMode, WaiverType,
};
use crate::error::{Error, Result};
use crate::port::{ClaimStore, ClaimTransaction};

/// Operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultPoint {
    InsertRosterEntry,
    RemoveRosterEntry,
    AddFaabSpent,
    ResolveClaim,
    InsertNotification,
    SetWaiverPriority,
}

/// League row as stored, with waiver type and mode kept as raw strings.
#[derive(Debug, Clone)]
struct LeagueRecord {
    name: String,
    waiver_type: String,
    waiver_mode: String,
    roster_size: u32,
    current_week: u32,
}

/// Claim row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRecord {
    pub id: ClaimId,
    pub league_id: LeagueId,
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub drop_player_id: Option<PlayerId>,
    pub bid_amount: Option<u32>,
    pub week: u32,
    pub submitted_at: DateTime<Utc>,
    pub status: ClaimStatus,
    pub failure_reason: Option<FailureReason>,
    pub awarded: Option<ClaimTerms>,
    pub processed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    leagues: HashMap<LeagueId, LeagueRecord>,
    teams: HashMap<TeamId, Team>,
    players: HashMap<PlayerId, String>,
    roster: Vec<RosterEntry>,
    claims: Vec<ClaimRecord>,
    notifications: Vec<Notification>,
}

/// Thread-safe in-memory [`ClaimStore`].
#[derive(Debug, Default)]
pub struct MemoryClaimStore {
    state: Mutex<MemoryState>,
    faults: Mutex<HashMap<FaultPoint, usize>>,
}

impl MemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_league(&self, settings: &LeagueSettings) {
        self.insert_league_raw(
            settings.league_id.as_str(),
            settings.waiver_type.as_str(),
            settings.waiver_mode.as_str(),
            settings.roster_size,
            settings.current_week,
        );
    }

    /// Insert a league with unvalidated waiver type and mode strings.
    pub fn insert_league_raw(
        &self,
        id: &str,
        waiver_type: &str,
        waiver_mode: &str,
        roster_size: u32,
        current_week: u32,
    ) {
        self.state.lock().leagues.insert(
            LeagueId::from(id),
            LeagueRecord {
                name: format!("League {id}"),
                waiver_type: waiver_type.to_string(),
                waiver_mode: waiver_mode.to_string(),
                roster_size,
                current_week,
            },
        );
    }

    pub fn insert_team(&self, team: Team) {
        self.state.lock().teams.insert(team.id.clone(), team);
    }

    pub fn insert_player(&self, id: &str, name: &str) {
        self.state
            .lock()
            .players
            .insert(PlayerId::from(id), name.to_string());
    }

    pub fn insert_roster_entry(&self, entry: RosterEntry) {
        self.state.lock().roster.push(entry);
    }

    /// Store a claim. FAAB terms keep their bid; priority terms store no bid.
    pub fn insert_claim(&self, claim: &WaiverClaim) {
        self.state.lock().claims.push(ClaimRecord {
            id: claim.id.clone(),
            league_id: claim.league_id.clone(),
            team_id: claim.team_id.clone(),
            player_id: claim.player_id.clone(),
            drop_player_id: claim.drop_player_id.clone(),
            bid_amount: claim.terms.bid(),
            week: claim.week,
            submitted_at: claim.submitted_at,
            status: claim.status,
            failure_reason: claim.failure_reason,
            awarded: None,
            processed_at: None,
        });
    }

    /// Make the next `times` calls of `point` fail with a database error.
    pub fn fail(&self, point: FaultPoint, times: usize) {
        self.faults.lock().insert(point, times);
    }

    pub fn team(&self, id: &str) -> Option<Team> {
        self.state.lock().teams.get(&TeamId::from(id)).cloned()
    }

    /// Player ids on a team's roster, sorted.
    pub fn roster_of(&self, team: &str) -> Vec<PlayerId> {
        let team = TeamId::from(team);
        let mut players: Vec<PlayerId> = self
            .state
            .lock()
            .roster
            .iter()
            .filter(|e| e.team_id == team)
            .map(|e| e.player_id.clone())
            .collect();
        players.sort();
        players
    }

    pub fn roster_entry(&self, player: &str) -> Option<RosterEntry> {
        let player = PlayerId::from(player);
        self.state
            .lock()
            .roster
            .iter()
            .find(|e| e.player_id == player)
            .cloned()
    }

    pub fn claim(&self, id: &str) -> Option<ClaimRecord> {
        let id = ClaimId::from(id);
        self.state.lock().claims.iter().find(|c| c.id == id).cloned()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state.lock().notifications.clone()
    }

    fn parse_league(id: &LeagueId, record: &LeagueRecord) -> Result<LeagueSettings> {
        let config_error = |reason: String| Error::LeagueConfig {
            league: id.clone(),
            reason,
        };
        let waiver_type: WaiverType = record
            .waiver_type
            .parse()
            .map_err(|e: crate::domain::DomainError| config_error(e.to_string()))?;
        let waiver_mode: WaiverMode = record
            .waiver_mode
            .parse()
            .map_err(|e: crate::domain::DomainError| config_error(e.to_string()))?;
        Ok(LeagueSettings {
            league_id: id.clone(),
            name: record.name.clone(),
            waiver_type,
            waiver_mode,
            roster_size: record.roster_size,
            current_week: record.current_week,
        })
    }
}

impl ClaimStore for MemoryClaimStore {
    fn league_settings(&self, league: &LeagueId) -> Result<Option<LeagueSettings>> {
        let state = self.state.lock();
        state
            .leagues
            .get(league)
            .map(|record| Self::parse_league(league, record))
            .transpose()
    }

    fn pending_claims(&self, league: &LeagueId, week: u32) -> Result<PendingClaims> {
        let settings = self
            .league_settings(league)?
            .ok_or_else(|| Error::LeagueNotFound {
                league: league.clone(),
            })?;
        let state = self.state.lock();

        let mut pending = PendingClaims::default();
        for record in state
            .claims
            .iter()
            .filter(|c| &c.league_id == league && c.week == week && c.status == ClaimStatus::Pending)
        {
            let team = state
                .teams
                .get(&record.team_id)
                .filter(|t| &t.league_id == league);
            let Some(team) = team else {
                pending.unreadable.push(UnreadableClaim {
                    id: record.id.clone(),
                    team_id: record.team_id.clone(),
                    player_id: record.player_id.clone(),
                    error: format!("team {} is not in league {league}", record.team_id),
                });
                continue;
            };
            let terms = match settings.waiver_type {
                WaiverType::Faab => ClaimTerms::FaabBid(record.bid_amount.unwrap_or(0)),
                WaiverType::Priority => ClaimTerms::PriorityRank(team.waiver_priority),
            };
            pending.claims.push(WaiverClaim {
                id: record.id.clone(),
                league_id: record.league_id.clone(),
                team_id: record.team_id.clone(),
                player_id: record.player_id.clone(),
                drop_player_id: record.drop_player_id.clone(),
                terms,
                team_priority: team.waiver_priority,
                week: record.week,
                submitted_at: record.submitted_at,
                status: record.status,
                failure_reason: record.failure_reason,
            });
        }
        Ok(pending)
    }

    fn teams(&self, league: &LeagueId) -> Result<Vec<Team>> {
        let mut teams: Vec<Team> = self
            .state
            .lock()
            .teams
            .values()
            .filter(|t| &t.league_id == league)
            .cloned()
            .collect();
        teams.sort_by(|a, b| a.waiver_priority.cmp(&b.waiver_priority).then_with(|| a.id.cmp(&b.id)));
        Ok(teams)
    }

    fn player_name(&self, player: &PlayerId) -> Result<Option<String>> {
        Ok(self.state.lock().players.get(player).cloned())
    }

    fn with_transaction<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut dyn ClaimTransaction) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let mut state = self.state.lock();
        let mut working = state.clone();
        let mut tx = MemoryTransaction {
            state: &mut working,
            faults: &self.faults,
        };
        let value = f(&mut tx as &mut dyn ClaimTransaction)?;
        *state = working;
        Ok(value)
    }
}

struct MemoryTransaction<'a> {
    state: &'a mut MemoryState,
    faults: &'a Mutex<HashMap<FaultPoint, usize>>,
}

impl MemoryTransaction<'_> {
    fn check_fault(&self, point: FaultPoint) -> Result<()> {
        let mut faults = self.faults.lock();
        match faults.get_mut(&point) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(Error::Database(format!("injected failure at {point:?}")))
            }
            _ => Ok(()),
        }
    }

    fn team_mut(&mut self, team: &TeamId) -> Result<&mut Team> {
        self.state
            .teams
            .get_mut(team)
            .ok_or_else(|| Error::Database(format!("team {team} not found")))
    }
}

impl ClaimTransaction for MemoryTransaction<'_> {
    fn claim_status(&mut self, claim: &ClaimId) -> Result<Option<ClaimStatus>> {
        Ok(self
            .state
            .claims
            .iter()
            .find(|c| &c.id == claim)
            .map(|c| c.status))
    }

    fn roster_owner(&mut self, player: &PlayerId) -> Result<Option<TeamId>> {
        Ok(self
            .state
            .roster
            .iter()
            .find(|e| &e.player_id == player)
            .map(|e| e.team_id.clone()))
    }

    fn team(&mut self, team: &TeamId) -> Result<Option<Team>> {
        Ok(self.state.teams.get(team).cloned())
    }

    fn roster(&mut self, team: &TeamId) -> Result<Vec<RosterEntry>> {
        Ok(self
            .state
            .roster
            .iter()
            .filter(|e| &e.team_id == team)
            .cloned()
            .collect())
    }

    fn remove_roster_entry(&mut self, team: &TeamId, player: &PlayerId) -> Result<bool> {
        self.check_fault(FaultPoint::RemoveRosterEntry)?;
        let before = self.state.roster.len();
        self.state
            .roster
            .retain(|e| !(&e.team_id == team && &e.player_id == player));
        Ok(self.state.roster.len() < before)
    }

    fn insert_roster_entry(&mut self, entry: &RosterEntry) -> Result<()> {
        self.check_fault(FaultPoint::InsertRosterEntry)?;
        if self
            .state
            .roster
            .iter()
            .any(|e| e.player_id == entry.player_id)
        {
            return Err(Error::Database(
                "UNIQUE constraint failed: roster_entries.player_id".into(),
            ));
        }
        self.state.roster.push(entry.clone());
        Ok(())
    }

    fn add_faab_spent(&mut self, team: &TeamId, amount: u32) -> Result<()> {
        self.check_fault(FaultPoint::AddFaabSpent)?;
        let team = self.team_mut(team)?;
        team.faab_spent = team
            .faab_spent
            .checked_add(amount)
            .ok_or_else(|| Error::Database("faab_spent overflow".into()))?;
        Ok(())
    }

    fn resolve_claim(
        &mut self,
        claim: &ClaimId,
        resolution: ClaimResolution,
        processed_at: DateTime<Utc>,
    ) -> Result<()> {
        self.check_fault(FaultPoint::ResolveClaim)?;
        let record = self
            .state
            .claims
            .iter_mut()
            .find(|c| &c.id == claim)
            .ok_or_else(|| Error::Database(format!("claim {claim} not found")))?;
        record.status = resolution.status();
        record.processed_at = Some(processed_at);
        match resolution {
            ClaimResolution::Successful { awarded } => {
                record.awarded = Some(awarded);
                record.failure_reason = None;
            }
            ClaimResolution::Failed(reason) => {
                record.failure_reason = Some(reason);
            }
        }
        Ok(())
    }

    fn insert_notification(&mut self, notification: &Notification) -> Result<()> {
        self.check_fault(FaultPoint::InsertNotification)?;
        self.state.notifications.push(notification.clone());
        Ok(())
    }

    fn set_waiver_priority(&mut self, team: &TeamId, priority: u32) -> Result<()> {
        self.check_fault(FaultPoint::SetWaiverPriority)?;
        self.team_mut(team)?.waiver_priority = priority;
        Ok(())
    }
}
