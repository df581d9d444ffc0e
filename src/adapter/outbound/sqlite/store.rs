//! SQLite claim store implementation.
//!
//! Provides persistent storage for leagues, rosters, and waiver claims using
//! SQLite and Diesel ORM. Each [`ClaimStore::with_transaction`] call runs in a
//! `BEGIN IMMEDIATE` transaction so the write lock is taken up front.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    to_column, ClaimRow, LeagueRow, NotificationRow, PlayerRow, RosterEntryRow, TeamRow,
};
use crate::adapter::outbound::sqlite::database::schema::{
    leagues, notifications, players, roster_entries, teams, waiver_claims,
};
use crate::domain::error::non_negative;
use crate::domain::{
    ClaimId, ClaimResolution, ClaimStatus, LeagueId, LeagueSettings, Notification, PendingClaims,
    PlayerId, RosterEntry, Team, TeamId, UnreadableClaim, WaiverClaim,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{ClaimStore, ClaimTransaction};

type PooledSqlite = PooledConnection<ConnectionManager<SqliteConnection>>;

/// SQLite-backed claim store.
///
/// Implements the [`ClaimStore`] trait on top of a pooled connection.
pub struct SqliteClaimStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteClaimStore {
    /// Create a new SQLite claim store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledSqlite> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }

    /// Insert a league.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn insert_league(&self, settings: &LeagueSettings) -> Result<()> {
        let row = LeagueRow::from_settings(settings)?;
        diesel::insert_into(leagues::table)
            .values(&row)
            .execute(&mut self.conn()?)?;
        Ok(())
    }

    /// Insert a team.
    ///
    /// # Errors
    /// Returns an error if the league does not exist or the insert fails.
    pub fn insert_team(&self, team: &Team) -> Result<()> {
        let row = TeamRow::try_from(team)?;
        diesel::insert_into(teams::table)
            .values(&row)
            .execute(&mut self.conn()?)?;
        Ok(())
    }

    /// Insert a player.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn insert_player(&self, id: &PlayerId, name: &str, position: &str) -> Result<()> {
        let row = PlayerRow {
            id: id.to_string(),
            name: name.to_string(),
            position: position.to_string(),
        };
        diesel::insert_into(players::table)
            .values(&row)
            .execute(&mut self.conn()?)?;
        Ok(())
    }

    /// Put a player on a roster outside of waiver processing.
    ///
    /// # Errors
    /// Returns an error if the player is already rostered.
    pub fn insert_roster_entry(&self, entry: &RosterEntry) -> Result<()> {
        diesel::insert_into(roster_entries::table)
            .values(&RosterEntryRow::from(entry))
            .execute(&mut self.conn()?)?;
        Ok(())
    }

    /// Record a submitted claim.
    ///
    /// # Errors
    /// Returns an error if the league or team does not exist.
    pub fn submit_claim(&self, claim: &WaiverClaim) -> Result<()> {
        let row = ClaimRow::submitted(claim)?;
        diesel::insert_into(waiver_claims::table)
            .values(&row)
            .execute(&mut self.conn()?)?;
        Ok(())
    }

    /// Load a team outside of a transaction.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn team(&self, id: &TeamId) -> Result<Option<Team>> {
        let mut conn = self.conn()?;
        load_team(&mut conn, id)
    }

    /// Roster of a team outside of a transaction.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn roster(&self, team: &TeamId) -> Result<Vec<RosterEntry>> {
        let mut conn = self.conn()?;
        load_roster(&mut conn, team)
    }

    /// Raw stored claim, including awarded terms and processing time.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn claim_row(&self, id: &ClaimId) -> Result<Option<ClaimRow>> {
        let row = waiver_claims::table
            .find(id.as_str())
            .select(ClaimRow::as_select())
            .first(&mut self.conn()?)
            .optional()?;
        Ok(row)
    }

    /// Notifications queued for a recipient, oldest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn notifications_for(&self, recipient: &str) -> Result<Vec<Notification>> {
        let rows: Vec<NotificationRow> = notifications::table
            .filter(notifications::recipient.eq(recipient))
            .order((notifications::created_at.asc(), notifications::id.asc()))
            .select(NotificationRow::as_select())
            .load(&mut self.conn()?)?;
        rows.into_iter().map(Notification::try_from).collect()
    }
}

fn load_team(conn: &mut SqliteConnection, id: &TeamId) -> Result<Option<Team>> {
    let row: Option<TeamRow> = teams::table
        .find(id.as_str())
        .select(TeamRow::as_select())
        .first(conn)
        .optional()?;
    row.map(Team::try_from).transpose()
}

fn load_roster(conn: &mut SqliteConnection, team: &TeamId) -> Result<Vec<RosterEntry>> {
    let rows: Vec<RosterEntryRow> = roster_entries::table
        .filter(roster_entries::team_id.eq(team.as_str()))
        .order(roster_entries::player_id.asc())
        .select(RosterEntryRow::as_select())
        .load(conn)?;
    rows.into_iter().map(RosterEntry::try_from).collect()
}

/// Why an immediate transaction was rolled back.
enum TxAbort<E> {
    /// The caller's closure returned an error.
    Caller(E),
    /// Beginning or committing failed.
    Database(diesel::result::Error),
}

impl<E> From<diesel::result::Error> for TxAbort<E> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err)
    }
}

impl ClaimStore for SqliteClaimStore {
    fn league_settings(&self, league: &LeagueId) -> Result<Option<LeagueSettings>> {
        let row: Option<LeagueRow> = leagues::table
            .find(league.as_str())
            .select(LeagueRow::as_select())
            .first(&mut self.conn()?)
            .optional()?;
        row.map(LeagueRow::into_settings).transpose()
    }

    fn pending_claims(&self, league: &LeagueId, week: u32) -> Result<PendingClaims> {
        let settings = self
            .league_settings(league)?
            .ok_or_else(|| Error::LeagueNotFound {
                league: league.clone(),
            })?;

        // Left join so a claim whose team is not in this league is still seen.
        let rows: Vec<(ClaimRow, Option<i32>)> = waiver_claims::table
            .left_join(
                teams::table.on(teams::id
                    .eq(waiver_claims::team_id)
                    .and(teams::league_id.eq(league.as_str()))),
            )
            .filter(waiver_claims::league_id.eq(league.as_str()))
            .filter(waiver_claims::week.eq(to_column("week", week)?))
            .filter(waiver_claims::status.eq(ClaimStatus::Pending.as_str()))
            .order((waiver_claims::submitted_at.asc(), waiver_claims::id.asc()))
            .select((ClaimRow::as_select(), teams::waiver_priority.nullable()))
            .load(&mut self.conn()?)?;

        let mut pending = PendingClaims::default();
        for (row, priority) in rows {
            let id = ClaimId::from(row.id.as_str());
            let team_id = TeamId::from(row.team_id.as_str());
            let player_id = PlayerId::from(row.player_id.as_str());

            let claim = match priority {
                Some(priority) => non_negative("waiver_priority", priority)
                    .map_err(Error::from)
                    .and_then(|team_priority| row.into_claim(settings.waiver_type, team_priority)),
                None => Err(Error::Database(format!(
                    "team {team_id} is not in league {league}"
                ))),
            };

            match claim {
                Ok(claim) => pending.claims.push(claim),
                Err(e) => pending.unreadable.push(UnreadableClaim {
                    id,
                    team_id,
                    player_id,
                    error: e.to_string(),
                }),
            }
        }
        Ok(pending)
    }

    fn teams(&self, league: &LeagueId) -> Result<Vec<Team>> {
        let rows: Vec<TeamRow> = teams::table
            .filter(teams::league_id.eq(league.as_str()))
            .order((teams::waiver_priority.asc(), teams::id.asc()))
            .select(TeamRow::as_select())
            .load(&mut self.conn()?)?;
        rows.into_iter().map(Team::try_from).collect()
    }

    fn player_name(&self, player: &PlayerId) -> Result<Option<String>> {
        let name = players::table
            .find(player.as_str())
            .select(players::name)
            .first::<String>(&mut self.conn()?)
            .optional()?;
        Ok(name)
    }

    fn with_transaction<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut dyn ClaimTransaction) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let mut conn = self.conn().map_err(E::from)?;
        conn.immediate_transaction::<T, TxAbort<E>, _>(|conn| {
            let mut tx = SqliteTransaction { conn };
            f(&mut tx as &mut dyn ClaimTransaction).map_err(TxAbort::Caller)
        })
        .map_err(|abort| match abort {
            TxAbort::Caller(err) => err,
            TxAbort::Database(err) => E::from(Error::from(err)),
        })
    }
}

/// Transaction handle lent to [`ClaimStore::with_transaction`] callers.
struct SqliteTransaction<'a> {
    conn: &'a mut SqliteConnection,
}

impl ClaimTransaction for SqliteTransaction<'_> {
    fn claim_status(&mut self, claim: &ClaimId) -> Result<Option<ClaimStatus>> {
        let status: Option<String> = waiver_claims::table
            .find(claim.as_str())
            .select(waiver_claims::status)
            .first(&mut *self.conn)
            .optional()?;
        Ok(status.map(|s| s.parse::<ClaimStatus>()).transpose()?)
    }

    fn roster_owner(&mut self, player: &PlayerId) -> Result<Option<TeamId>> {
        let owner: Option<String> = roster_entries::table
            .find(player.as_str())
            .select(roster_entries::team_id)
            .first(&mut *self.conn)
            .optional()?;
        Ok(owner.map(TeamId::from))
    }

    fn team(&mut self, team: &TeamId) -> Result<Option<Team>> {
        load_team(self.conn, team)
    }

    fn roster(&mut self, team: &TeamId) -> Result<Vec<RosterEntry>> {
        load_roster(self.conn, team)
    }

    fn remove_roster_entry(&mut self, team: &TeamId, player: &PlayerId) -> Result<bool> {
        let deleted = diesel::delete(
            roster_entries::table
                .filter(roster_entries::player_id.eq(player.as_str()))
                .filter(roster_entries::team_id.eq(team.as_str())),
        )
        .execute(&mut *self.conn)?;
        Ok(deleted > 0)
    }

    fn insert_roster_entry(&mut self, entry: &RosterEntry) -> Result<()> {
        diesel::insert_into(roster_entries::table)
            .values(&RosterEntryRow::from(entry))
            .execute(&mut *self.conn)?;
        Ok(())
    }

    fn add_faab_spent(&mut self, team: &TeamId, amount: u32) -> Result<()> {
        let amount = to_column("faab_spent", amount)?;
        let updated = diesel::update(teams::table.find(team.as_str()))
            .set(teams::faab_spent.eq(teams::faab_spent + amount))
            .execute(&mut *self.conn)?;
        if updated == 0 {
            return Err(Error::Database(format!("team {team} not found")));
        }
        Ok(())
    }

    fn resolve_claim(
        &mut self,
        claim: &ClaimId,
        resolution: ClaimResolution,
        processed_at: DateTime<Utc>,
    ) -> Result<()> {
        let (failure_reason, awarded_bid, awarded_priority) = match resolution {
            ClaimResolution::Successful { awarded } => (
                None,
                awarded.bid().map(|b| to_column("awarded_bid", b)).transpose()?,
                awarded
                    .priority()
                    .map(|p| to_column("awarded_priority", p))
                    .transpose()?,
            ),
            ClaimResolution::Failed(reason) => (Some(reason.as_str().to_string()), None, None),
        };

        let updated = diesel::update(waiver_claims::table.find(claim.as_str()))
            .set((
                waiver_claims::status.eq(resolution.status().as_str()),
                waiver_claims::failure_reason.eq(failure_reason),
                waiver_claims::awarded_bid.eq(awarded_bid),
                waiver_claims::awarded_priority.eq(awarded_priority),
                waiver_claims::processed_at.eq(Some(processed_at.to_rfc3339())),
            ))
            .execute(&mut *self.conn)?;
        if updated == 0 {
            return Err(Error::Database(format!("claim {claim} not found")));
        }
        Ok(())
    }

    fn insert_notification(&mut self, notification: &Notification) -> Result<()> {
        diesel::insert_into(notifications::table)
            .values(&NotificationRow::from(notification))
            .execute(&mut *self.conn)?;
        Ok(())
    }

    fn set_waiver_priority(&mut self, team: &TeamId, priority: u32) -> Result<()> {
        let priority = to_column("waiver_priority", priority)?;
        let updated = diesel::update(teams::table.find(team.as_str()))
            .set(teams::waiver_priority.eq(priority))
            .execute(&mut *self.conn)?;
        if updated == 0 {
            return Err(Error::Database(format!("team {team} not found")));
        }
        Ok(())
    }
}
