//! Database model types for Diesel ORM.
//!
//! Rows mirror the tables one to one. Conversions into domain types validate
//! enum strings, signed counters, and RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{leagues, notifications, players, roster_entries, teams, waiver_claims};
use crate::domain::error::non_negative;
use crate::domain::{
    ClaimId, ClaimStatus, ClaimTerms, FailureReason, LeagueId, LeagueSettings, Notification,
    PlayerId, RosterEntry, Team, TeamId, WaiverClaim, WaiverMode, WaiverType,
};
use crate::error::{Error, Result};

/// Database row for a league.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = leagues)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LeagueRow {
    pub id: String,
    pub name: String,
    pub waiver_type: String,
    pub waiver_mode: String,
    pub roster_size: i32,
    pub current_week: i32,
}

impl LeagueRow {
    /// Build a row from domain settings.
    ///
    /// # Errors
    /// Returns an error if a counter does not fit the column.
    pub fn from_settings(settings: &LeagueSettings) -> Result<Self> {
        Ok(Self {
            id: settings.league_id.to_string(),
            name: settings.name.clone(),
            waiver_type: settings.waiver_type.as_str().to_string(),
            waiver_mode: settings.waiver_mode.as_str().to_string(),
            roster_size: to_column("roster_size", settings.roster_size)?,
            current_week: to_column("current_week", settings.current_week)?,
        })
    }

    /// Convert into domain settings.
    ///
    /// Any unusable value is a league configuration error, which aborts a
    /// processing run before it touches a claim.
    ///
    /// # Errors
    /// Returns [`Error::LeagueConfig`] naming the offending value.
    pub fn into_settings(self) -> Result<LeagueSettings> {
        let league_id = LeagueId::from(self.id);
        let config_error = |reason: String| Error::LeagueConfig {
            league: league_id.clone(),
            reason,
        };

        let waiver_type = self
            .waiver_type
            .parse::<WaiverType>()
            .map_err(|e| config_error(e.to_string()))?;
        let waiver_mode = self
            .waiver_mode
            .parse::<WaiverMode>()
            .map_err(|e| config_error(e.to_string()))?;
        let roster_size =
            non_negative("roster_size", self.roster_size).map_err(|e| config_error(e.to_string()))?;
        let current_week = non_negative("current_week", self.current_week)
            .map_err(|e| config_error(e.to_string()))?;

        Ok(LeagueSettings {
            league_id,
            name: self.name,
            waiver_type,
            waiver_mode,
            roster_size,
            current_week,
        })
    }
}

/// Database row for a team.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TeamRow {
    pub id: String,
    pub league_id: String,
    pub name: String,
    pub owner_id: String,
    pub faab_budget: i32,
    pub faab_spent: i32,
    pub waiver_priority: i32,
}

impl TryFrom<&Team> for TeamRow {
    type Error = Error;

    fn try_from(team: &Team) -> Result<Self> {
        Ok(Self {
            id: team.id.to_string(),
            league_id: team.league_id.to_string(),
            name: team.name.clone(),
            owner_id: team.owner_id.clone(),
            faab_budget: to_column("faab_budget", team.faab_budget)?,
            faab_spent: to_column("faab_spent", team.faab_spent)?,
            waiver_priority: to_column("waiver_priority", team.waiver_priority)?,
        })
    }
}

impl TryFrom<TeamRow> for Team {
    type Error = Error;

    fn try_from(row: TeamRow) -> Result<Self> {
        Ok(Self {
            id: TeamId::from(row.id),
            league_id: LeagueId::from(row.league_id),
            name: row.name,
            owner_id: row.owner_id,
            faab_budget: non_negative("faab_budget", row.faab_budget)?,
            faab_spent: non_negative("faab_spent", row.faab_spent)?,
            waiver_priority: non_negative("waiver_priority", row.waiver_priority)?,
        })
    }
}

/// Database row for a player.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PlayerRow {
    pub id: String,
    pub name: String,
    pub position: String,
}

/// Database row for a roster entry.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = roster_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RosterEntryRow {
    pub player_id: String,
    pub team_id: String,
    pub slot: String,
    pub locked: bool,
    pub acquisition: String,
    pub acquired_at: String,
}

impl From<&RosterEntry> for RosterEntryRow {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            player_id: entry.player_id.to_string(),
            team_id: entry.team_id.to_string(),
            slot: entry.slot.as_str().to_string(),
            locked: entry.locked,
            acquisition: entry.acquisition.as_str().to_string(),
            acquired_at: entry.acquired_at.to_rfc3339(),
        }
    }
}

impl TryFrom<RosterEntryRow> for RosterEntry {
    type Error = Error;

    fn try_from(row: RosterEntryRow) -> Result<Self> {
        Ok(Self {
            team_id: TeamId::from(row.team_id),
            player_id: PlayerId::from(row.player_id),
            slot: row.slot.parse()?,
            locked: row.locked,
            acquisition: row.acquisition.parse()?,
            acquired_at: parse_timestamp(&row.acquired_at)?,
        })
    }
}

/// Database row for a waiver claim.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = waiver_claims)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClaimRow {
    pub id: String,
    pub league_id: String,
    pub team_id: String,
    pub player_id: String,
    pub drop_player_id: Option<String>,
    pub bid_amount: Option<i32>,
    pub week: i32,
    pub submitted_at: String,
    pub status: String,
    pub failure_reason: Option<String>,
    pub awarded_bid: Option<i32>,
    pub awarded_priority: Option<i32>,
    pub processed_at: Option<String>,
}

impl ClaimRow {
    /// A claim as a team submits it. Only FAAB terms carry a stored bid.
    ///
    /// # Errors
    /// Returns an error if the bid or week does not fit the column.
    pub fn submitted(claim: &WaiverClaim) -> Result<Self> {
        Ok(Self {
            id: claim.id.to_string(),
            league_id: claim.league_id.to_string(),
            team_id: claim.team_id.to_string(),
            player_id: claim.player_id.to_string(),
            drop_player_id: claim.drop_player_id.as_ref().map(ToString::to_string),
            bid_amount: claim.terms.bid().map(|b| to_column("bid_amount", b)).transpose()?,
            week: to_column("week", claim.week)?,
            submitted_at: claim.submitted_at.to_rfc3339(),
            status: claim.status.as_str().to_string(),
            failure_reason: claim.failure_reason.map(|r| r.as_str().to_string()),
            awarded_bid: None,
            awarded_priority: None,
            processed_at: None,
        })
    }

    /// Convert into a domain claim.
    ///
    /// Terms are chosen by `waiver_type`: FAAB leagues use the stored bid
    /// (absent means zero), priority leagues use `team_priority`.
    ///
    /// # Errors
    /// Returns an error if a stored value cannot be parsed.
    pub fn into_claim(self, waiver_type: WaiverType, team_priority: u32) -> Result<WaiverClaim> {
        let terms = match waiver_type {
            WaiverType::Faab => ClaimTerms::FaabBid(
                self.bid_amount
                    .map(|b| non_negative("bid_amount", b))
                    .transpose()?
                    .unwrap_or(0),
            ),
            WaiverType::Priority => ClaimTerms::PriorityRank(team_priority),
        };

        Ok(WaiverClaim {
            id: ClaimId::from(self.id),
            league_id: LeagueId::from(self.league_id),
            team_id: TeamId::from(self.team_id),
            player_id: PlayerId::from(self.player_id),
            drop_player_id: self.drop_player_id.map(PlayerId::from),
            terms,
            team_priority,
            week: non_negative("week", self.week)?,
            submitted_at: parse_timestamp(&self.submitted_at)?,
            status: self.status.parse::<ClaimStatus>()?,
            failure_reason: self
                .failure_reason
                .as_deref()
                .map(str::parse::<FailureReason>)
                .transpose()?,
        })
    }
}

/// Database row for a notification.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationRow {
    pub id: String,
    pub recipient: String,
    pub kind: String,
    pub message: String,
    pub created_at: String,
}

impl From<&Notification> for NotificationRow {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.clone(),
            recipient: notification.recipient.clone(),
            kind: notification.kind.as_str().to_string(),
            message: notification.message.clone(),
            created_at: notification.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<NotificationRow> for Notification {
    type Error = Error;

    fn try_from(row: NotificationRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            recipient: row.recipient,
            kind: row.kind.parse()?,
            message: row.message,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Parse an RFC 3339 column into UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("invalid timestamp '{value}': {e}")))
}

/// Narrow an unsigned domain counter to an INTEGER column.
pub fn to_column(field: &'static str, value: u32) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::Database(format!("{field} out of range: {value}")))
}
