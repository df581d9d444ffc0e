//! Teams, budgets, and roster membership.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{LeagueId, PlayerId, TeamId};

/// A fantasy team within a league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub league_id: LeagueId,
    pub name: String,
    /// User who receives notifications for this team.
    pub owner_id: String,
    pub faab_budget: u32,
    pub faab_spent: u32,
    /// Smaller is higher priority. Unique within a league.
    pub waiver_priority: u32,
}

impl Team {
    /// FAAB still available to bid (`budget - spent`, floored at zero).
    #[must_use]
    pub fn faab_remaining(&self) -> u32 {
        self.faab_budget.saturating_sub(self.faab_spent)
    }
}

/// Lineup slot a rostered player occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RosterSlot {
    Qb,
    Rb,
    Wr,
    Te,
    Flex,
    K,
    Def,
    #[default]
    Bench,
    Ir,
}

impl RosterSlot {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Qb => "QB",
            Self::Rb => "RB",
            Self::Wr => "WR",
            Self::Te => "TE",
            Self::Flex => "FLEX",
            Self::K => "K",
            Self::Def => "DEF",
            Self::Bench => "BENCH",
            Self::Ir => "IR",
        }
    }
}

impl fmt::Display for RosterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RosterSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "QB" => Self::Qb,
            "RB" => Self::Rb,
            "WR" => Self::Wr,
            "TE" => Self::Te,
            "FLEX" => Self::Flex,
            "K" => Self::K,
            "DEF" => Self::Def,
            "BENCH" => Self::Bench,
            "IR" => Self::Ir,
            other => return Err(DomainError::UnknownRosterSlot(other.to_string())),
        })
    }
}

/// How a player came to be on a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcquisitionType {
    Draft,
    Waiver,
    FreeAgent,
    Trade,
}

impl AcquisitionType {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Waiver => "WAIVER",
            Self::FreeAgent => "FREE_AGENT",
            Self::Trade => "TRADE",
        }
    }
}

impl fmt::Display for AcquisitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcquisitionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "WAIVER" => Ok(Self::Waiver),
            "FREE_AGENT" => Ok(Self::FreeAgent),
            "TRADE" => Ok(Self::Trade),
            other => Err(DomainError::UnknownAcquisitionType(other.to_string())),
        }
    }
}

/// A player's membership on a team roster.
///
/// A player is on at most one roster at a time; the store enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub slot: RosterSlot,
    /// Locked players (e.g. in an active lineup slot) cannot be dropped.
    pub locked: bool,
    pub acquisition: AcquisitionType,
    pub acquired_at: DateTime<Utc>,
}

impl RosterEntry {
    /// Entry for a player just won on waivers: bench slot, unlocked.
    #[must_use]
    pub fn waiver_pickup(team_id: TeamId, player_id: PlayerId, acquired_at: DateTime<Utc>) -> Self {
        Self {
            team_id,
            player_id,
            slot: RosterSlot::default(),
            locked: false,
            acquisition: AcquisitionType::Waiver,
            acquired_at,
        }
    }
}
