//! League-level waiver settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::LeagueId;

/// How contested claims are ranked in a league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaiverType {
    /// Blind bidding from a per-team free-agent acquisition budget.
    Faab,
    /// Ranked by each team's waiver priority.
    Priority,
}

impl WaiverType {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Faab => "FAAB",
            Self::Priority => "PRIORITY",
        }
    }
}

impl fmt::Display for WaiverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaiverType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FAAB" => Ok(Self::Faab),
            "PRIORITY" => Ok(Self::Priority),
            other => Err(DomainError::UnknownWaiverType(other.to_string())),
        }
    }
}

/// Whether waiver priority rotates after successful claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaiverMode {
    /// Winners move to the back of the order.
    Rolling,
    /// Order never changes during the season.
    Static,
}

impl WaiverMode {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rolling => "ROLLING",
            Self::Static => "STATIC",
        }
    }
}

impl fmt::Display for WaiverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaiverMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLLING" => Ok(Self::Rolling),
            "STATIC" => Ok(Self::Static),
            other => Err(DomainError::UnknownWaiverMode(other.to_string())),
        }
    }
}

/// Settings the engine needs from a league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueSettings {
    pub league_id: LeagueId,
    pub name: String,
    pub waiver_type: WaiverType,
    pub waiver_mode: WaiverMode,
    /// Maximum number of players on a roster.
    pub roster_size: u32,
    pub current_week: u32,
}

impl LeagueSettings {
    /// Return true if winners rotate to the back of the priority order.
    ///
    /// Rolling mode is ignored for FAAB leagues.
    #[must_use]
    pub fn uses_rolling_priority(&self) -> bool {
        self.waiver_type == WaiverType::Priority && self.waiver_mode == WaiverMode::Rolling
    }
}
