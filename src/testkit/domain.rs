//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions so tests focus on assertions rather
//! than construction boilerplate.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::{
    AcquisitionType, ClaimId, ClaimStatus, ClaimTerms, LeagueId, LeagueSettings, PlayerId,
    RosterEntry, RosterSlot, Team, TeamId, WaiverClaim, WaiverMode, WaiverType,
};

/// Fixed reference instant so submission ordering is reproducible.
#[must_use]
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 15, 10, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// `minutes` after [`base_time`].
#[must_use]
pub fn at(minutes: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(minutes)
}

/// League settings with the given policy and roster ceiling, week 1.
#[must_use]
pub fn league(
    id: &str,
    waiver_type: WaiverType,
    waiver_mode: WaiverMode,
    roster_size: u32,
) -> LeagueSettings {
    LeagueSettings {
        league_id: LeagueId::from(id),
        name: format!("League {id}"),
        waiver_type,
        waiver_mode,
        roster_size,
        current_week: 1,
    }
}

/// Team with a $100 budget, nothing spent. Name and owner derive from the id.
#[must_use]
pub fn team(id: &str, league: &str, priority: u32) -> Team {
    Team {
        id: TeamId::from(id),
        league_id: LeagueId::from(league),
        name: format!("Team {id}"),
        owner_id: format!("owner-{id}"),
        faab_budget: 100,
        faab_spent: 0,
        waiver_priority: priority,
    }
}

/// Drafted bench player on a team's roster.
#[must_use]
pub fn rostered(team: &str, player: &str) -> RosterEntry {
    RosterEntry {
        team_id: TeamId::from(team),
        player_id: PlayerId::from(player),
        slot: RosterSlot::Bench,
        locked: false,
        acquisition: AcquisitionType::Draft,
        acquired_at: base_time() - Duration::days(30),
    }
}

/// Locked starter on a team's roster.
#[must_use]
pub fn locked(team: &str, player: &str) -> RosterEntry {
    RosterEntry {
        slot: RosterSlot::Flex,
        locked: true,
        ..rostered(team, player)
    }
}

/// Fluent builder for [`WaiverClaim`].
#[derive(Debug, Clone)]
pub struct ClaimBuilder {
    claim: WaiverClaim,
}

impl ClaimBuilder {
    /// Pending claim in week 1, submitted at [`base_time`], no bid.
    pub fn new(id: &str, league: &str, team: &str, player: &str) -> Self {
        Self {
            claim: WaiverClaim {
                id: ClaimId::from(id),
                league_id: LeagueId::from(league),
                team_id: TeamId::from(team),
                player_id: PlayerId::from(player),
                drop_player_id: None,
                terms: ClaimTerms::FaabBid(0),
                team_priority: 1,
                week: 1,
                submitted_at: base_time(),
                status: ClaimStatus::Pending,
                failure_reason: None,
            },
        }
    }

    #[must_use]
    pub fn bid(mut self, amount: u32) -> Self {
        self.claim.terms = ClaimTerms::FaabBid(amount);
        self
    }

    /// Priority claim; also sets the team priority snapshot.
    #[must_use]
    pub fn priority(mut self, priority: u32) -> Self {
        self.claim.terms = ClaimTerms::PriorityRank(priority);
        self.claim.team_priority = priority;
        self
    }

    /// Team priority snapshot used to break equal FAAB bids.
    #[must_use]
    pub fn team_priority(mut self, priority: u32) -> Self {
        self.claim.team_priority = priority;
        self
    }

    #[must_use]
    pub fn drop_player(mut self, player: &str) -> Self {
        self.claim.drop_player_id = Some(PlayerId::from(player));
        self
    }

    #[must_use]
    pub fn submitted(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.claim.submitted_at = submitted_at;
        self
    }

    #[must_use]
    pub fn week(mut self, week: u32) -> Self {
        self.claim.week = week;
        self
    }

    #[must_use]
    pub fn status(mut self, status: ClaimStatus) -> Self {
        self.claim.status = status;
        self
    }

    #[must_use]
    pub fn build(self) -> WaiverClaim {
        self.claim
    }
}
