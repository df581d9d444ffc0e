//! Seeding helpers for SQLite-backed tests.

use waivewire::adapter::outbound::sqlite::SqliteClaimStore;
use waivewire::domain::{PlayerId, Team, WaiverMode, WaiverType};
use waivewire::testkit::domain::{league, team};

/// Seed a league with teams `(id, priority)`, each with a $100 budget.
pub fn seed_league(
    store: &SqliteClaimStore,
    id: &str,
    waiver_type: WaiverType,
    waiver_mode: WaiverMode,
    roster_size: u32,
    teams: &[(&str, u32)],
) {
    store
        .insert_league(&league(id, waiver_type, waiver_mode, roster_size))
        .expect("insert league");
    for (team_id, priority) in teams {
        store
            .insert_team(&team(team_id, id, *priority))
            .expect("insert team");
    }
}

/// Seed a team with a custom budget.
pub fn seed_team_with_budget(
    store: &SqliteClaimStore,
    id: &str,
    league: &str,
    priority: u32,
    budget: u32,
) {
    store
        .insert_team(&Team {
            faab_budget: budget,
            ..team(id, league, priority)
        })
        .expect("insert team");
}

/// Seed named players.
pub fn seed_players(store: &SqliteClaimStore, players: &[(&str, &str)]) {
    for (id, name) in players {
        store
            .insert_player(&PlayerId::from(*id), name, "WR")
            .expect("insert player");
    }
}
