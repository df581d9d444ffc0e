//! Rolling waiver priority.
//!
//! After a run in a rolling-priority league, every team that won at least one
//! claim moves to the back of the order. Everyone else moves up, keeping
//! their relative order, and priorities are renumbered `1..=N`.

use std::collections::HashSet;

use tracing::info;

use crate::domain::{LeagueSettings, PriorityChange, Team, TeamId};
use crate::error::{Error, Result};
use crate::port::ClaimStore;

/// Compute the rotated order.
///
/// Winners keep their relative order among themselves at the back. Only
/// teams whose priority actually changes are returned.
#[must_use]
pub fn rotate(teams: &[Team], winners: &HashSet<TeamId>) -> Vec<PriorityChange> {
    let mut ordered: Vec<&Team> = teams.iter().collect();
    ordered.sort_by(|a, b| {
        a.waiver_priority
            .cmp(&b.waiver_priority)
            .then_with(|| a.id.cmp(&b.id))
    });

    let (won, rest): (Vec<&Team>, Vec<&Team>) =
        ordered.into_iter().partition(|t| winners.contains(&t.id));

    rest.into_iter()
        .chain(won)
        .zip(1u32..)
        .filter(|(team, priority)| team.waiver_priority != *priority)
        .map(|(team, priority)| PriorityChange {
            team_id: team.id.clone(),
            from: team.waiver_priority,
            to: priority,
        })
        .collect()
}

/// Rotate and persist priorities for a league.
///
/// No-op unless the league uses rolling priority and at least one team won.
/// All changes are written in one transaction.
///
/// # Errors
/// Returns an error if teams cannot be loaded or the update fails; the
/// previous order is then left intact.
pub fn rebalance<S: ClaimStore>(
    store: &S,
    settings: &LeagueSettings,
    winners: &HashSet<TeamId>,
) -> Result<Vec<PriorityChange>> {
    if !settings.uses_rolling_priority() || winners.is_empty() {
        return Ok(Vec::new());
    }

    let teams = store.teams(&settings.league_id)?;
    let changes = rotate(&teams, winners);
    if changes.is_empty() {
        return Ok(changes);
    }

    store.with_transaction(|tx| -> std::result::Result<(), Error> {
        for change in &changes {
            tx.set_waiver_priority(&change.team_id, change.to)?;
        }
        Ok(())
    })?;

    info!(
        league_id = %settings.league_id,
        teams_moved = changes.len(),
        "Rolling waiver priority updated"
    );
    Ok(changes)
}
