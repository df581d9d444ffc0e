//! Contention resolution.
//!
//! Groups pending claims by requested player and ranks each group by league
//! policy. Pure and deterministic: no I/O, no mutation, and the same input
//! always yields the same ranking regardless of input order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{ClaimStatus, LeagueSettings, PlayerId, WaiverClaim, WaiverType};

/// Ranked candidates for one requested player, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentionGroup {
    pub player_id: PlayerId,
    pub candidates: Vec<WaiverClaim>,
}

impl ContentionGroup {
    /// Return true if more than one claim names this player.
    #[must_use]
    pub fn is_contested(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// Compare two claims under a waiver policy. `Less` means `a` ranks first.
///
/// - FAAB: higher bid, then earlier submission, then better team priority.
/// - PRIORITY: better (smaller) priority, then earlier submission.
///
/// The claim id breaks any remaining tie so the order is total.
#[must_use]
pub fn compare_claims(waiver_type: WaiverType, a: &WaiverClaim, b: &WaiverClaim) -> Ordering {
    let policy = match waiver_type {
        WaiverType::Faab => {
            let bid_a = a.terms.bid().unwrap_or(0);
            let bid_b = b.terms.bid().unwrap_or(0);
            bid_b
                .cmp(&bid_a)
                .then_with(|| a.submitted_at.cmp(&b.submitted_at))
                .then_with(|| a.team_priority.cmp(&b.team_priority))
        }
        WaiverType::Priority => {
            let rank_a = a.terms.priority().unwrap_or(a.team_priority);
            let rank_b = b.terms.priority().unwrap_or(b.team_priority);
            rank_a
                .cmp(&rank_b)
                .then_with(|| a.submitted_at.cmp(&b.submitted_at))
        }
    };
    policy.then_with(|| a.id.cmp(&b.id))
}

/// Partition pending claims by requested player and rank each group.
///
/// Groups come back in global processing order: ordered by their top
/// candidate under the same comparator, then by player id. Claims that are
/// not `Pending` are ignored.
#[must_use]
pub fn resolve(claims: &[WaiverClaim], settings: &LeagueSettings) -> Vec<ContentionGroup> {
    let waiver_type = settings.waiver_type;

    let mut by_player: BTreeMap<PlayerId, Vec<WaiverClaim>> = BTreeMap::new();
    for claim in claims.iter().filter(|c| c.status == ClaimStatus::Pending) {
        by_player
            .entry(claim.player_id.clone())
            .or_default()
            .push(claim.clone());
    }

    let mut groups: Vec<ContentionGroup> = by_player
        .into_iter()
        .map(|(player_id, mut candidates)| {
            candidates.sort_by(|a, b| compare_claims(waiver_type, a, b));
            ContentionGroup {
                player_id,
                candidates,
            }
        })
        .collect();

    groups.sort_by(|a, b| match (a.candidates.first(), b.candidates.first()) {
        (Some(top_a), Some(top_b)) => compare_claims(waiver_type, top_a, top_b)
            .then_with(|| a.player_id.cmp(&b.player_id)),
        _ => a.player_id.cmp(&b.player_id),
    });

    groups
}
