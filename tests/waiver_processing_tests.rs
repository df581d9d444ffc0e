mod harness;
mod support;

use diesel::RunQueryDsl;
use harness::temp_db::TempDb;
use support::league::{seed_league, seed_players, seed_team_with_budget};
use waivewire::domain::{
    ClaimId, ClaimStatus, ClaimTerms, FailureReason, LeagueId, PlayerId, TeamId, WaiverMode,
    WaiverType,
};
use waivewire::error::Error;
use waivewire::port::ClaimStore;
use waivewire::testkit::domain::{at, locked, rostered, ClaimBuilder};

fn league_a() -> LeagueId {
    LeagueId::from("A")
}

fn status_of(db: &TempDb, claim: &str) -> (String, Option<String>) {
    let row = db
        .store()
        .claim_row(&ClaimId::from(claim))
        .unwrap()
        .expect("claim exists");
    (row.status, row.failure_reason)
}

#[test]
fn highest_bid_wins_even_when_submitted_later() {
    let db = TempDb::create("faab-highest-bid");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Static, 15, &[("x", 1), ("y", 2)]);
    seed_players(&store, &[("p", "Tank Dell")]);
    store
        .submit_claim(&ClaimBuilder::new("cx", "A", "x", "p").bid(50).submitted(at(0)).build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("cy", "A", "y", "p").bid(75).submitted(at(10)).build())
        .unwrap();

    let report = db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.details.successful[0].claim_id, ClaimId::from("cy"));
    assert_eq!(report.details.successful[0].player, "Tank Dell");
    assert_eq!(report.details.successful[0].bid, ClaimTerms::FaabBid(75));
    assert_eq!(report.details.failed[0].reason, FailureReason::PlayerUnavailable);

    assert_eq!(status_of(&db, "cy").0, "SUCCESSFUL");
    assert_eq!(
        status_of(&db, "cx"),
        ("FAILED".to_string(), Some("player unavailable".to_string()))
    );
    let y = store.team(&TeamId::from("y")).unwrap().unwrap();
    assert_eq!(y.faab_spent, 75);
    let x = store.team(&TeamId::from("x")).unwrap().unwrap();
    assert_eq!(x.faab_spent, 0);

    let notifications = store.notifications_for("owner-y").unwrap();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].message.contains("Tank Dell"));
    assert!(store.notifications_for("owner-x").unwrap().is_empty());
}

#[test]
fn equal_bids_go_to_earlier_submission_then_better_priority() {
    let db = TempDb::create("faab-ties");
    let store = db.store();
    seed_league(
        &store,
        "A",
        WaiverType::Faab,
        WaiverMode::Static,
        15,
        &[("a", 3), ("b", 1), ("c", 2)],
    );
    // Same bid: earlier submission wins.
    store
        .submit_claim(&ClaimBuilder::new("c1", "A", "a", "p1").bid(20).submitted(at(1)).build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("c2", "A", "b", "p1").bid(20).submitted(at(2)).build())
        .unwrap();
    // Same bid and time: better waiver priority wins.
    store
        .submit_claim(&ClaimBuilder::new("c3", "A", "c", "p2").bid(15).submitted(at(5)).build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("c4", "A", "b", "p2").bid(15).submitted(at(5)).build())
        .unwrap();

    db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(status_of(&db, "c1").0, "SUCCESSFUL");
    assert_eq!(status_of(&db, "c2").0, "FAILED");
    assert_eq!(status_of(&db, "c4").0, "SUCCESSFUL");
    assert_eq!(status_of(&db, "c3").0, "FAILED");
}

#[test]
fn player_ends_up_on_exactly_one_roster() {
    let db = TempDb::create("one-team-per-player");
    let store = db.store();
    seed_league(
        &store,
        "A",
        WaiverType::Priority,
        WaiverMode::Static,
        15,
        &[("a", 1), ("b", 2), ("c", 3)],
    );
    for (id, team) in [("c1", "a"), ("c2", "b"), ("c3", "c")] {
        store
            .submit_claim(&ClaimBuilder::new(id, "A", team, "hot").build())
            .unwrap();
    }

    let report = db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.failed, 2);
    let owners: Vec<&str> = ["a", "b", "c"]
        .into_iter()
        .filter(|t| {
            store
                .roster(&TeamId::from(*t))
                .unwrap()
                .iter()
                .any(|e| e.player_id == PlayerId::from("hot"))
        })
        .collect();
    assert_eq!(owners, vec!["a"]);
}

#[test]
fn rolling_priority_moves_winner_to_back() {
    let db = TempDb::create("rolling");
    let store = db.store();
    seed_league(
        &store,
        "A",
        WaiverType::Priority,
        WaiverMode::Rolling,
        15,
        &[("t1", 1), ("t2", 2), ("t3", 3), ("t4", 4)],
    );
    store
        .submit_claim(&ClaimBuilder::new("c1", "A", "t1", "p").build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("c3", "A", "t3", "p").build())
        .unwrap();

    let report = db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(report.details.successful[0].bid, ClaimTerms::PriorityRank(1));
    let priorities: Vec<(String, u32)> = store
        .teams(&league_a())
        .unwrap()
        .into_iter()
        .map(|t| (t.id.to_string(), t.waiver_priority))
        .collect();
    assert_eq!(
        priorities,
        vec![
            ("t2".to_string(), 1),
            ("t3".to_string(), 2),
            ("t4".to_string(), 3),
            ("t1".to_string(), 4)
        ]
    );
    assert_eq!(report.priority_changes.len(), 4);
    let row = store.claim_row(&ClaimId::from("c1")).unwrap().unwrap();
    assert_eq!(row.awarded_priority, Some(1));
}

#[test]
fn static_priority_never_changes() {
    let db = TempDb::create("static");
    let store = db.store();
    seed_league(
        &store,
        "A",
        WaiverType::Priority,
        WaiverMode::Static,
        15,
        &[("t1", 1), ("t2", 2)],
    );
    store
        .submit_claim(&ClaimBuilder::new("c1", "A", "t1", "p").build())
        .unwrap();

    let report = db.processor().process(&league_a(), 1).unwrap();

    assert!(report.priority_changes.is_empty());
    assert_eq!(store.team(&TeamId::from("t1")).unwrap().unwrap().waiver_priority, 1);
}

#[test]
fn locked_drop_player_fails_without_side_effects() {
    let db = TempDb::create("locked-drop");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Static, 2, &[("t", 1)]);
    store.insert_roster_entry(&locked("t", "starter")).unwrap();
    store.insert_roster_entry(&rostered("t", "bench")).unwrap();
    store
        .submit_claim(
            &ClaimBuilder::new("c1", "A", "t", "new")
                .bid(10)
                .drop_player("starter")
                .build(),
        )
        .unwrap();

    let report = db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(report.details.failed[0].reason, FailureReason::DropPlayerLocked);
    assert_eq!(
        status_of(&db, "c1"),
        ("FAILED".to_string(), Some("cannot drop locked player".to_string()))
    );
    let roster: Vec<String> = store
        .roster(&TeamId::from("t"))
        .unwrap()
        .into_iter()
        .map(|e| e.player_id.to_string())
        .collect();
    assert_eq!(roster, vec!["bench", "starter"]);
    assert_eq!(store.team(&TeamId::from("t")).unwrap().unwrap().faab_spent, 0);
}

#[test]
fn drop_and_add_swaps_roster_spot() {
    let db = TempDb::create("swap");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Static, 2, &[("t", 1)]);
    store.insert_roster_entry(&rostered("t", "old1")).unwrap();
    store.insert_roster_entry(&rostered("t", "old2")).unwrap();
    store
        .submit_claim(
            &ClaimBuilder::new("c1", "A", "t", "new")
                .bid(5)
                .drop_player("old2")
                .build(),
        )
        .unwrap();

    db.processor().process(&league_a(), 1).unwrap();

    let roster = store.roster(&TeamId::from("t")).unwrap();
    let ids: Vec<String> = roster.iter().map(|e| e.player_id.to_string()).collect();
    assert_eq!(ids, vec!["new", "old1"]);
    let added = roster.iter().find(|e| e.player_id.as_str() == "new").unwrap();
    assert!(!added.locked);
    assert_eq!(added.acquisition.as_str(), "WAIVER");
}

#[test]
fn roster_limits_are_enforced() {
    let db = TempDb::create("roster-limits");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Static, 1, &[("t", 1), ("u", 2)]);
    store.insert_roster_entry(&rostered("t", "only")).unwrap();
    store.insert_roster_entry(&rostered("u", "u1")).unwrap();
    store.insert_roster_entry(&rostered("u", "u2")).unwrap();
    store
        .submit_claim(&ClaimBuilder::new("full", "A", "t", "p1").bid(1).build())
        .unwrap();
    store
        .submit_claim(
            &ClaimBuilder::new("over", "A", "u", "p2")
                .bid(1)
                .drop_player("u1")
                .build(),
        )
        .unwrap();
    store
        .submit_claim(
            &ClaimBuilder::new("ghost", "A", "t", "p3")
                .bid(1)
                .drop_player("nobody")
                .build(),
        )
        .unwrap();

    db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(
        status_of(&db, "full").1.as_deref(),
        Some("roster full, no drop specified")
    );
    assert_eq!(status_of(&db, "over").1.as_deref(), Some("roster over capacity"));
    assert_eq!(status_of(&db, "ghost").1.as_deref(), Some("drop player not on roster"));
    assert_eq!(store.roster(&TeamId::from("u")).unwrap().len(), 2);
}

#[test]
fn budget_is_never_exceeded_across_claims() {
    let db = TempDb::create("budget");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Static, 15, &[]);
    seed_team_with_budget(&store, "t", "A", 1, 100);
    store
        .submit_claim(&ClaimBuilder::new("c1", "A", "t", "p1").bid(60).submitted(at(0)).build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("c2", "A", "t", "p2").bid(60).submitted(at(1)).build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("c3", "A", "t", "p3").bid(40).submitted(at(2)).build())
        .unwrap();

    let report = db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(
        status_of(&db, "c2").1.as_deref(),
        Some("insufficient FAAB budget")
    );
    let team = store.team(&TeamId::from("t")).unwrap().unwrap();
    assert_eq!(team.faab_spent, 100);
    assert_eq!(team.faab_remaining(), 0);
}

#[test]
fn zero_bid_is_a_valid_claim() {
    let db = TempDb::create("zero-bid");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Static, 15, &[]);
    seed_team_with_budget(&store, "broke", "A", 1, 0);
    store
        .submit_claim(&ClaimBuilder::new("c1", "A", "broke", "p").bid(0).build())
        .unwrap();

    let report = db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(report.processed, 1);
    let row = store.claim_row(&ClaimId::from("c1")).unwrap().unwrap();
    assert_eq!(row.awarded_bid, Some(0));
}

#[test]
fn second_run_is_a_no_op() {
    let db = TempDb::create("idempotent");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Rolling, 15, &[("x", 1), ("y", 2)]);
    store
        .submit_claim(&ClaimBuilder::new("cx", "A", "x", "p").bid(10).build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("cy", "A", "y", "p").bid(20).build())
        .unwrap();

    let processor = db.processor();
    let first = processor.process(&league_a(), 1).unwrap();
    assert_eq!(first.processed + first.failed, 2);

    let spent_before = store.team(&TeamId::from("y")).unwrap().unwrap().faab_spent;
    let second = processor.process(&league_a(), 1).unwrap();

    assert!(second.is_empty());
    assert!(second.priority_changes.is_empty());
    assert_eq!(
        store.team(&TeamId::from("y")).unwrap().unwrap().faab_spent,
        spent_before
    );
    assert_eq!(store.notifications_for("owner-y").unwrap().len(), 1);
}

#[test]
fn only_the_requested_week_is_processed() {
    let db = TempDb::create("week-filter");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Static, 15, &[("t", 1)]);
    store
        .submit_claim(&ClaimBuilder::new("now", "A", "t", "p1").bid(1).week(1).build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("later", "A", "t", "p2").bid(1).week(2).build())
        .unwrap();

    db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(status_of(&db, "now").0, "SUCCESSFUL");
    assert_eq!(status_of(&db, "later").0, "PENDING");
}

#[test]
fn already_rostered_player_is_unavailable() {
    let db = TempDb::create("already-rostered");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Static, 15, &[("a", 1), ("b", 2)]);
    store.insert_roster_entry(&rostered("a", "star")).unwrap();
    store
        .submit_claim(&ClaimBuilder::new("c1", "A", "b", "star").bid(99).build())
        .unwrap();

    let report = db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(report.details.failed[0].reason, FailureReason::PlayerUnavailable);
    assert_eq!(store.team(&TeamId::from("b")).unwrap().unwrap().faab_spent, 0);
}

#[test]
fn missing_league_is_fatal() {
    let db = TempDb::create("missing-league");

    let err = db.processor().process(&LeagueId::from("nope"), 1).unwrap_err();

    assert!(matches!(err, Error::LeagueNotFound { .. }));
    assert_eq!(err.to_string(), "league not found: nope");
}

#[test]
fn preview_ranks_without_mutating() {
    let db = TempDb::create("preview");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Static, 15, &[("x", 1), ("y", 2)]);
    store
        .submit_claim(&ClaimBuilder::new("cx", "A", "x", "p").bid(50).submitted(at(0)).build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("cy", "A", "y", "p").bid(75).submitted(at(10)).build())
        .unwrap();

    let groups = db.processor().preview(&league_a(), 1).unwrap();

    assert_eq!(groups.len(), 1);
    let order: Vec<&str> = groups[0].candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec!["cy", "cx"]);
    assert_eq!(status_of(&db, "cx").0, "PENDING");
    assert_eq!(status_of(&db, "cy").0, "PENDING");
    assert!(store.roster(&TeamId::from("y")).unwrap().is_empty());
    let pending = store.pending_claims(&league_a(), 1).unwrap();
    assert!(pending.claims.iter().all(|c| c.status == ClaimStatus::Pending));
}

#[test]
fn unreadable_claim_row_fails_without_stopping_the_run() {
    let db = TempDb::create("unreadable-row");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Static, 15, &[("x", 1), ("y", 2)]);
    store
        .submit_claim(&ClaimBuilder::new("good", "A", "x", "p").bid(10).build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("bad", "A", "y", "q").bid(20).build())
        .unwrap();
    let mut conn = db.pool().get().unwrap();
    diesel::sql_query("UPDATE waiver_claims SET submitted_at = 'not-a-time' WHERE id = 'bad'")
        .execute(&mut conn)
        .unwrap();

    let report = db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.details.successful[0].claim_id.as_str(), "good");
    assert_eq!(report.failed, 1);
    assert_eq!(report.details.failed[0].claim_id.as_str(), "bad");
    assert_eq!(report.details.failed[0].reason, FailureReason::ProcessingError);
    assert_eq!(
        status_of(&db, "bad"),
        ("FAILED".to_string(), Some("processing error".to_string()))
    );
    assert_eq!(status_of(&db, "good").0, "SUCCESSFUL");
    assert_eq!(store.team(&TeamId::from("y")).unwrap().unwrap().faab_spent, 0);
}

#[test]
fn claim_naming_another_leagues_team_is_failed() {
    let db = TempDb::create("foreign-team");
    let store = db.store();
    seed_league(&store, "A", WaiverType::Faab, WaiverMode::Static, 15, &[("x", 1)]);
    seed_league(&store, "B", WaiverType::Faab, WaiverMode::Static, 15, &[("b1", 1)]);
    store
        .submit_claim(&ClaimBuilder::new("stray", "A", "b1", "p").bid(30).build())
        .unwrap();

    let report = db.processor().process(&league_a(), 1).unwrap();

    assert_eq!(report.processed, 0);
    assert_eq!(report.failed, 1);
    assert_eq!(report.details.failed[0].reason, FailureReason::ProcessingError);
    assert_eq!(status_of(&db, "stray").0, "FAILED");
    let b1 = store.team(&TeamId::from("b1")).unwrap().unwrap();
    assert_eq!(b1.faab_spent, 0);
    assert!(store.roster(&TeamId::from("b1")).unwrap().is_empty());
}
