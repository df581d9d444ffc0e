mod harness;
mod support;

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

use harness::temp_db::TempDb;
use support::league::{seed_league, seed_players};
use waivewire::domain::{WaiverMode, WaiverType};
use waivewire::testkit::domain::{at, ClaimBuilder};

fn write_config(dir: &Path, database: &Path) -> PathBuf {
    let path = dir.join("waivewire.toml");
    let toml = format!(
        "[database]\nurl = \"{}\"\nmax_connections = 2\n\n[logging]\nlevel = \"warn\"\nformat = \"json\"\n",
        database.display()
    );
    fs::write(&path, toml).expect("write temp config");
    path
}

fn waivewire(dir: &Path, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("waivewire").expect("binary built");
    cmd.current_dir(dir)
        .env_remove("DATABASE_URL")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {stdout}"))
}

#[test]
fn missing_config_fails_fast() {
    let dir = tempfile::tempdir().expect("create temp dir");

    Command::cargo_bin("waivewire")
        .expect("binary built")
        .current_dir(dir.path())
        .args(["--config", "absent.toml", "migrate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn migrate_creates_schema_once() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = write_config(dir.path(), &dir.path().join("fresh.db"));

    let first = waivewire(dir.path(), &config)
        .args(["--json", "migrate"])
        .output()
        .expect("run waivewire");
    assert!(first.status.success());
    let json = stdout_json(&first);
    assert_eq!(json["command"], "migrate");
    assert_eq!(json["applied"], 1);

    waivewire(dir.path(), &config)
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database is up to date"));
}

#[test]
fn process_unknown_league_exits_nonzero() {
    let db = TempDb::create("cli-unknown");
    let config = write_config(db.dir(), db.path());

    waivewire(db.dir(), &config)
        .args(["process", "--league", "ghost", "--week", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("league not found: ghost"));
}

#[test]
fn process_reports_awards_as_json() {
    let db = TempDb::create("cli-process");
    let store = db.store();
    seed_league(
        &store,
        "L1",
        WaiverType::Faab,
        WaiverMode::Static,
        15,
        &[("x", 1), ("y", 2)],
    );
    seed_players(&store, &[("p", "Puka Nacua")]);
    store
        .submit_claim(&ClaimBuilder::new("cx", "L1", "x", "p").bid(50).submitted(at(0)).build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("cy", "L1", "y", "p").bid(75).submitted(at(5)).build())
        .unwrap();
    let config = write_config(db.dir(), db.path());

    let output = waivewire(db.dir(), &config)
        .args(["--json", "process", "--league", "L1", "--week", "1"])
        .output()
        .expect("run waivewire");

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["command"], "process");
    assert_eq!(json["report"]["processed"], 1);
    assert_eq!(json["report"]["failed"], 1);
    assert_eq!(json["report"]["details"]["successful"][0]["player"], "Puka Nacua");
    assert_eq!(json["report"]["details"]["failed"][0]["reason"], "player_unavailable");

    let row = store.claim_row(&"cy".into()).unwrap().expect("claim exists");
    assert_eq!(row.status, "SUCCESSFUL");
}

#[test]
fn process_with_nothing_pending_says_so() {
    let db = TempDb::create("cli-empty");
    seed_league(&db.store(), "L1", WaiverType::Priority, WaiverMode::Rolling, 15, &[("x", 1)]);
    let config = write_config(db.dir(), db.path());

    waivewire(db.dir(), &config)
        .args(["process", "--league", "L1", "--week", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending claims"));
}

#[test]
fn preview_lists_ranked_groups_without_processing() {
    let db = TempDb::create("cli-preview");
    let store = db.store();
    seed_league(
        &store,
        "L1",
        WaiverType::Priority,
        WaiverMode::Static,
        15,
        &[("x", 2), ("y", 1)],
    );
    store
        .submit_claim(&ClaimBuilder::new("cx", "L1", "x", "p").submitted(at(0)).build())
        .unwrap();
    store
        .submit_claim(&ClaimBuilder::new("cy", "L1", "y", "p").submitted(at(5)).build())
        .unwrap();
    let config = write_config(db.dir(), db.path());

    let output = waivewire(db.dir(), &config)
        .args(["--json", "preview", "--league", "L1", "--week", "1"])
        .output()
        .expect("run waivewire");

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["command"], "preview");
    assert_eq!(json["groups"][0]["candidates"][0]["id"], "cy");
    assert_eq!(json["groups"][0]["candidates"][1]["id"], "cx");

    let row = store.claim_row(&"cx".into()).unwrap().expect("claim exists");
    assert_eq!(row.status, "PENDING");
}
