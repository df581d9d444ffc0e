//! Terminal rendering for waiver runs.
//!
//! Human mode prints a short summary followed by one line per claim outcome.
//! `--json` replaces all of it with a single JSON document on stdout, and
//! `--quiet` keeps nothing but errors.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::domain::{FailedClaim, PriorityChange, ProcessingReport, SuccessfulClaim};

/// How the CLI writes to the terminal, chosen from the global flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Human,
    Quiet,
    Json,
}

impl OutputMode {
    /// `--json` wins over `--quiet`.
    #[must_use]
    pub const fn from_flags(json: bool, quiet: bool) -> Self {
        if json {
            Self::Json
        } else if quiet {
            Self::Quiet
        } else {
            Self::Human
        }
    }
}

static MODE: RwLock<OutputMode> = parking_lot::const_rwlock(OutputMode::Human);

/// Set the output mode. Call once, before any command runs.
pub fn configure(mode: OutputMode) {
    *MODE.write() = mode;
}

/// Return whether the command should emit its JSON payload.
#[must_use]
pub fn is_json() -> bool {
    *MODE.read() == OutputMode::Json
}

fn human() -> bool {
    *MODE.read() == OutputMode::Human
}

/// Print `waivewire <command>` and the crate version.
pub fn header(command: &str) {
    if !human() {
        return;
    }
    println!(
        "{} {} {}",
        "waivewire".bold(),
        command,
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!();
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if human() {
        println!("  {:<10} {}", label.dimmed(), value);
    }
}

/// Print a completed step.
pub fn done(message: &str) {
    if human() {
        println!("  {} {}", "✓".green(), message);
    }
}

/// Print an error to stderr. Shown in every mode.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "error": message }));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

/// Print a titled table.
pub fn table<T: Tabled>(title: &str, rows: impl IntoIterator<Item = T>) {
    if !human() {
        return;
    }
    println!();
    println!("{}", title.bold());
    for line in Table::new(rows).to_string().lines() {
        println!("  {line}");
    }
}

/// Suggest the command to run next.
pub fn next_step(command: &str) {
    if human() {
        println!();
        println!("  {} {}", "next:".dimmed(), command.cyan());
    }
}

/// Emit the command's JSON payload.
pub fn json_output(value: &serde_json::Value) {
    println!("{value}");
}

/// One line for an awarded claim.
#[must_use]
pub fn award_line(claim: &SuccessfulClaim) -> String {
    format!(
        "{} gets {} for {} ({})",
        claim.team, claim.player, claim.bid, claim.claim_id
    )
}

/// One line for a rejected claim.
#[must_use]
pub fn rejection_line(claim: &FailedClaim) -> String {
    format!(
        "{} misses {}: {} ({})",
        claim.team, claim.player, claim.reason, claim.claim_id
    )
}

/// One line for a rotated waiver priority.
#[must_use]
pub fn priority_line(change: &PriorityChange) -> String {
    format!("{} #{} -> #{}", change.team_id, change.from, change.to)
}

/// Print the outcome of every claim in a run, then any priority rotation.
pub fn claim_outcomes(report: &ProcessingReport) {
    if !human() {
        return;
    }

    if !report.is_empty() {
        println!();
        println!("{}", "Claims".bold());
    }
    for claim in &report.details.successful {
        println!("  {} {}", "+".green(), award_line(claim));
    }
    for claim in &report.details.failed {
        println!("  {} {}", "-".red(), rejection_line(claim).red());
    }

    if !report.priority_changes.is_empty() {
        println!();
        println!("{}", "Waiver priority".bold());
        for change in &report.priority_changes {
            println!("  {}", priority_line(change));
        }
    }
}
