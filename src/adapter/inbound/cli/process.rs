//! Handler for the `process` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::WeekArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::{LeagueId, ProcessingReport};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute the process command.
pub fn execute(config: &Config, args: &WeekArgs) -> Result<()> {
    let processor = bootstrap::waiver_processor(config)?;
    let league = LeagueId::new(args.league.as_str());
    let report = processor.process(&league, args.week)?;
    render(&league, args.week, &report)
}

fn render(league: &LeagueId, week: u32, report: &ProcessingReport) -> Result<()> {
    if output::is_json() {
        output::json_output(&json!({
            "command": "process",
            "league": league,
            "week": week,
            "report": serde_json::to_value(report)?,
        }));
        return Ok(());
    }

    output::header("process");
    output::field("League", league);
    output::field("Week", week);

    if report.is_empty() {
        output::done("No pending claims");
        return Ok(());
    }

    output::field("Awarded", report.processed);
    output::field("Failed", report.failed);
    output::claim_outcomes(report);
    Ok(())
}
