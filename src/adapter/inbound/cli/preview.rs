//! Handler for the `preview` command.

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::WeekArgs;
use crate::adapter::inbound::cli::output;
use crate::application::waiver::ContentionGroup;
use crate::domain::LeagueId;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Claim")]
    claim: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Terms")]
    terms: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
}

/// Execute the preview command.
pub fn execute(config: &Config, args: &WeekArgs) -> Result<()> {
    let processor = bootstrap::waiver_processor(config)?;
    let league = LeagueId::new(args.league.as_str());
    let groups = processor.preview(&league, args.week)?;
    render(&league, args.week, &groups)
}

fn render(league: &LeagueId, week: u32, groups: &[ContentionGroup]) -> Result<()> {
    if output::is_json() {
        output::json_output(&json!({
            "command": "preview",
            "league": league,
            "week": week,
            "groups": serde_json::to_value(groups)?,
        }));
        return Ok(());
    }

    output::header("preview");
    output::field("League", league);
    output::field("Week", week);

    if groups.is_empty() {
        output::done("No pending claims");
        return Ok(());
    }

    let contested = groups.iter().filter(|g| g.is_contested()).count();
    output::field("Players", groups.len());
    output::field("Contested", contested);

    let rows = groups
        .iter()
        .flat_map(|group| {
            group
                .candidates
                .iter()
                .enumerate()
                .map(move |(i, claim)| CandidateRow {
                    player: group.player_id.to_string(),
                    rank: i + 1,
                    claim: claim.id.to_string(),
                    team: claim.team_id.to_string(),
                    terms: claim.terms.to_string(),
                    submitted: claim.submitted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                })
        });
    output::table("Processing order", rows);
    output::next_step(&format!("waivewire process --league {league} --week {week}"));

    Ok(())
}
