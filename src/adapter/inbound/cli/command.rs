//! Command-line interface definitions.
//!
//! Defines the CLI structure for the waivewire application using `clap`.
//! Subcommands process a league's pending claims for a week, preview the
//! ranked contention groups without mutating anything, and apply database
//! migrations.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fantasy football waiver claim processing CLI
#[derive(Parser, Debug)]
#[command(name = "waivewire")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "waivewire.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the waivewire CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve all pending waiver claims for a league and week
    Process(WeekArgs),

    /// Show how pending claims would be ranked, without processing them
    Preview(WeekArgs),

    /// Apply pending database migrations
    Migrate,
}

/// League and week selecting one processing batch.
#[derive(Args, Debug, Clone)]
pub struct WeekArgs {
    /// League identifier
    #[arg(long)]
    pub league: String,

    /// Processing week
    #[arg(long)]
    pub week: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_process_with_global_flags() {
        let cli = Cli::try_parse_from([
            "waivewire", "process", "--league", "L1", "--week", "3", "--json", "--config", "x.toml",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        match cli.command {
            Commands::Process(args) => {
                assert_eq!(args.league, "L1");
                assert_eq!(args.week, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn week_must_be_a_number() {
        assert!(Cli::try_parse_from(["waivewire", "preview", "--league", "L1", "--week", "three"]).is_err());
    }

    #[test]
    fn config_defaults_to_local_file() {
        let cli = Cli::try_parse_from(["waivewire", "migrate"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("waivewire.toml"));
        assert!(matches!(cli.command, Commands::Migrate));
    }
}
