//! CLI module graph.

pub mod command;
pub mod migrate;
pub mod output;
pub mod preview;
pub mod process;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

use command::Commands;

/// Run one subcommand to completion.
///
/// Blocking: the waiver engine and its store are synchronous.
pub fn execute(command: &Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Process(args) => process::execute(config, args),
        Commands::Preview(args) => preview::execute(config, args),
        Commands::Migrate => migrate::execute(config),
    }
}
