use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use waivewire::adapter::inbound::cli::command::Cli;
use waivewire::adapter::inbound::cli::output::{self, OutputMode};
use waivewire::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputMode::from_flags(cli.json, cli.quiet));

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("waivewire starting");

    let command = cli.command.clone();
    let task = tokio::task::spawn_blocking(move || {
        waivewire::adapter::inbound::cli::execute(&command, &config)
    });

    tokio::select! {
        result = task => match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(error = %e, "Fatal error");
                output::error(&e.to_string());
                std::process::exit(1);
            }
            Err(e) => {
                error!(error = %e, "Command task failed");
                output::error(&e.to_string());
                std::process::exit(1);
            }
        },
        _ = signal::ctrl_c() => {
            // An interrupted claim's transaction never commits; it stays pending.
            info!("Shutdown signal received");
            std::process::exit(130);
        }
    }

    info!("waivewire stopped");
}
