//! Handler for the `migrate` command.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute the migrate command.
pub fn execute(config: &Config) -> Result<()> {
    let pool = bootstrap::open_pool(&config.database)?;
    let applied = bootstrap::migrate(&pool)?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "migrate",
            "database": config.database.url,
            "applied": applied,
        }));
        return Ok(());
    }

    output::header("migrate");
    output::field("Database", &config.database.url);
    if applied == 0 {
        output::done("Database is up to date");
    } else {
        output::done(&format!("Applied {applied} migration(s)"));
    }
    Ok(())
}
