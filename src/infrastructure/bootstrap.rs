//! Infrastructure bootstrap helpers for runtime wiring.

use tracing::info;

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::adapter::outbound::sqlite::SqliteClaimStore;
use crate::application::waiver::WaiverProcessor;
use crate::error::Result;
use crate::infrastructure::config::database::DatabaseConfig;
use crate::infrastructure::config::settings::Config;

/// Open a connection pool for the configured database.
pub fn open_pool(config: &DatabaseConfig) -> Result<DbPool> {
    create_pool(&config.url, config.max_connections, config.connection_options())
}

/// Apply pending migrations, logging how many ran.
pub fn migrate(pool: &DbPool) -> Result<usize> {
    let applied = run_migrations(pool)?;
    if applied > 0 {
        info!(applied, "Applied database migrations");
    }
    Ok(applied)
}

/// Build a waiver processor over the configured SQLite store.
///
/// Migrations are applied first so that a fresh database is usable.
pub fn waiver_processor(config: &Config) -> Result<WaiverProcessor<SqliteClaimStore>> {
    let pool = open_pool(&config.database)?;
    migrate(&pool)?;
    Ok(WaiverProcessor::new(SqliteClaimStore::new(pool)))
}
