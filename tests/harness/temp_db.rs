use std::path::{Path, PathBuf};

use tempfile::TempDir;
use waivewire::adapter::outbound::sqlite::database::connection::ConnectionOptions;
use waivewire::adapter::outbound::sqlite::{create_pool, run_migrations, DbPool, SqliteClaimStore};
use waivewire::application::waiver::WaiverProcessor;

/// Temporary SQLite database for integration tests.
///
/// The directory, and the database in it, is removed on drop.
pub struct TempDb {
    dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    /// Create an empty, migrated database.
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("{name}.db"));
        let db = Self { dir, path };
        run_migrations(&db.pool()).expect("run migrations");
        db
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    pub fn pool(&self) -> DbPool {
        create_pool(&self.url(), 2, ConnectionOptions::default()).expect("create sqlite pool")
    }

    /// A store over a fresh pool on this database.
    pub fn store(&self) -> SqliteClaimStore {
        SqliteClaimStore::new(self.pool())
    }

    /// A processor over a fresh pool on this database.
    pub fn processor(&self) -> WaiverProcessor<SqliteClaimStore> {
        WaiverProcessor::new(self.store())
    }
}
