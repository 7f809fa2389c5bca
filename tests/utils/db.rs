/// Isolated test database utility backed by a temporary SQLite file.
///
/// Each test gets its own database file that disappears when the TestDb is
/// dropped. The store must be file-backed: every pooled connection to a
/// `:memory:` database would see its own private, empty schema.
use std::sync::Arc;

use kino::shared::Database;
use tempfile::TempDir;

pub struct TestDb {
    database: Arc<Database>,
    // Held so the directory outlives the pool; dropping it removes the file.
    _dir: TempDir,
}

impl TestDb {
    /// Creates a fresh database file and applies all migrations.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir for test database");
        let path = dir.path().join("kino_test.sqlite3");
        let database = Arc::new(
            Database::new(path.to_str().expect("Temp path is not valid UTF-8"))
                .expect("Failed to open test database"),
        );
        database
            .run_migrations()
            .expect("Failed to migrate test database");

        Self {
            database,
            _dir: dir,
        }
    }

    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.database)
    }
}
