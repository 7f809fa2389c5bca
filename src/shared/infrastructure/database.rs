use crate::log_info;
use crate::shared::errors::AppError;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::env;
use std::time::Duration;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Connection pool over the bundled SQLite store.
///
/// SQLite allows one writer at a time; every pooled connection gets a busy
/// timeout and WAL journaling so short write contention resolves by waiting
/// instead of erroring.
#[derive(Debug)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(database_url: &str) -> Result<Self, AppError> {
        let database_url = Self::validate_database_url(database_url)?;

        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = r2d2::Pool::builder()
            .max_size(8)
            .connection_timeout(Duration::from_secs(10))
            .test_on_check_out(true)
            .connection_customizer(Box::new(ConnectionPragmas))
            .build(manager)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to create connection pool: {}", e))
            })?;

        log_info!("Database connection pool initialized (max_size: 8)");

        Ok(Self { pool })
    }

    /// Read `DATABASE_URL` from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| {
            AppError::DatabaseError("DATABASE_URL environment variable not found".to_string())
        })?;
        Self::new(&database_url)
    }

    fn validate_database_url(database_url: &str) -> Result<String, AppError> {
        // Accept a bare filesystem path or a sqlite:// URL
        let path = database_url
            .strip_prefix("sqlite://")
            .unwrap_or(database_url);

        if path.is_empty() {
            return Err(AppError::DatabaseError(
                "Database URL must name a SQLite file".to_string(),
            ));
        }
        if path.starts_with("postgres://") || path.starts_with("postgresql://") {
            return Err(AppError::DatabaseError(
                "Expected a SQLite path, got a Postgres URL".to_string(),
            ));
        }

        log_info!("Initializing database at: {}", path);
        Ok(path.to_string())
    }

    pub fn get_connection(&self) -> Result<DbConnection, AppError> {
        self.pool.get().map_err(AppError::from)
    }

    /// Apply pending embedded migrations.
    pub fn run_migrations(&self) -> Result<(), AppError> {
        let mut conn = self.get_connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::DatabaseError(format!("Migration failure: {}", e)))?;
        if !applied.is_empty() {
            log_info!("Applied {} database migration(s)", applied.len());
        }
        Ok(())
    }
}

#[derive(Debug)]
struct ConnectionPragmas;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(
            "PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;",
        )
        .map_err(r2d2::Error::QueryError)
    }
}
