/// Shared infrastructure concerns
///
/// Infrastructure shared across bounded contexts (modules).
pub mod database;

// Re-exports for convenience
pub use database::{Database, DbConnection, DbPool};
