// Shared kernel: error types, database pool, cross-cutting utilities.

pub mod errors;
pub mod infrastructure;
pub mod utils;

// Re-exports for convenience
pub use errors::{AppError, AppResult};
pub use infrastructure::database::{Database, DbConnection, DbPool};
