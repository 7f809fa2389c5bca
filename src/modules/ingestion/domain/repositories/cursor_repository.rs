use async_trait::async_trait;

use crate::modules::ingestion::domain::entities::IngestionCursor;
use crate::shared::errors::AppResult;

/// Persistence port for the singleton ingestion cursor.
///
/// `advance` and `mark_genres_loaded` are compare-and-swap updates: they only
/// apply when the stored version still matches `expected.version`, and fail
/// with `Conflict` when another writer got there first. This keeps concurrent
/// ticks from double-processing or skipping an id.
#[async_trait]
pub trait CursorRepository: Send + Sync {
    async fn get(&self) -> AppResult<Option<IngestionCursor>>;

    /// Creates the cursor row at `start_id` when absent; returns the stored
    /// row either way.
    async fn initialize(&self, start_id: i64) -> AppResult<IngestionCursor>;

    /// Moves `next_title_id` forward by exactly one.
    async fn advance(&self, expected: &IngestionCursor) -> AppResult<IngestionCursor>;

    /// Flips the genres-loaded flag to true.
    async fn mark_genres_loaded(&self, expected: &IngestionCursor) -> AppResult<IngestionCursor>;
}
