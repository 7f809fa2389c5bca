use async_trait::async_trait;

use crate::modules::tracking::domain::entities::{AttemptRecord, DailyRequestCount};
use crate::shared::errors::AppResult;

/// Persistence port for the attempt log and its daily counters.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Appends one attempt and bumps the counter of the current local day,
    /// atomically.
    async fn log_attempt(
        &self,
        url: &str,
        query_params: Option<&str>,
        success: bool,
    ) -> AppResult<()>;

    /// Latest attempts, newest first.
    async fn recent(&self, limit: i64) -> AppResult<Vec<AttemptRecord>>;

    /// Counter row for a day key; None when the day has no row.
    async fn find_day(&self, day: &str) -> AppResult<Option<DailyRequestCount>>;
}
