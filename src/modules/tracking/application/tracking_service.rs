use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;

use crate::modules::tracking::domain::entities::{day_key, AttemptRecord};
use crate::modules::tracking::domain::repositories::AttemptRepository;
use crate::modules::tracking::domain::tracker::AttemptTracker;
use crate::shared::errors::AppResult;

pub struct TrackingService {
    attempt_repo: Arc<dyn AttemptRepository>,
}

impl TrackingService {
    pub fn new(attempt_repo: Arc<dyn AttemptRepository>) -> Self {
        Self { attempt_repo }
    }

    pub async fn recent_attempts(&self, limit: i64) -> AppResult<Vec<AttemptRecord>> {
        let attempts = self.attempt_repo.recent(limit).await?;

        Ok(attempts)
    }

    pub async fn attempts_today(&self) -> AppResult<i64> {
        let key = day_key(Local::now().date_naive());
        let count = self.attempt_repo.find_day(&key).await?;

        Ok(count.map(|c| c.total_requests).unwrap_or(0))
    }
}

#[async_trait]
impl AttemptTracker for TrackingService {
    async fn record(&self, url: &str, query_params: Option<&str>, success: bool) -> AppResult<()> {
        self.attempt_repo.log_attempt(url, query_params, success).await
    }
}
