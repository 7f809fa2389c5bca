/// Test doubles for the outbound ports.
///
/// Tests wire a `MockCatalog` where production code holds the HTTP client;
/// any call without a matching expectation panics, so a test that expects
/// the catalog to stay untouched simply sets no expectations.
use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use tokio::sync::Mutex;

use kino::modules::catalog::TitleKind;
use kino::modules::ingestion::{CatalogClient, CatalogGenre, PersonMatch, TitleDetails, TitleHit};
use kino::modules::tracking::AttemptTracker;
use kino::shared::AppResult;

mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogClient for Catalog {
        async fn fetch_title_details(
            &self,
            kind: TitleKind,
            external_id: i64,
        ) -> AppResult<TitleDetails>;

        async fn fetch_genre_catalog(&self) -> AppResult<Vec<CatalogGenre>>;

        async fn search_person(&self, full_name: &str) -> AppResult<Vec<PersonMatch>>;

        async fn search_titles(
            &self,
            kind: TitleKind,
            name: &str,
            year: Option<i32>,
        ) -> AppResult<Vec<TitleHit>>;
    }
}

/// A recorded attempt: (url, query_params, success).
pub type RecordedAttempt = (String, Option<String>, bool);

/// In-memory tracker that captures what the HTTP client reports.
#[derive(Default)]
pub struct RecordingTracker {
    attempts: Mutex<Vec<RecordedAttempt>>,
}

impl RecordingTracker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn attempts(&self) -> Vec<RecordedAttempt> {
        self.attempts.lock().await.clone()
    }
}

#[async_trait]
impl AttemptTracker for RecordingTracker {
    async fn record(&self, url: &str, query_params: Option<&str>, success: bool) -> AppResult<()> {
        self.attempts
            .lock()
            .await
            .push((url.to_string(), query_params.map(str::to_string), success));
        Ok(())
    }
}
