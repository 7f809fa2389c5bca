use async_trait::async_trait;

use crate::shared::errors::AppResult;

/// Capability the catalog client pairs every outbound call with. Recording
/// is best-effort on the caller's side: a failed write must never fail the
/// call it describes.
#[async_trait]
pub trait AttemptTracker: Send + Sync {
    async fn record(&self, url: &str, query_params: Option<&str>, success: bool) -> AppResult<()>;
}
