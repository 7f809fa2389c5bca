/// Integration tests for the TMDB HTTP client.
///
/// Tests cover:
/// - Every outbound call pairing with exactly one attempt record
/// - The API key staying out of the attempt log
/// - Query parameter shapes per endpoint
/// - Construction failures when no API key is configured
mod utils;

use std::net::TcpListener;

use kino::modules::catalog::TitleKind;
use kino::modules::ingestion::CatalogClient;
use kino::modules::tmdb::TmdbClient;
use kino::shared::AppError;
use utils::mocks::RecordingTracker;

/// A base URL nothing listens on: bind an ephemeral port, then drop the
/// listener so connecting to it is refused immediately.
fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener.local_addr().expect("Failed to read local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn a_failed_fetch_is_still_paired_with_an_attempt_record() {
    let tracker = RecordingTracker::new();
    let client = TmdbClient::with_base_url(
        refused_base_url(),
        "super-secret-key".to_string(),
        tracker.clone(),
    )
    .expect("Failed to build client");

    let err = client
        .fetch_title_details(TitleKind::Movie, 42)
        .await
        .expect_err("Nothing listens on the stub port");
    assert!(
        matches!(err, AppError::ExternalServiceError(_)),
        "A refused connection should map to ExternalServiceError, got {:?}",
        err
    );

    let attempts = tracker.attempts().await;
    assert_eq!(attempts.len(), 1, "One call, one attempt record");

    let (url, params, success) = &attempts[0];
    assert!(url.ends_with("/movie/42"), "Unexpected url: {}", url);
    assert_eq!(
        params.as_deref(),
        Some("append_to_response=credits&language=en-US")
    );
    assert!(!success, "A refused connection is a failed attempt");

    assert!(!url.contains("super-secret-key"));
    assert!(
        !params.as_deref().unwrap_or_default().contains("api_key"),
        "The api_key must never land in the attempt log"
    );
}

#[tokio::test]
async fn tv_search_params_carry_the_year_filter() {
    let tracker = RecordingTracker::new();
    let client = TmdbClient::with_base_url(
        refused_base_url(),
        "super-secret-key".to_string(),
        tracker.clone(),
    )
    .expect("Failed to build client");

    let _ = client
        .search_titles(TitleKind::TvShow, "The Wire", Some(2002))
        .await;

    let attempts = tracker.attempts().await;
    assert_eq!(attempts.len(), 1);

    let (url, params, _) = &attempts[0];
    assert!(url.ends_with("/search/tv"), "Unexpected url: {}", url);
    assert_eq!(
        params.as_deref(),
        Some("query=The%20Wire&first_air_date_year=2002")
    );
}

#[tokio::test]
async fn a_missing_api_key_is_an_unauthorized_error() {
    std::env::remove_var("TMDB_API_KEY");

    let tracker = RecordingTracker::new();
    let err = TmdbClient::from_env(tracker.clone()).expect_err("No key in the environment");
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert!(
        tracker.attempts().await.is_empty(),
        "Construction alone must not record attempts"
    );
}
