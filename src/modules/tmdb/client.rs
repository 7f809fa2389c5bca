use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::mapper::TmdbMapper;
use super::models::{TmdbGenreListResponse, TmdbPersonSearchResponse, TmdbTitleDetails, TmdbTitleSearchResponse};
use crate::modules::catalog::domain::value_objects::TitleKind;
use crate::modules::ingestion::application::ports::{
    CatalogClient, CatalogGenre, PersonMatch, TitleDetails, TitleHit,
};
use crate::modules::tracking::domain::tracker::AttemptTracker;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::RateLimiter;

pub const TMDB_API_BASE_URL: &str = "https://api.themoviedb.org/3";

const USER_AGENT: &str = "Kino-Catalog/0.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const REQUESTS_PER_SECOND: f64 = 4.0;

/// TMDB-backed catalog client. Every outbound call is spaced by the rate
/// limiter and paired with an attempt record, success or not.
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    rate_limiter: RateLimiter,
    tracker: Arc<dyn AttemptTracker>,
    mapper: TmdbMapper,
}

impl TmdbClient {
    pub fn new(api_key: String, tracker: Arc<dyn AttemptTracker>) -> AppResult<Self> {
        Self::with_base_url(TMDB_API_BASE_URL.to_string(), api_key, tracker)
    }

    /// Reads the API key from `TMDB_API_KEY`.
    pub fn from_env(tracker: Arc<dyn AttemptTracker>) -> AppResult<Self> {
        let api_key = std::env::var("TMDB_API_KEY").map_err(|_| {
            AppError::Unauthorized("TMDB_API_KEY not found in environment".to_string())
        })?;
        Self::new(api_key, tracker)
    }

    /// Custom base URL, for pointing the client at a stub server.
    pub fn with_base_url(
        base_url: String,
        api_key: String,
        tracker: Arc<dyn AttemptTracker>,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            api_key,
            rate_limiter: RateLimiter::new(REQUESTS_PER_SECOND),
            tracker,
            mapper: TmdbMapper::new(),
        })
    }

    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.rate_limiter.acquire().await;

        let url = format!("{}{}", self.base_url, path);
        let tracked_params = Self::format_params(params);

        let mut query: Vec<(&str, String)> = vec![("api_key", self.api_key.clone())];
        query.extend(params.iter().map(|(k, v)| (*k, v.clone())));

        let result = self.fetch(&url, &query).await;

        // Best-effort: a failed attempt write never fails the call itself
        if let Err(e) = self
            .tracker
            .record(&url, tracked_params.as_deref(), result.is_ok())
            .await
        {
            log::warn!("TMDB: failed to record attempt for {}: {}", url, e);
        }

        result
    }

    async fn fetch<T>(&self, url: &str, query: &[(&str, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status));
        }
        let parsed = response.json::<T>().await.map_err(|e| {
            AppError::SerializationError(format!("Failed to parse TMDB response: {}", e))
        })?;
        Ok(parsed)
    }

    fn status_error(status: StatusCode) -> AppError {
        match status.as_u16() {
            404 => AppError::NotFound("TMDB resource not found".to_string()),
            401 | 403 => AppError::Unauthorized("TMDB rejected the API key".to_string()),
            429 => AppError::RateLimitError("TMDB rate limit exceeded".to_string()),
            code if status.is_server_error() => {
                AppError::ExternalServiceError(format!("TMDB server error: HTTP {}", code))
            }
            code => AppError::ApiError(format!("TMDB returned HTTP {}", code)),
        }
    }

    /// The api_key never lands in the attempt log.
    fn format_params(params: &[(&str, String)]) -> Option<String> {
        if params.is_empty() {
            return None;
        }
        Some(
            params
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&"),
        )
    }
}

#[async_trait]
impl CatalogClient for TmdbClient {
    async fn fetch_title_details(
        &self,
        kind: TitleKind,
        external_id: i64,
    ) -> AppResult<TitleDetails> {
        let path = match kind {
            TitleKind::Movie => format!("/movie/{}", external_id),
            TitleKind::TvShow => format!("/tv/{}", external_id),
        };
        let params = [
            ("append_to_response", "credits".to_string()),
            ("language", "en-US".to_string()),
        ];

        log::debug!("TMDB: fetching {} details for id {}", kind, external_id);

        let dto: TmdbTitleDetails = self.get_json(&path, &params).await?;
        self.mapper.to_title_details(kind, dto)
    }

    async fn fetch_genre_catalog(&self) -> AppResult<Vec<CatalogGenre>> {
        log::debug!("TMDB: fetching genre catalog");

        let response: TmdbGenreListResponse = self
            .get_json("/genre/movie/list", &[("language", "en-US".to_string())])
            .await?;

        log::debug!("TMDB: genre catalog carries {} genres", response.genres.len());
        Ok(self.mapper.to_genres(response))
    }

    async fn search_person(&self, full_name: &str) -> AppResult<Vec<PersonMatch>> {
        log::debug!("TMDB: searching person '{}'", full_name);

        let params = [("query", full_name.to_string())];
        let response: TmdbPersonSearchResponse = self.get_json("/search/person", &params).await?;

        Ok(self.mapper.to_person_matches(response))
    }

    async fn search_titles(
        &self,
        kind: TitleKind,
        name: &str,
        year: Option<i32>,
    ) -> AppResult<Vec<TitleHit>> {
        let (path, year_param) = match kind {
            TitleKind::Movie => ("/search/movie", "primary_release_year"),
            TitleKind::TvShow => ("/search/tv", "first_air_date_year"),
        };
        let mut params = vec![("query", name.to_string())];
        if let Some(year) = year {
            params.push((year_param, year.to_string()));
        }

        log::debug!("TMDB: searching {} '{}' (year {:?})", kind, name, year);

        let response: TmdbTitleSearchResponse = self.get_json(path, &params).await?;
        Ok(self.mapper.to_title_hits(response))
    }
}
