use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::modules::catalog::domain::value_objects::TitleKind;
use crate::shared::errors::{AppError, AppResult};

/// Genre entry as the remote catalog reports it: its external id plus name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogGenre {
    pub id: i64,
    pub name: String,
}

/// One cast credit of a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastCredit {
    pub external_id: i64,
    pub full_name: String,
}

/// Full detail payload for one title, cast included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleDetails {
    pub external_id: i64,
    pub name: String,
    /// ISO date, possibly empty or absent for unreleased titles.
    pub release_date: Option<String>,
    pub genres: Vec<CatalogGenre>,
    pub cast: Vec<CastCredit>,
}

impl TitleDetails {
    pub fn release_year(&self) -> AppResult<Option<i32>> {
        parse_release_year(self.release_date.as_deref())
    }
}

/// Entry of a person's known-for list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownForTitle {
    pub media_type: String,
    pub external_id: i64,
    pub name: String,
    pub release_date: Option<String>,
    pub genre_ids: Vec<i64>,
}

impl KnownForTitle {
    pub fn release_year(&self) -> AppResult<Option<i32>> {
        parse_release_year(self.release_date.as_deref())
    }
}

/// Person search candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonMatch {
    pub external_id: i64,
    pub full_name: String,
    pub department: String,
    pub known_for: Vec<KnownForTitle>,
}

/// Title search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleHit {
    pub external_id: i64,
    pub name: String,
    pub original_name: String,
    pub genre_ids: Vec<i64>,
}

/// Port for the remote title catalog. Implementations report every non-2xx
/// response as an error; callers decide whether that aborts or is skipped.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch details plus cast for one external title id.
    async fn fetch_title_details(
        &self,
        kind: TitleKind,
        external_id: i64,
    ) -> AppResult<TitleDetails>;

    /// Fetch the catalog's global genre list.
    async fn fetch_genre_catalog(&self) -> AppResult<Vec<CatalogGenre>>;

    /// Search people by full name.
    async fn search_person(&self, full_name: &str) -> AppResult<Vec<PersonMatch>>;

    /// Search titles of one variant by name, optionally narrowed by year.
    async fn search_titles(
        &self,
        kind: TitleKind,
        name: &str,
        year: Option<i32>,
    ) -> AppResult<Vec<TitleHit>>;
}

/// Missing or empty dates mean "no year"; anything present must be a valid
/// ISO date.
fn parse_release_year(raw: Option<&str>) -> AppResult<Option<i32>> {
    let raw = match raw {
        Some(r) if !r.trim().is_empty() => r.trim(),
        _ => return Ok(None),
    };
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        AppError::ValidationError(format!("Malformed release date '{}': {}", raw, e))
    })?;
    Ok(Some(date.year()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_year_absent_or_blank_is_none() {
        assert_eq!(parse_release_year(None).unwrap(), None);
        assert_eq!(parse_release_year(Some("")).unwrap(), None);
        assert_eq!(parse_release_year(Some("   ")).unwrap(), None);
    }

    #[test]
    fn release_year_extracts_the_year() {
        assert_eq!(parse_release_year(Some("2010-07-16")).unwrap(), Some(2010));
    }

    #[test]
    fn release_year_rejects_malformed_dates() {
        let err = parse_release_year(Some("soon")).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
