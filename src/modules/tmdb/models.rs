use serde::{Deserialize, Serialize};

// Response envelopes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbGenreListResponse {
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbPersonSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbPerson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbTitleSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbTitleSearchResult>,
}

// Shared pieces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbCastMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

// Title detail payload; movies carry title/release_date, TV shows carry
// name/first_air_date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbTitleDetails {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
}

// Person search types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbPerson {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub known_for: Vec<TmdbKnownFor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbKnownFor {
    pub id: i64,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

// Title search types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbTitleSearchResult {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}
