/// Test data factories using builder pattern
///
/// Provides convenient methods to create catalog payloads with sensible
/// defaults.
use kino::modules::ingestion::{
    CastCredit, CatalogGenre, KnownForTitle, PersonMatch, TitleDetails, TitleHit,
};

pub struct TitleDetailsFactory {
    external_id: i64,
    name: String,
    release_date: Option<String>,
    genres: Vec<CatalogGenre>,
    cast: Vec<CastCredit>,
}

impl Default for TitleDetailsFactory {
    fn default() -> Self {
        Self {
            external_id: 550,
            name: "Fight Club".to_string(),
            release_date: Some("1999-10-15".to_string()),
            genres: Vec::new(),
            cast: Vec::new(),
        }
    }
}

impl TitleDetailsFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, external_id: i64) -> Self {
        self.external_id = external_id;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_release_date(mut self, date: Option<&str>) -> Self {
        self.release_date = date.map(|d| d.to_string());
        self
    }

    pub fn with_genres(mut self, genres: Vec<(i64, &str)>) -> Self {
        self.genres = genres.into_iter().map(|(id, name)| genre(id, name)).collect();
        self
    }

    pub fn with_cast(mut self, cast: Vec<(i64, &str)>) -> Self {
        self.cast = cast.into_iter().map(|(id, name)| credit(id, name)).collect();
        self
    }

    /// Fills the cast with `count` distinct generated credits.
    pub fn with_cast_size(mut self, count: usize) -> Self {
        self.cast = (0..count)
            .map(|i| credit(9000 + i as i64, &format!("Cast Member {}", i)))
            .collect();
        self
    }

    pub fn build(self) -> TitleDetails {
        TitleDetails {
            external_id: self.external_id,
            name: self.name,
            release_date: self.release_date,
            genres: self.genres,
            cast: self.cast,
        }
    }
}

// Convenience functions

pub fn genre(id: i64, name: &str) -> CatalogGenre {
    CatalogGenre {
        id,
        name: name.to_string(),
    }
}

pub fn credit(external_id: i64, full_name: &str) -> CastCredit {
    CastCredit {
        external_id,
        full_name: full_name.to_string(),
    }
}

pub fn known_for_movie(
    external_id: i64,
    name: &str,
    release_date: Option<&str>,
    genre_ids: Vec<i64>,
) -> KnownForTitle {
    KnownForTitle {
        media_type: "movie".to_string(),
        external_id,
        name: name.to_string(),
        release_date: release_date.map(|d| d.to_string()),
        genre_ids,
    }
}

pub fn known_for_tv(external_id: i64, name: &str) -> KnownForTitle {
    KnownForTitle {
        media_type: "tv".to_string(),
        external_id,
        name: name.to_string(),
        release_date: None,
        genre_ids: Vec::new(),
    }
}

pub fn person_match(
    external_id: i64,
    full_name: &str,
    department: &str,
    known_for: Vec<KnownForTitle>,
) -> PersonMatch {
    PersonMatch {
        external_id,
        full_name: full_name.to_string(),
        department: department.to_string(),
        known_for,
    }
}

pub fn title_hit(external_id: i64, name: &str, original_name: &str, genre_ids: Vec<i64>) -> TitleHit {
    TitleHit {
        external_id,
        name: name.to_string(),
        original_name: original_name.to_string(),
        genre_ids,
    }
}
