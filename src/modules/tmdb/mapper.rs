use super::models::{
    TmdbGenreListResponse, TmdbPersonSearchResponse, TmdbTitleDetails, TmdbTitleSearchResponse,
};
use crate::modules::catalog::domain::value_objects::TitleKind;
use crate::modules::ingestion::application::ports::{
    CastCredit, CatalogGenre, KnownForTitle, PersonMatch, TitleDetails, TitleHit,
};
use crate::shared::errors::{AppError, AppResult};

/// Maps TMDB wire payloads to the catalog client's variant-neutral types.
/// Movies and TV shows disagree on field names (title/name, release_date/
/// first_air_date); the variant decides which side wins.
#[derive(Debug, Clone)]
pub struct TmdbMapper;

impl TmdbMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn to_title_details(
        &self,
        kind: TitleKind,
        dto: TmdbTitleDetails,
    ) -> AppResult<TitleDetails> {
        let name = match kind {
            TitleKind::Movie => dto.title.or(dto.name),
            TitleKind::TvShow => dto.name.or(dto.title),
        }
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| {
            AppError::ValidationError(format!("TMDB payload for id {} carries no name", dto.id))
        })?;
        let release_date = match kind {
            TitleKind::Movie => dto.release_date.or(dto.first_air_date),
            TitleKind::TvShow => dto.first_air_date.or(dto.release_date),
        };

        let cast = dto
            .credits
            .map(|c| c.cast)
            .unwrap_or_default()
            .into_iter()
            .map(|member| CastCredit {
                external_id: member.id,
                full_name: member.name,
            })
            .collect();

        Ok(TitleDetails {
            external_id: dto.id,
            name,
            release_date,
            genres: dto
                .genres
                .into_iter()
                .map(|g| CatalogGenre {
                    id: g.id,
                    name: g.name,
                })
                .collect(),
            cast,
        })
    }

    pub fn to_genres(&self, response: TmdbGenreListResponse) -> Vec<CatalogGenre> {
        response
            .genres
            .into_iter()
            .map(|g| CatalogGenre {
                id: g.id,
                name: g.name,
            })
            .collect()
    }

    pub fn to_person_matches(&self, response: TmdbPersonSearchResponse) -> Vec<PersonMatch> {
        response
            .results
            .into_iter()
            .map(|person| {
                let known_for = person
                    .known_for
                    .into_iter()
                    .filter_map(|entry| {
                        // Entries without a usable name cannot become titles
                        let name = entry.title.or(entry.name)?;
                        Some(KnownForTitle {
                            media_type: entry.media_type.unwrap_or_default(),
                            external_id: entry.id,
                            name,
                            release_date: entry.release_date.or(entry.first_air_date),
                            genre_ids: entry.genre_ids,
                        })
                    })
                    .collect();
                PersonMatch {
                    external_id: person.id,
                    full_name: person.name,
                    department: person.known_for_department.unwrap_or_default(),
                    known_for,
                }
            })
            .collect()
    }

    pub fn to_title_hits(&self, response: TmdbTitleSearchResponse) -> Vec<TitleHit> {
        response
            .results
            .into_iter()
            .filter_map(|hit| {
                let name = hit.title.or(hit.name)?;
                Some(TitleHit {
                    external_id: hit.id,
                    name,
                    original_name: hit.original_title.or(hit.original_name).unwrap_or_default(),
                    genre_ids: hit.genre_ids,
                })
            })
            .collect()
    }
}

impl Default for TmdbMapper {
    fn default() -> Self {
        Self::new()
    }
}
