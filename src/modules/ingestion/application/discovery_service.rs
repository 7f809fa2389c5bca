use std::sync::Arc;

use super::ports::CatalogClient;
use crate::log_info;
use crate::modules::catalog::application::GenreService;
use crate::modules::catalog::domain::entities::Title;
use crate::modules::catalog::domain::repositories::TitleRepository;
use crate::modules::catalog::domain::value_objects::TitleKind;
use crate::shared::errors::{AppError, AppResult};

/// Creates titles from catalog search results instead of the cursor walk.
pub struct DiscoveryService {
    title_repo: Arc<dyn TitleRepository>,
    genre_service: Arc<GenreService>,
    catalog: Arc<dyn CatalogClient>,
}

impl DiscoveryService {
    pub fn new(
        title_repo: Arc<dyn TitleRepository>,
        genre_service: Arc<GenreService>,
        catalog: Arc<dyn CatalogClient>,
    ) -> Self {
        Self {
            title_repo,
            genre_service,
            catalog,
        }
    }

    /// Searches the catalog for `name` and stores the first hit whose title
    /// or original title matches case-insensitively, keyed by the hit's
    /// external id.
    ///
    /// Fails with AlreadyExists when the name (or the matched external id)
    /// is already stored, and with NotFound when no hit matches. A miss is
    /// an error here, not a silent no-op.
    pub async fn search_and_create_title(
        &self,
        kind: TitleKind,
        name: &str,
        year: Option<i32>,
    ) -> AppResult<Title> {
        crate::shared::utils::Validator::validate_title_name(name)?;
        if let Some(year) = year {
            crate::shared::utils::Validator::validate_release_year(year)?;
        }

        if let Some(existing) = self.title_repo.find_by_name(kind, name).await? {
            return Err(AppError::AlreadyExists(format!(
                "{} '{}' already exists with id {}",
                kind.label(),
                name,
                existing.id
            )));
        }

        let hits = self.catalog.search_titles(kind, name, year).await?;
        let wanted = name.trim().to_lowercase();
        let hit = hits
            .into_iter()
            .find(|h| {
                h.name.to_lowercase() == wanted || h.original_name.to_lowercase() == wanted
            })
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No catalog match for {} '{}'",
                    kind.label(),
                    name
                ))
            })?;

        // The hit may share an external identity with a row stored under
        // another name; never create a second row for it
        if self.title_repo.find(kind, hit.external_id).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "{} with catalog id {} already exists",
                kind.label(),
                hit.external_id
            )));
        }

        // Search hits carry bare genre ids; unknown ones are dropped
        let genre_ids = self.genre_service.filter_known_ids(&hit.genre_ids).await?;

        let mut title = Title::new(kind, hit.external_id, hit.name.clone(), year);
        title.set_genres(genre_ids);
        let saved = self.title_repo.save(&title).await?;

        log_info!(
            "Created {} '{}' (id {}) from catalog search",
            kind,
            saved.name,
            saved.id
        );
        Ok(saved)
    }
}
