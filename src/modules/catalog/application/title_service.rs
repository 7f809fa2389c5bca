use std::sync::Arc;

use super::genre_service::GenreService;
use crate::log_info;
use crate::modules::catalog::domain::entities::Title;
use crate::modules::catalog::domain::repositories::{
    ActorRepository, LinkRepository, TitleRepository,
};
use crate::modules::catalog::domain::value_objects::TitleKind;
use crate::shared::errors::{AppError, AppResult};

pub struct TitleService {
    title_repo: Arc<dyn TitleRepository>,
    actor_repo: Arc<dyn ActorRepository>,
    link_repo: Arc<dyn LinkRepository>,
    genre_service: Arc<GenreService>,
}

impl TitleService {
    pub fn new(
        title_repo: Arc<dyn TitleRepository>,
        actor_repo: Arc<dyn ActorRepository>,
        link_repo: Arc<dyn LinkRepository>,
        genre_service: Arc<GenreService>,
    ) -> Self {
        Self {
            title_repo,
            actor_repo,
            link_repo,
            genre_service,
        }
    }

    pub async fn create_title(
        &self,
        kind: TitleKind,
        name: &str,
        year: Option<i32>,
        genre_names: &[String],
    ) -> AppResult<Title> {
        // Validate fields
        crate::shared::utils::Validator::validate_title_name(name)?;
        if let Some(year) = year {
            crate::shared::utils::Validator::validate_release_year(year)?;
        }

        // Check if a title with this name already exists for the variant
        if self.title_repo.find_by_name(kind, name).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "{} with name '{}' already exists",
                kind.label(),
                name
            )));
        }

        // Resolve genre names before anything is written
        let genre_ids = self.genre_service.resolve_ids(genre_names).await?;

        let title = self
            .title_repo
            .create_local(kind, name, year, &genre_ids)
            .await?;

        log_info!("Created {} '{}' with id {}", kind, title.name, title.id);
        Ok(title)
    }

    pub async fn get_title(&self, kind: TitleKind, id: i64) -> AppResult<Option<Title>> {
        let title = self.title_repo.find(kind, id).await?;

        Ok(title)
    }

    pub async fn get_title_by_name(&self, kind: TitleKind, name: &str) -> AppResult<Option<Title>> {
        let title = self.title_repo.find_by_name(kind, name).await?;

        Ok(title)
    }

    pub async fn get_all_titles(&self, kind: TitleKind) -> AppResult<Vec<Title>> {
        let titles = self.title_repo.get_all(kind).await?;

        Ok(titles)
    }

    pub async fn update_title(
        &self,
        kind: TitleKind,
        id: i64,
        name: Option<String>,
        year: Option<i32>,
    ) -> AppResult<Title> {
        // Get existing title
        let mut title = self.require_title(kind, id).await?;

        if let Some(new_name) = name {
            crate::shared::utils::Validator::validate_title_name(&new_name)?;
            // Check if another title already carries this name
            if let Some(existing) = self.title_repo.find_by_name(kind, &new_name).await? {
                if existing.id != title.id {
                    return Err(AppError::AlreadyExists(format!(
                        "{} with name '{}' already exists",
                        kind.label(),
                        new_name
                    )));
                }
            }
            title.rename(new_name);
        }
        if let Some(new_year) = year {
            crate::shared::utils::Validator::validate_release_year(new_year)?;
            title.set_year(Some(new_year));
        }

        let updated = self.title_repo.save(&title).await?;

        Ok(updated)
    }

    /// Replaces the title's genre set with the resolved name list.
    pub async fn set_genres(
        &self,
        kind: TitleKind,
        id: i64,
        names: &[String],
    ) -> AppResult<Title> {
        let mut title = self.require_title(kind, id).await?;

        // Resolve first; a partial match is a total failure
        let ids = self.genre_service.resolve_ids(names).await?;

        title.set_genres(ids);
        let updated = self.title_repo.save(&title).await?;

        Ok(updated)
    }

    /// Unions the resolved name list into the title's genre set. Idempotent.
    pub async fn add_genres(
        &self,
        kind: TitleKind,
        id: i64,
        names: &[String],
    ) -> AppResult<Title> {
        let mut title = self.require_title(kind, id).await?;

        let ids = self.genre_service.resolve_ids(names).await?;

        let mut changed = false;
        for genre_id in ids {
            changed |= title.add_genre(genre_id);
        }
        if !changed {
            return Ok(title);
        }

        let updated = self.title_repo.save(&title).await?;

        Ok(updated)
    }

    /// Removes the resolved name list from the title's genre set. When the
    /// current set is empty this is a no-op and never errors, even for names
    /// the genre table does not know.
    pub async fn remove_genres(
        &self,
        kind: TitleKind,
        id: i64,
        names: &[String],
    ) -> AppResult<Title> {
        let mut title = self.require_title(kind, id).await?;

        if title.genre_ids.is_empty() {
            return Ok(title);
        }

        let ids = self.genre_service.resolve_ids(names).await?;

        let mut changed = false;
        for genre_id in ids {
            changed |= title.remove_genre(genre_id);
        }
        if !changed {
            return Ok(title);
        }

        let updated = self.title_repo.save(&title).await?;

        Ok(updated)
    }

    /// Deletes a title and drops its id from every linked actor in the same
    /// unit of work, keeping the relation symmetric.
    pub async fn delete_title(&self, kind: TitleKind, id: i64) -> AppResult<()> {
        let title = self.require_title(kind, id).await?;

        let mut detached = self.actor_repo.find_many(&title.actor_ids).await?;
        for actor in &mut detached {
            actor.remove_title(kind, id);
        }

        self.link_repo.delete_title(kind, id, &detached).await?;

        log_info!(
            "Deleted {} '{}' (id {}), unlinked {} actors",
            kind,
            title.name,
            id,
            detached.len()
        );
        Ok(())
    }

    async fn require_title(&self, kind: TitleKind, id: i64) -> AppResult<Title> {
        self.title_repo.find(kind, id).await?.ok_or_else(|| {
            AppError::NotFound(format!("{} with id {} not found", kind.label(), id))
        })
    }
}
