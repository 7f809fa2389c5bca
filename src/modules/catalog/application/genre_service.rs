use std::collections::HashMap;
use std::sync::Arc;

use crate::log_info;
use crate::modules::catalog::domain::entities::Genre;
use crate::modules::catalog::domain::repositories::{GenreRepository, TitleRepository};
use crate::shared::errors::{AppError, AppResult};

/// Resolves genre names to stable ids and owns the genre table.
pub struct GenreService {
    genre_repo: Arc<dyn GenreRepository>,
    title_repo: Arc<dyn TitleRepository>,
}

impl GenreService {
    pub fn new(genre_repo: Arc<dyn GenreRepository>, title_repo: Arc<dyn TitleRepository>) -> Self {
        Self {
            genre_repo,
            title_repo,
        }
    }

    pub async fn create_genre(&self, name: &str) -> AppResult<Genre> {
        // Validate name
        crate::shared::utils::Validator::validate_genre_name(name)?;

        // Check uniqueness
        if self.genre_repo.find_by_name(name).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Genre with name '{}' already exists",
                name
            )));
        }

        let genre = self.genre_repo.create(name).await?;

        log_info!("Created genre '{}' with id {}", genre.name, genre.id);
        Ok(genre)
    }

    pub async fn get_genre(&self, id: i64) -> AppResult<Option<Genre>> {
        let genre = self.genre_repo.find_by_id(id).await?;

        Ok(genre)
    }

    pub async fn get_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let genre = self.genre_repo.find_by_name(name).await?;

        Ok(genre)
    }

    pub async fn get_all_genres(&self) -> AppResult<Vec<Genre>> {
        let genres = self.genre_repo.get_all().await?;

        Ok(genres)
    }

    pub async fn rename_genre(&self, id: i64, new_name: &str) -> AppResult<Genre> {
        // Get existing genre
        let mut genre = self
            .genre_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre with id {} not found", id)))?;

        crate::shared::utils::Validator::validate_genre_name(new_name)?;

        // Check if another genre has this name
        if let Some(existing) = self.genre_repo.find_by_name(new_name).await? {
            if existing.id != genre.id {
                return Err(AppError::AlreadyExists(format!(
                    "Genre with name '{}' already exists",
                    new_name
                )));
            }
        }

        genre.name = new_name.to_string();
        let updated = self.genre_repo.update(&genre).await?;

        Ok(updated)
    }

    /// Deletes a genre and strips its id from every title that carries it,
    /// so no title is left pointing at a missing genre.
    pub async fn delete_genre(&self, id: i64) -> AppResult<()> {
        let genre = self
            .genre_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre with id {} not found", id)))?;

        // Strip from titles before the row goes away
        let stripped = self.title_repo.strip_genre(id).await?;
        self.genre_repo.delete(id).await?;

        log_info!(
            "Deleted genre '{}' (id {}), stripped from {} titles",
            genre.name,
            id,
            stripped
        );
        Ok(())
    }

    /// Maps genre names to ids. All-or-nothing: one unknown name fails the
    /// whole call and nothing is resolved. Output order follows input order,
    /// duplicates collapsed.
    pub async fn resolve_ids(&self, names: &[String]) -> AppResult<Vec<i64>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let found = self.genre_repo.find_by_names(names).await?;
        let by_name: HashMap<&str, i64> = found.iter().map(|g| (g.name.as_str(), g.id)).collect();

        let mut unknown: Vec<&str> = Vec::new();
        for name in names {
            if !by_name.contains_key(name.as_str()) && !unknown.contains(&name.as_str()) {
                unknown.push(name.as_str());
            }
        }
        if !unknown.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Unknown genres: {}",
                unknown.join(", ")
            )));
        }

        let mut ids = Vec::new();
        for name in names {
            let id = by_name[name.as_str()];
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Folds an id+name genre list from the catalog into the local table and
    /// returns the local ids in input order. A known id keeps its stored name;
    /// an unknown id whose name is already taken remaps to the existing row;
    /// anything else is inserted as-is.
    pub async fn absorb_genres(&self, incoming: &[Genre]) -> AppResult<Vec<i64>> {
        if incoming.is_empty() {
            return Ok(Vec::new());
        }

        let existing = self.genre_repo.get_all().await?;
        let mut by_id: HashMap<i64, String> =
            existing.iter().map(|g| (g.id, g.name.clone())).collect();
        let mut by_name: HashMap<String, i64> =
            existing.iter().map(|g| (g.name.clone(), g.id)).collect();

        let mut ids = Vec::new();
        let mut fresh: Vec<Genre> = Vec::new();
        for genre in incoming {
            let id = if by_id.contains_key(&genre.id) {
                genre.id
            } else if let Some(existing_id) = by_name.get(&genre.name) {
                *existing_id
            } else {
                fresh.push(genre.clone());
                by_id.insert(genre.id, genre.name.clone());
                by_name.insert(genre.name.clone(), genre.id);
                genre.id
            };
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if !fresh.is_empty() {
            self.genre_repo.insert_batch(&fresh).await?;
        }
        Ok(ids)
    }

    /// Drops ids with no matching genre row, preserving input order and
    /// collapsing duplicates.
    pub async fn filter_known_ids(&self, ids: &[i64]) -> AppResult<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let known = self.genre_repo.filter_existing_ids(ids).await?;
        let mut kept = Vec::new();
        for id in ids {
            if known.contains(id) && !kept.contains(id) {
                kept.push(*id);
            }
        }
        Ok(kept)
    }
}
